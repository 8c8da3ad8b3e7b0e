//! Structural paths
//!
//!     A [`StructurePath`] names a node by how you get to it from some starting node: a list
//!     of key names and sequence indexes. Paths are how callers address nodes across
//!     re-parses, since node ids are not stable between trees.
//!
//!     The string form joins key segments with `.` and writes index segments in brackets:
//!
//!         spring.datasource.url
//!         servers[0].host
//!         matrix[1][0]

use super::node::{NodeId, NodeKind};
use super::tree::StructureTree;
use crate::yaml::error::PathParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One navigation step.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathSegment {
    /// The first `Key` child with this exact key text
    Key(String),
    /// The child at this position, if it is a `Seq` node
    Index(usize),
}

impl PathSegment {
    pub fn key(name: impl Into<String>) -> Self {
        PathSegment::Key(name.into())
    }

    pub fn index(index: usize) -> Self {
        PathSegment::Index(index)
    }

    pub fn as_key(&self) -> Option<&str> {
        match self {
            PathSegment::Key(name) => Some(name),
            PathSegment::Index(_) => None,
        }
    }

    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathSegment::Key(_) => None,
            PathSegment::Index(index) => Some(*index),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(name) => f.write_str(name),
            PathSegment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

/// An ordered list of [`PathSegment`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StructurePath {
    segments: Vec<PathSegment>,
}

impl StructurePath {
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// A path of key segments from a dotted property name (`a.b.c`).
    pub fn from_property(property: &str) -> Self {
        if property.is_empty() {
            return Self::empty();
        }
        Self::new(property.split('.').map(PathSegment::key).collect())
    }

    /// A single key segment, with no splitting on `.`.
    pub fn from_simple_property(name: &str) -> Self {
        Self::new(vec![PathSegment::key(name)])
    }

    /// The path leading from the root of `tree` to `id`.
    ///
    /// Key ancestors contribute their key text, sequence items their position among their
    /// parent's children. Returns `None` when some node on the way is a raw line, which no
    /// path can address. With duplicate keys the path names the first of them.
    pub fn of(tree: &StructureTree, id: NodeId) -> Option<Self> {
        let mut segments = Vec::new();
        let mut current = id;
        while let Some(parent) = tree.parent(current) {
            let segment = match tree.node(current).kind() {
                NodeKind::Key { key, .. } => PathSegment::Key(key.clone()),
                NodeKind::Seq => {
                    let position = tree
                        .children(parent)
                        .iter()
                        .position(|child| *child == current)?;
                    PathSegment::Index(position)
                }
                NodeKind::Raw | NodeKind::Root => return None,
            };
            segments.push(segment);
            current = parent;
        }
        segments.reverse();
        Some(Self::new(segments))
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn segment(&self, index: usize) -> Option<&PathSegment> {
        self.segments.get(index)
    }

    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    /// A new path with `segment` added at the end.
    pub fn append(&self, segment: PathSegment) -> Self {
        let mut path = self.clone();
        path.push(segment);
        path
    }

    /// A new path without its first `count` segments.
    pub fn drop_first(&self, count: usize) -> Self {
        Self::new(self.segments.iter().skip(count).cloned().collect())
    }

    /// A new path without its last segment, or `None` for the empty path.
    pub fn parent(&self) -> Option<Self> {
        let (_, init) = self.segments.split_last()?;
        Some(Self::new(init.to_vec()))
    }
}

impl fmt::Display for StructurePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 && matches!(segment, PathSegment::Key(_)) {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for StructurePath {
    type Err = PathParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        let mut segments = Vec::new();
        let mut pos = 0;

        while pos < bytes.len() {
            match bytes[pos] {
                b'[' => {
                    let close = s[pos + 1..]
                        .find(']')
                        .ok_or(PathParseError::UnterminatedIndex { position: pos })?;
                    let digits = &s[pos + 1..pos + 1 + close];
                    let index = parse_index(digits).ok_or_else(|| PathParseError::InvalidIndex {
                        text: digits.to_string(),
                        position: pos + 1,
                    })?;
                    segments.push(PathSegment::Index(index));
                    pos += close + 2;
                }
                b'.' if !segments.is_empty() => {
                    let (key, next) = read_key(s, pos + 1)?;
                    segments.push(PathSegment::Key(key.to_string()));
                    pos = next;
                }
                _ if segments.is_empty() => {
                    let (key, next) = read_key(s, pos)?;
                    segments.push(PathSegment::Key(key.to_string()));
                    pos = next;
                }
                _ => {
                    let character = s[pos..].chars().next().unwrap_or_default();
                    return Err(PathParseError::UnexpectedCharacter {
                        character,
                        position: pos,
                    });
                }
            }
        }

        Ok(Self::new(segments))
    }
}

/// Read a key starting at `start`, up to the next `.` or `[`.
fn read_key(s: &str, start: usize) -> Result<(&str, usize), PathParseError> {
    let len = s[start..]
        .find(|c: char| c == '.' || c == '[')
        .unwrap_or(s.len() - start);
    if len == 0 {
        return Err(PathParseError::EmptyKey { position: start });
    }
    Ok((&s[start..start + len], start + len))
}

fn parse_index(digits: &str) -> Option<usize> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yaml::building::parse;
    use crate::yaml::document::TextDocument;
    use rstest::rstest;

    fn path(segments: &[PathSegment]) -> StructurePath {
        StructurePath::new(segments.to_vec())
    }

    #[rstest]
    #[case("a", vec![PathSegment::key("a")])]
    #[case("spring.datasource.url", vec![PathSegment::key("spring"), PathSegment::key("datasource"), PathSegment::key("url")])]
    #[case("servers[0].host", vec![PathSegment::key("servers"), PathSegment::index(0), PathSegment::key("host")])]
    #[case("[2]", vec![PathSegment::index(2)])]
    #[case("matrix[1][10]", vec![PathSegment::key("matrix"), PathSegment::index(1), PathSegment::index(10)])]
    #[case("", vec![])]
    fn test_parse_path(#[case] text: &str, #[case] expected: Vec<PathSegment>) {
        let parsed: StructurePath = text.parse().expect("valid path");
        assert_eq!(parsed, path(&expected));
        assert_eq!(parsed.to_string(), text);
    }

    #[rstest]
    #[case("a..b", PathParseError::EmptyKey { position: 2 })]
    #[case("a.", PathParseError::EmptyKey { position: 2 })]
    #[case(".a", PathParseError::EmptyKey { position: 0 })]
    #[case("a[0", PathParseError::UnterminatedIndex { position: 1 })]
    #[case("a[-1]", PathParseError::InvalidIndex { text: "-1".to_string(), position: 2 })]
    #[case("a[]", PathParseError::InvalidIndex { text: "".to_string(), position: 2 })]
    #[case("a[0]b", PathParseError::UnexpectedCharacter { character: 'b', position: 4 })]
    fn test_parse_path_errors(#[case] text: &str, #[case] expected: PathParseError) {
        assert_eq!(text.parse::<StructurePath>(), Err(expected));
    }

    #[test]
    fn test_property_constructors() {
        assert_eq!(
            StructurePath::from_property("a.b"),
            path(&[PathSegment::key("a"), PathSegment::key("b")])
        );
        assert_eq!(
            StructurePath::from_simple_property("a.b"),
            path(&[PathSegment::key("a.b")])
        );
        assert!(StructurePath::from_property("").is_empty());
    }

    #[test]
    fn test_path_manipulation() {
        let full: StructurePath = "a.b[3].c".parse().expect("valid path");
        assert_eq!(full.len(), 4);
        assert_eq!(full.segment(2), Some(&PathSegment::Index(3)));
        assert_eq!(full.drop_first(2).to_string(), "[3].c");
        assert_eq!(full.drop_first(10), StructurePath::empty());
        assert_eq!(
            full.parent().map(|p| p.to_string()),
            Some("a.b[3]".to_string())
        );
        assert_eq!(StructurePath::empty().parent(), None);
        assert_eq!(
            StructurePath::from_property("a")
                .append(PathSegment::index(0))
                .to_string(),
            "a[0]"
        );
        assert_eq!(full.last().and_then(PathSegment::as_key), Some("c"));
        assert_eq!(full.segment(2).and_then(PathSegment::as_index), Some(3));
    }

    #[test]
    fn test_path_of_round_trips_through_traverse() {
        let doc = TextDocument::new("foo:\n- bar:\n  - a\n  - key: lol\n- e\n");
        let tree = parse(&doc);
        let root = tree.root();
        let target: StructurePath = "foo[0].bar[1].key".parse().expect("valid path");
        let node = tree.traverse(root, &target).expect("node at path");
        assert_eq!(tree.node_text(node, &doc), "key: lol");
        assert_eq!(StructurePath::of(&tree, node), Some(target));
        assert_eq!(StructurePath::of(&tree, root), Some(StructurePath::empty()));
    }

    #[test]
    fn test_raw_nodes_have_no_path() {
        let doc = TextDocument::new("a:\n  text\n");
        let tree = parse(&doc);
        let a = tree.children(tree.root())[0];
        let raw = tree.children(a)[0];
        assert_eq!(StructurePath::of(&tree, raw), None);
    }
}

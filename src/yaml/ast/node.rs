//! Node types for the structure tree

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable arena identifier for a node in a [`StructureTree`](super::StructureTree).
///
/// Ids are only meaningful for the tree that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in the arena. Arena order is document order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// The variant tag of a node, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NodeType {
    Root,
    Key,
    Seq,
    Raw,
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeType::Root => "ROOT",
            NodeType::Key => "KEY",
            NodeType::Seq => "SEQ",
            NodeType::Raw => "RAW",
        };
        f.write_str(name)
    }
}

/// What a node is, with the data only that variant carries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Root,
    /// A `simple-key:` line
    Key {
        /// Text before the separator
        key: String,
        /// Absolute offset of the `:` separator
        separator: usize,
    },
    /// One `- ` sequence item
    Seq,
    /// A line that is neither a key nor a sequence item
    Raw,
}

impl NodeKind {
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeKind::Root => NodeType::Root,
            NodeKind::Key { .. } => NodeType::Key,
            NodeKind::Seq => NodeType::Seq,
            NodeKind::Raw => NodeType::Raw,
        }
    }
}

/// A node of the structure tree.
///
/// `start` is where the node's own content begins (after indentation for keys and sequence
/// items) and `end` is the end of the line that produced it. Descendants extend a node's
/// span further; see [`StructureTree::tree_end`](super::StructureTree::tree_end).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) indent: Option<usize>,
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    pub(crate) fn root() -> Self {
        Self {
            kind: NodeKind::Root,
            indent: None,
            start: 0,
            end: 0,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }

    /// Indentation the node was recognized at. `None` for the root (below every real
    /// indentation) and for raw blank or comment lines.
    pub fn indent(&self) -> Option<usize> {
        self.indent
    }

    /// [`Node::indent`] as a number, with `-1` standing in for `None`.
    pub fn indent_level(&self) -> isize {
        self.indent.map_or(-1, |indent| indent as isize)
    }

    pub fn start(&self) -> usize {
        self.start
    }

    /// End of the node's own line, not counting descendants.
    pub fn node_end(&self) -> usize {
        self.end
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        matches!(self.kind, NodeKind::Root)
    }

    pub fn is_key(&self) -> bool {
        matches!(self.kind, NodeKind::Key { .. })
    }

    pub fn is_seq(&self) -> bool {
        matches!(self.kind, NodeKind::Seq)
    }

    pub fn is_raw(&self) -> bool {
        matches!(self.kind, NodeKind::Raw)
    }

    /// The key text, for `Key` nodes.
    pub fn key(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Key { key, .. } => Some(key),
            _ => None,
        }
    }

    /// Absolute offset of the `:` separator, for `Key` nodes.
    pub fn separator_offset(&self) -> Option<usize> {
        match self.kind {
            NodeKind::Key { separator, .. } => Some(separator),
            _ => None,
        }
    }

    /// Whether `offset` falls in the node's own text region.
    pub fn node_contains(&self, offset: usize) -> bool {
        self.start + self.indent.unwrap_or(0) <= offset && offset <= self.end
    }

    /// Whether `offset` falls in the key region `[start, separator]` of a `Key` node.
    pub fn is_in_key(&self, offset: usize) -> bool {
        match self.kind {
            NodeKind::Key { separator, .. } => self.start <= offset && offset <= separator,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_node(start: usize, key: &str) -> Node {
        Node {
            kind: NodeKind::Key {
                key: key.to_string(),
                separator: start + key.len(),
            },
            indent: Some(0),
            start,
            end: start + key.len() + 3,
            parent: Some(NodeId(0)),
            children: Vec::new(),
        }
    }

    #[test]
    fn test_root_has_sentinel_indent() {
        let root = Node::root();
        assert!(root.is_root());
        assert_eq!(root.indent(), None);
        assert_eq!(root.indent_level(), -1);
        assert_eq!(root.parent(), None);
    }

    #[test]
    fn test_key_accessors() {
        let node = key_node(10, "name");
        assert_eq!(node.node_type(), NodeType::Key);
        assert_eq!(node.key(), Some("name"));
        assert_eq!(node.separator_offset(), Some(14));
        assert!(node.is_in_key(10));
        assert!(node.is_in_key(14));
        assert!(!node.is_in_key(9));
        assert!(!node.is_in_key(15));
    }

    #[test]
    fn test_non_key_nodes_have_no_key_region() {
        let root = Node::root();
        assert_eq!(root.key(), None);
        assert_eq!(root.separator_offset(), None);
        assert!(!root.is_in_key(0));
    }

    #[test]
    fn test_node_type_display() {
        assert_eq!(NodeType::Root.to_string(), "ROOT");
        assert_eq!(NodeType::Key.to_string(), "KEY");
        assert_eq!(NodeType::Seq.to_string(), "SEQ");
        assert_eq!(NodeType::Raw.to_string(), "RAW");
    }
}

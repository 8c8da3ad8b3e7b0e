//! The arena-backed structure tree and its queries
//!
//! Lookups
//!
//!     - [`StructureTree::find_node_at`]: deepest node whose span contains an offset. Spans are
//!       inclusive at both ends (`start..=tree_end`), and the first child that contains the
//!       offset wins, so an offset sitting on a line terminator belongs to the line before it.
//!     - [`StructureTree::traverse_key`] / [`StructureTree::traverse_index`]: one navigation
//!       step by key name or by sequence index.
//!     - [`StructureTree::traverse`]: a whole [`StructurePath`] at once.
//!
//! Arena order
//!
//!     Nodes are pushed while reading the document top to bottom, so arena order is a
//!     pre-order walk in document order.

use super::node::{Node, NodeId, NodeKind};
use super::path::{PathSegment, StructurePath};
use crate::yaml::document::Document;

/// An immutable structure tree produced by [`parse`](crate::yaml::building::parse).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructureTree {
    nodes: Vec<Node>,
}

impl StructureTree {
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![Node::root()],
        }
    }

    /// Append a new node as the last child of `parent`.
    pub(crate) fn push(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        indent: Option<usize>,
        start: usize,
        end: usize,
    ) -> NodeId {
        debug_assert!(
            !self.nodes[parent.0].is_raw(),
            "raw nodes are leaves and cannot take children"
        );
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            indent,
            start,
            end,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// The node with the given id.
    ///
    /// # Panics
    ///
    /// If `id` was not produced by this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the tree is just a root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// All nodes in document order, root first.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index), node))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).children.last().copied()
    }

    /// First child with a defined indentation, skipping blank and comment lines.
    pub fn first_real_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|child| self.node(*child).indent.is_some())
    }

    /// Number of ancestors between `id` and the root.
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// End of the node's span including all descendants: the end of its last descendant, or
    /// its own end when it has no children.
    pub fn tree_end(&self, id: NodeId) -> usize {
        let mut current = id;
        while let Some(last) = self.last_child(current) {
            current = last;
        }
        self.node(current).end
    }

    /// Whether `offset` is within `start..=tree_end` of the node.
    pub fn tree_contains(&self, id: NodeId, offset: usize) -> bool {
        self.node(id).start <= offset && offset <= self.tree_end(id)
    }

    /// Whether `offset` is in the value region of a `Key` (`(separator, tree_end]`) or a `Seq`
    /// (`[start + 2, tree_end]`). Always false for other kinds.
    pub fn is_in_value(&self, id: NodeId, offset: usize) -> bool {
        let node = self.node(id);
        match node.kind {
            NodeKind::Key { separator, .. } => offset > separator && offset <= self.tree_end(id),
            NodeKind::Seq => {
                offset >= node.start + crate::yaml::lexing::SEQ_MARKER_WIDTH
                    && offset <= self.tree_end(id)
            }
            NodeKind::Root | NodeKind::Raw => false,
        }
    }

    /// The deepest node containing `offset`, searching from the root.
    ///
    /// Any offset from `0` to the document length finds at least the root; offsets beyond the
    /// document give `None`.
    pub fn find_node_at(&self, offset: usize) -> Option<NodeId> {
        self.find_from(self.root(), offset)
    }

    /// The deepest node in the subtree of `id` containing `offset`.
    pub fn find_from(&self, id: NodeId, offset: usize) -> Option<NodeId> {
        if !self.tree_contains(id, offset) {
            return None;
        }
        let mut current = id;
        while let Some(child) = self
            .children(current)
            .iter()
            .copied()
            .find(|child| self.tree_contains(*child, offset))
        {
            current = child;
        }
        Some(current)
    }

    /// First `Key` child of `id` whose key text is exactly `name`.
    pub fn traverse_key(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|child| self.node(*child).key() == Some(name))
    }

    /// The `index`-th child of `id`, provided that child is a `Seq` node. Non-`Seq` siblings
    /// still count towards the index.
    pub fn traverse_index(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.children(id)
            .get(index)
            .copied()
            .filter(|child| self.node(*child).is_seq())
    }

    /// One navigation step. Raw nodes support no navigation.
    pub fn traverse_segment(&self, id: NodeId, segment: &PathSegment) -> Option<NodeId> {
        if self.node(id).is_raw() {
            return None;
        }
        match segment {
            PathSegment::Key(name) => self.traverse_key(id, name),
            PathSegment::Index(index) => self.traverse_index(id, *index),
        }
    }

    /// Follow `path` from `id`, stopping at the first step that leads nowhere.
    pub fn traverse(&self, id: NodeId, path: &StructurePath) -> Option<NodeId> {
        path.segments()
            .iter()
            .try_fold(id, |current, segment| self.traverse_segment(current, segment))
    }

    /// The node's own text, `start..node_end`.
    pub fn node_text<'d, D: Document + ?Sized>(&self, id: NodeId, doc: &'d D) -> &'d str {
        let node = self.node(id);
        doc.text_between(node.start, node.end)
    }

    /// The text of the node and all its descendants, `start..tree_end`.
    pub fn tree_text<'d, D: Document + ?Sized>(&self, id: NodeId, doc: &'d D) -> &'d str {
        doc.text_between(self.node(id).start, self.tree_end(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yaml::building::parse;
    use crate::yaml::document::TextDocument;

    fn key(name: &str) -> PathSegment {
        PathSegment::Key(name.to_string())
    }

    #[test]
    fn test_new_tree_is_just_a_root() {
        let tree = StructureTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 1);
        assert!(tree.node(tree.root()).is_root());
        assert_eq!(tree.tree_end(tree.root()), 0);
    }

    #[test]
    fn test_push_links_parent_and_child() {
        let mut tree = StructureTree::new();
        let root = tree.root();
        let a = tree.push(
            root,
            NodeKind::Key {
                key: "a".to_string(),
                separator: 1,
            },
            Some(0),
            0,
            2,
        );
        let raw = tree.push(a, NodeKind::Raw, Some(2), 5, 9);
        assert_eq!(tree.children(root), &[a]);
        assert_eq!(tree.children(a), &[raw]);
        assert_eq!(tree.parent(raw), Some(a));
        assert_eq!(tree.tree_end(root), 9);
        assert_eq!(tree.depth(raw), 2);
    }

    #[test]
    fn test_find_prefers_first_containing_child() {
        let doc = TextDocument::new("a: 1\nb: 2");
        let tree = parse(&doc);
        let root = tree.root();
        let a = tree.children(root)[0];
        let b = tree.children(root)[1];
        // Offset 4 is the newline after "a: 1": both ends are inclusive
        assert_eq!(tree.find_node_at(4), Some(a));
        assert_eq!(tree.find_node_at(5), Some(b));
        assert_eq!(tree.find_node_at(9), Some(b));
        assert_eq!(tree.find_node_at(10), None);
    }

    #[test]
    fn test_find_in_indentation_falls_back_to_parent() {
        let doc = TextDocument::new("a:\n    b: 1");
        let tree = parse(&doc);
        let a = tree.children(tree.root())[0];
        // Offsets inside the indentation of "b" are not inside "b"
        assert_eq!(tree.find_node_at(4), Some(a));
        assert_eq!(tree.find_node_at(7), Some(tree.children(a)[0]));
    }

    #[test]
    fn test_traverse_index_counts_non_seq_siblings() {
        let doc = TextDocument::new("list:\n  # note\n  - a\n  - b\n");
        let tree = parse(&doc);
        let list = tree
            .traverse_key(tree.root(), "list")
            .expect("list key");
        assert_eq!(tree.traverse_index(list, 0), None);
        let first = tree.traverse_index(list, 1).expect("first item");
        assert_eq!(tree.node_text(first, &doc), "- a");
        assert_eq!(tree.traverse_index(list, 5), None);
    }

    #[test]
    fn test_traverse_key_is_exact_and_first_wins() {
        let doc = TextDocument::new("Name: 1\nname: 2\nname: 3\n");
        let tree = parse(&doc);
        let root = tree.root();
        let found = tree.traverse_key(root, "name").expect("lower-case key");
        assert_eq!(tree.node_text(found, &doc), "name: 2");
        assert_eq!(tree.traverse_key(root, "NAME"), None);
    }

    #[test]
    fn test_traverse_path_and_raw_dead_end() {
        let doc = TextDocument::new("a:\n  b:\n    text\n");
        let tree = parse(&doc);
        let root = tree.root();
        let path = StructurePath::new(vec![key("a"), key("b")]);
        let b = tree.traverse(root, &path).expect("a.b");
        assert_eq!(tree.node(b).key(), Some("b"));

        let raw = tree.children(b)[0];
        assert!(tree.node(raw).is_raw());
        assert_eq!(tree.traverse_segment(raw, &PathSegment::Index(0)), None);
        assert_eq!(tree.traverse(root, &StructurePath::empty()), Some(root));
    }

    #[test]
    fn test_value_regions() {
        let doc = TextDocument::new("k: v");
        let tree = parse(&doc);
        let k = tree.children(tree.root())[0];
        assert!(!tree.is_in_value(k, 1));
        assert!(tree.is_in_value(k, 2));
        assert!(tree.is_in_value(k, 4));
        assert!(!tree.is_in_value(k, 5));
        assert!(!tree.is_in_value(tree.root(), 0));

        let doc = TextDocument::new("- item");
        let tree = parse(&doc);
        let seq = tree.children(tree.root())[0];
        assert!(!tree.is_in_value(seq, 1));
        assert!(tree.is_in_value(seq, 2));
        assert!(tree.is_in_value(seq, 6));
        assert!(!tree.is_in_value(seq, 7));
    }

    #[test]
    fn test_iter_is_document_order() {
        let doc = TextDocument::new("a:\n  b: 1\nc: 2");
        let tree = parse(&doc);
        let starts: Vec<usize> = tree.iter().map(|(_, node)| node.start()).collect();
        assert_eq!(starts, vec![0, 0, 5, 10]);
    }
}

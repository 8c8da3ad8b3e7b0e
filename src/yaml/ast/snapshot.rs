//! Tree snapshot - a self-contained, serializable copy of a structure tree
//!
//! A [`StructureTree`] only stores offsets, so serializing it on its own is not very useful.
//! A [`NodeSnapshot`] resolves each node against its document (text, key, computed tree end)
//! and nests children directly, which is the shape the json and yaml formats want.

use super::node::{NodeId, NodeType};
use super::tree::StructureTree;
use crate::yaml::document::Document;
use serde::{Deserialize, Serialize};

/// A snapshot of a node and its subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub kind: NodeType,
    /// Indentation, `-1` when undefined
    pub indent: isize,
    pub start: usize,
    pub node_end: usize,
    pub tree_end: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSnapshot>,
}

/// Snapshot of the whole tree, from the root.
pub fn snapshot_tree<D: Document + ?Sized>(tree: &StructureTree, doc: &D) -> NodeSnapshot {
    snapshot_node(tree, tree.root(), doc)
}

/// Snapshot of the subtree rooted at `id`.
///
/// Built bottom-up without recursion. The result nests one level per tree level, so dropping
/// or serializing it recurses that deep; check [`nesting_depth`] first for untrusted input.
pub fn snapshot_node<D: Document + ?Sized>(
    tree: &StructureTree,
    id: NodeId,
    doc: &D,
) -> NodeSnapshot {
    let mut order = Vec::new();
    let mut stack = vec![id];
    while let Some(current) = stack.pop() {
        order.push(current);
        stack.extend(tree.children(current).iter().copied());
    }

    let mut done: Vec<Option<NodeSnapshot>> = (0..tree.len()).map(|_| None).collect();
    for current in order.into_iter().rev() {
        let node = tree.node(current);
        let children = tree
            .children(current)
            .iter()
            .filter_map(|child| done[child.index()].take())
            .collect();
        done[current.index()] = Some(NodeSnapshot {
            kind: node.node_type(),
            indent: node.indent_level(),
            start: node.start(),
            node_end: node.node_end(),
            tree_end: tree.tree_end(current),
            key: node.key().map(str::to_string),
            text: tree.node_text(current, doc).to_string(),
            children,
        });
    }
    done[id.index()]
        .take()
        .unwrap_or_else(|| unreachable!("snapshot of {:?} was not built", id))
}

/// Levels below `id` in its deepest branch (`0` for a leaf).
pub fn nesting_depth(tree: &StructureTree, id: NodeId) -> usize {
    let mut deepest = 0;
    let mut stack = vec![(id, 0usize)];
    while let Some((current, depth)) = stack.pop() {
        deepest = deepest.max(depth);
        stack.extend(tree.children(current).iter().map(|child| (*child, depth + 1)));
    }
    deepest
}

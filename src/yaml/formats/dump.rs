//! Indented dump
//!
//! One node per line, children indented two spaces deeper than their parent:
//!
//!     ROOT(-1):
//!       KEY(0): hello:
//!         KEY(2): world:
//!           RAW(4): message
//!
//! Each line is `KIND(indent): text`, where `indent` is `-1` when undefined and `text` is the
//! node's own text. Empty text drops the space after the colon.

use crate::yaml::ast::{NodeId, StructureTree};
use crate::yaml::document::Document;

/// Dump the whole tree.
pub fn dump<D: Document + ?Sized>(tree: &StructureTree, doc: &D) -> String {
    dump_node(tree, tree.root(), doc)
}

/// Dump the subtree rooted at `id`, with `id` at depth zero.
pub fn dump_node<D: Document + ?Sized>(tree: &StructureTree, id: NodeId, doc: &D) -> String {
    let mut out = String::new();
    let mut stack = vec![(id, 0usize)];
    while let Some((current, depth)) = stack.pop() {
        let node = tree.node(current);
        let text = tree.node_text(current, doc);
        out.push_str(&"  ".repeat(depth));
        out.push_str(&format!("{}({}):", node.node_type(), node.indent_level()));
        if !text.is_empty() {
            out.push(' ');
            out.push_str(text);
        }
        out.push('\n');
        stack.extend(
            tree.children(current)
                .iter()
                .rev()
                .map(|child| (*child, depth + 1)),
        );
    }
    out
}

//! Testing utilities for structure trees
//!
//!     Asserting on a tree by hand means indexing into children, unwrapping ids and repeating
//!     the document everywhere. [`assert_tree`] wraps a parsed tree and its document in a
//!     fluent builder instead:
//!
//!         let doc = TextDocument::new("a:\n  b: 1\n");
//!         assert_tree(&doc)
//!             .child_count(1)
//!             .child(0, |a| {
//!                 a.is_key("a").indent(0).child(0, |b| {
//!                     b.is_key("b").text("b: 1");
//!                 });
//!             });
//!
//!     Every failure message carries the path of child positions that led to the node (for
//!     example `root[0][1]`) and the dump of the whole tree.

use crate::yaml::ast::{NodeId, NodeType, StructureTree};
use crate::yaml::building::parse;
use crate::yaml::document::Document;
use crate::yaml::formats::dump;
use std::rc::Rc;

/// Parse `doc` and start asserting at its root.
pub fn assert_tree<D: Document + ?Sized>(doc: &D) -> NodeAssertion<'_, D> {
    let tree = parse(doc);
    let dumped = dump(&tree, doc);
    NodeAssertion {
        context: Rc::new(TreeContext { tree, doc, dumped }),
        id: None,
        location: "root".to_string(),
    }
}

/// The node reached by following child positions from the root.
///
/// # Panics
///
/// If any position is out of range.
pub fn node_at_path(tree: &StructureTree, positions: &[usize]) -> NodeId {
    positions.iter().fold(tree.root(), |current, position| {
        let children = tree.children(current);
        assert!(
            *position < children.len(),
            "child {} out of bounds (node has {} children)",
            position,
            children.len()
        );
        children[*position]
    })
}

struct TreeContext<'a, D: ?Sized> {
    tree: StructureTree,
    doc: &'a D,
    dumped: String,
}

/// Assertions on one node. Methods consume and return `self` so they chain.
pub struct NodeAssertion<'a, D: ?Sized> {
    context: Rc<TreeContext<'a, D>>,
    id: Option<NodeId>,
    location: String,
}

impl<'a, D: Document + ?Sized> NodeAssertion<'a, D> {
    fn id(&self) -> NodeId {
        self.id.unwrap_or_else(|| self.context.tree.root())
    }

    fn fail(&self, message: String) -> ! {
        panic!("{} at {}\ntree:\n{}", message, self.location, self.context.dumped)
    }

    /// The tree under test, for assertions the builder does not cover.
    pub fn tree(&self) -> &StructureTree {
        &self.context.tree
    }

    pub fn node_id(&self) -> NodeId {
        self.id()
    }

    pub fn node_type(self, expected: NodeType) -> Self {
        let actual = self.context.tree.node(self.id()).node_type();
        if actual != expected {
            self.fail(format!("expected {} node, found {}", expected, actual));
        }
        self
    }

    /// A `Key` node with the given key text.
    pub fn is_key(self, expected: &str) -> Self {
        let this = self.node_type(NodeType::Key);
        let actual = this.context.tree.node(this.id()).key();
        if actual != Some(expected) {
            this.fail(format!("expected key {:?}, found {:?}", expected, actual));
        }
        this
    }

    pub fn is_seq(self) -> Self {
        self.node_type(NodeType::Seq)
    }

    pub fn is_raw(self) -> Self {
        self.node_type(NodeType::Raw)
    }

    /// The indentation as a number, `-1` for undefined.
    pub fn indent(self, expected: isize) -> Self {
        let actual = self.context.tree.node(self.id()).indent_level();
        if actual != expected {
            self.fail(format!("expected indent {}, found {}", expected, actual));
        }
        self
    }

    /// The node's own text.
    pub fn text(self, expected: &str) -> Self {
        let actual = self.context.tree.node_text(self.id(), self.context.doc);
        if actual != expected {
            self.fail(format!("expected text {:?}, found {:?}", expected, actual));
        }
        self
    }

    pub fn start(self, expected: usize) -> Self {
        let actual = self.context.tree.node(self.id()).start();
        if actual != expected {
            self.fail(format!("expected start {}, found {}", expected, actual));
        }
        self
    }

    pub fn tree_end(self, expected: usize) -> Self {
        let actual = self.context.tree.tree_end(self.id());
        if actual != expected {
            self.fail(format!("expected tree end {}, found {}", expected, actual));
        }
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        let actual = self.context.tree.children(self.id()).len();
        if actual != expected {
            self.fail(format!("expected {} children, found {}", expected, actual));
        }
        self
    }

    /// Run `assertion` on the child at `index`.
    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a, D>),
    {
        let children = self.context.tree.children(self.id());
        if index >= children.len() {
            self.fail(format!(
                "child {} out of bounds (node has {} children)",
                index,
                children.len()
            ));
        }
        assertion(NodeAssertion {
            context: self.context.clone(),
            id: Some(children[index]),
            location: format!("{}[{}]", self.location, index),
        });
        self
    }
}

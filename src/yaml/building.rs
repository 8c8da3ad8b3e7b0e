//! Tree building
//!
//!     A single forward pass over the document's lines. The builder keeps a cursor on the
//!     node the previous line opened and, for each new line, decides where in the tree it
//!     goes by comparing indentation:
//!
//!         1. A line with undefined indentation (blank or comment) becomes a raw child of the
//!            cursor. The cursor does not move, so the next real line is placed as if the
//!            blank line were not there.
//!         2. Otherwise the cursor climbs to the nearest ancestor whose indentation is not
//!            greater than the line's. The root's indentation is below every real one, so
//!            the climb always stops.
//!         3. The line is classified and placed under the cursor:
//!
//!             - a simple key first climbs past any node at the same indentation (a sibling
//!               key or a sequence item) and then opens a `Key` node;
//!             - a sequence item climbs past sibling `Seq` nodes at the same indentation only,
//!               so `- item` directly under `key:` at the same column becomes a child of the
//!               key, then opens a `Seq` node and re-reads the rest of the line two columns
//!               further right, where a nested key or item may start;
//!             - anything else is a raw child of the cursor and the cursor stays.
//!
//!     The new `Key` or `Seq` node becomes the cursor.
//!
//!     Parsing never fails: any text yields a tree.

use crate::yaml::ast::{NodeId, NodeKind, StructureTree};
use crate::yaml::document::Document;
use crate::yaml::lexing::{classify_line, Line, LineKind, LineReader, SEQ_MARKER_WIDTH};
use tracing::{debug, trace};

/// Parse the structure of `doc`.
pub fn parse<D: Document + ?Sized>(doc: &D) -> StructureTree {
    let tree = TreeBuilder::new(doc).build();
    debug!(
        lines = doc.line_count(),
        nodes = tree.len(),
        "parsed yaml structure"
    );
    tree
}

struct TreeBuilder<'d, D: ?Sized> {
    doc: &'d D,
    tree: StructureTree,
    cursor: NodeId,
}

impl<'d, D: Document + ?Sized> TreeBuilder<'d, D> {
    fn new(doc: &'d D) -> Self {
        let tree = StructureTree::new();
        let cursor = tree.root();
        Self { doc, tree, cursor }
    }

    fn build(mut self) -> StructureTree {
        for line in LineReader::new(self.doc) {
            self.consume(line);
        }
        self.tree
    }

    fn consume(&mut self, line: Line) {
        match line.indent {
            None => {
                trace!(start = line.start, "blank line");
                self.push_raw(line);
            }
            Some(indent) => {
                self.drop_to(indent);
                self.parse_line(line);
            }
        }
    }

    /// Move the cursor up while its indentation is greater than `indent`.
    fn drop_to(&mut self, indent: usize) {
        while self.cursor_indent_exceeds(indent) {
            self.climb();
        }
    }

    fn parse_line(&mut self, mut line: Line) {
        let mut nested = false;
        loop {
            let Some(indent) = line.indent else {
                return;
            };
            let text = line.text_without_indent(self.doc);
            match classify_line(text) {
                LineKind::SimpleKey => {
                    while self.cursor_indent_is(indent) && !self.tree.node(self.cursor).is_root() {
                        self.climb();
                    }
                    self.push_key(line, text);
                    return;
                }
                LineKind::SeqItem => {
                    while self.cursor_indent_is(indent) && self.tree.node(self.cursor).is_seq() {
                        self.climb();
                    }
                    self.push_seq(line);
                    line = line.with_indent_moved(SEQ_MARKER_WIDTH);
                    nested = true;
                }
                LineKind::Unclassified => {
                    // The tail of a sequence item is part of the item
                    if !nested {
                        self.push_raw(line);
                    }
                    return;
                }
            }
        }
    }

    fn push_key(&mut self, line: Line, text: &str) {
        let Some(colon) = text.find(':') else {
            unreachable!("simple key line without separator: {:?}", text);
        };
        let start = line.content_start();
        let key = text[..colon].to_string();
        trace!(start, key = %key, "key");
        self.cursor = self.tree.push(
            self.cursor,
            NodeKind::Key {
                key,
                separator: start + colon,
            },
            line.indent,
            start,
            line.end,
        );
    }

    fn push_seq(&mut self, line: Line) {
        let start = line.content_start();
        trace!(start, "sequence item");
        self.cursor = self
            .tree
            .push(self.cursor, NodeKind::Seq, line.indent, start, line.end);
    }

    fn push_raw(&mut self, line: Line) {
        self.tree.push(
            self.cursor,
            NodeKind::Raw,
            line.indent,
            line.content_start(),
            line.end,
        );
    }

    fn climb(&mut self) {
        if let Some(parent) = self.tree.parent(self.cursor) {
            self.cursor = parent;
        }
    }

    fn cursor_indent_exceeds(&self, indent: usize) -> bool {
        self.tree
            .node(self.cursor)
            .indent()
            .is_some_and(|current| current > indent)
    }

    fn cursor_indent_is(&self, indent: usize) -> bool {
        self.tree.node(self.cursor).indent() == Some(indent)
    }
}

//! Line reader
//!
//! Forward-only iteration over the lines of a [`Document`]. Each [`Line`] carries its byte
//! bounds and indentation:
//!
//!     line = "    hello"
//!             ^   ^    ^
//!             |   |    end
//!             |   indent
//!             start

use crate::yaml::document::Document;

/// One physical line of the document, or the tail of one (see [`Line::with_indent_moved`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    /// Offset of the first character of the line
    pub start: usize,
    /// Offset just past the last character, excluding the terminator
    pub end: usize,
    /// Indentation width, `None` for blank and comment lines
    pub indent: Option<usize>,
}

impl Line {
    /// Read line number `line` of `doc`, or `None` past the last line.
    pub fn at_line_number<D: Document + ?Sized>(doc: &D, line: usize) -> Option<Line> {
        let start = doc.line_start(line)?;
        let end = doc.line_end(line)?;
        Some(Line {
            start,
            end,
            indent: doc.indentation_of(line),
        })
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Offset where the line's content begins: after the indentation, or the line start when
    /// the indentation is undefined.
    pub fn content_start(&self) -> usize {
        self.start + self.indent.unwrap_or(0)
    }

    pub fn text<'d, D: Document + ?Sized>(&self, doc: &'d D) -> &'d str {
        doc.text_between(self.start, self.end)
    }

    pub fn text_without_indent<'d, D: Document + ?Sized>(&self, doc: &'d D) -> &'d str {
        doc.text_between(self.content_start(), self.end)
    }

    /// The same line with its indentation mark pushed `by` columns to the right, clamped to the
    /// line length. Used to re-read the text after a `- ` marker as if it were its own line.
    pub fn with_indent_moved(&self, by: usize) -> Line {
        let indent = (self.indent.unwrap_or(0) + by).min(self.len());
        Line {
            indent: Some(indent),
            ..*self
        }
    }
}

/// Sequential reader over a document's lines.
pub struct LineReader<'d, D: ?Sized> {
    doc: &'d D,
    next_line: usize,
}

impl<'d, D: Document + ?Sized> LineReader<'d, D> {
    pub fn new(doc: &'d D) -> Self {
        Self { doc, next_line: 0 }
    }

    pub fn document(&self) -> &'d D {
        self.doc
    }
}

impl<D: Document + ?Sized> Iterator for LineReader<'_, D> {
    type Item = Line;

    fn next(&mut self) -> Option<Line> {
        if self.next_line >= self.doc.line_count() {
            return None;
        }
        let line = Line::at_line_number(self.doc, self.next_line);
        self.next_line += 1;
        line
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.doc.line_count().saturating_sub(self.next_line);
        (remaining, Some(remaining))
    }
}

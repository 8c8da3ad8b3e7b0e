//! Document adapter
//!
//!     The structure parser never reads a host text buffer directly. Everything it needs to
//!     know about the source goes through the [`Document`] trait: line boundaries, the
//!     indentation of a line, and substring extraction. This is the one seam where an editor
//!     integration plugs in its own text representation.
//!
//!     [`TextDocument`] is the in-memory implementation over an owned `String`. It precomputes
//!     the start offset of every line so that line lookups are O(1) and offset-to-line lookups
//!     are a binary search.
//!
//!     [`StructuredDocument`] wraps a [`TextDocument`] and caches its parsed structure. Edits
//!     go through [`StructuredDocument::replace_range`], which drops the cached tree; the next
//!     request re-parses the whole text.
//!
//! Lines and indentation
//!
//!     The empty string has no lines. Any other text has one line more than it has `\n`
//!     characters, so a trailing newline yields a final empty line. Line ends exclude the
//!     terminator (`\n` or `\r\n`).
//!
//!     Indentation counts leading spaces and tabs, one unit each. A line with no content after
//!     its indentation has an undefined indentation (`None`), and so does a comment line when
//!     [`DocumentConfig::comments_as_blank`] is set.
//!
//!     All offsets are byte offsets into the text.

use crate::yaml::ast::StructureTree;
use crate::yaml::building::parse;
use crate::yaml::config::DocumentConfig;
use crate::yaml::error::EditError;
use once_cell::unsync::OnceCell;
use std::ops::Range as ByteRange;

/// Read-only view of source text, addressed by line index and byte offset.
pub trait Document {
    /// Number of lines in the document (zero for empty text).
    fn line_count(&self) -> usize;

    /// Offset of the first character of `line`.
    fn line_start(&self, line: usize) -> Option<usize>;

    /// Offset just past the last character of `line`, excluding the line terminator.
    fn line_end(&self, line: usize) -> Option<usize>;

    /// Leading indentation width of `line`, or `None` when the line has no real content.
    fn indentation_of(&self, line: usize) -> Option<usize>;

    /// Text between two offsets. Out-of-range or misaligned requests yield `""`.
    fn text_between(&self, start: usize, end: usize) -> &str;

    /// Index of the line containing `offset`. Offsets past the end map to the last line.
    fn line_index_of(&self, offset: usize) -> usize;

    /// Total length of the text.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A [`Document`] over an owned string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDocument {
    text: String,
    line_starts: Vec<usize>,
    config: DocumentConfig,
}

impl TextDocument {
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_config(text, DocumentConfig::default())
    }

    pub fn with_config(text: impl Into<String>, config: DocumentConfig) -> Self {
        let text = text.into();
        let line_starts = compute_line_starts(&text);
        Self {
            text,
            line_starts,
            config,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn config(&self) -> DocumentConfig {
        self.config
    }

    /// Replace the text in `range` with `replacement`, recomputing line starts.
    pub fn replace_range(
        &mut self,
        range: ByteRange<usize>,
        replacement: &str,
    ) -> Result<(), EditError> {
        if range.start > range.end || range.end > self.text.len() {
            return Err(EditError::OutOfBounds {
                range,
                len: self.text.len(),
            });
        }
        for offset in [range.start, range.end] {
            if !self.text.is_char_boundary(offset) {
                return Err(EditError::NotCharBoundary { offset });
            }
        }
        self.text.replace_range(range, replacement);
        self.line_starts = compute_line_starts(&self.text);
        Ok(())
    }

    fn line_text(&self, line: usize) -> Option<&str> {
        let start = self.line_start(line)?;
        let end = self.line_end(line)?;
        self.text.get(start..end)
    }
}

impl Document for TextDocument {
    fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    fn line_end(&self, line: usize) -> Option<usize> {
        self.line_start(line)?;
        match self.line_starts.get(line + 1) {
            Some(next) => {
                // `next - 1` is the '\n'
                let newline = next - 1;
                if newline > 0 && self.text.as_bytes()[newline - 1] == b'\r' {
                    Some(newline - 1)
                } else {
                    Some(newline)
                }
            }
            None => Some(self.text.len()),
        }
    }

    fn indentation_of(&self, line: usize) -> Option<usize> {
        let text = self.line_text(line)?;
        let indent = text
            .bytes()
            .take_while(|b| matches!(b, b' ' | b'\t'))
            .count();
        let content = &text[indent..];
        if content.is_empty() {
            return None;
        }
        if self.config.comments_as_blank && content.starts_with('#') {
            return None;
        }
        Some(indent)
    }

    fn text_between(&self, start: usize, end: usize) -> &str {
        self.text.get(start..end).unwrap_or("")
    }

    fn line_index_of(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(insert_at) => insert_at.saturating_sub(1),
        }
    }

    fn len(&self) -> usize {
        self.text.len()
    }
}

fn compute_line_starts(text: &str) -> Vec<usize> {
    if text.is_empty() {
        return Vec::new();
    }
    let mut starts = vec![0];
    starts.extend(text.match_indices('\n').map(|(at, _)| at + 1));
    starts
}

/// A text document together with its lazily computed structure.
///
/// The tree is built on first access and kept until the next edit.
#[derive(Debug, Clone)]
pub struct StructuredDocument {
    document: TextDocument,
    structure: OnceCell<StructureTree>,
}

impl StructuredDocument {
    pub fn new(text: impl Into<String>) -> Self {
        Self::from_document(TextDocument::new(text))
    }

    pub fn with_config(text: impl Into<String>, config: DocumentConfig) -> Self {
        Self::from_document(TextDocument::with_config(text, config))
    }

    pub fn from_document(document: TextDocument) -> Self {
        Self {
            document,
            structure: OnceCell::new(),
        }
    }

    pub fn document(&self) -> &TextDocument {
        &self.document
    }

    pub fn text(&self) -> &str {
        self.document.text()
    }

    /// The parsed structure of the current text, parsing it if needed.
    pub fn structure(&self) -> &StructureTree {
        self.structure.get_or_init(|| parse(&self.document))
    }

    /// Whether the current text has already been parsed.
    pub fn is_parsed(&self) -> bool {
        self.structure.get().is_some()
    }

    /// Edit the text. The cached structure is discarded only when the edit succeeds.
    pub fn replace_range(
        &mut self,
        range: ByteRange<usize>,
        replacement: &str,
    ) -> Result<(), EditError> {
        self.document.replace_range(range, replacement)?;
        self.structure.take();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_has_no_lines() {
        let doc = TextDocument::new("");
        assert_eq!(doc.line_count(), 0);
        assert_eq!(doc.line_start(0), None);
        assert_eq!(doc.line_index_of(0), 0);
    }

    #[test]
    fn test_trailing_newline_yields_empty_last_line() {
        let doc = TextDocument::new("a: 1\nb: 2\n");
        assert_eq!(doc.line_count(), 3);
        assert_eq!(doc.line_start(2), Some(10));
        assert_eq!(doc.line_end(2), Some(10));
        assert_eq!(doc.indentation_of(2), None);
    }

    #[test]
    fn test_line_bounds_exclude_terminators() {
        let doc = TextDocument::new("ab\r\ncd\nef");
        assert_eq!(doc.line_start(0), Some(0));
        assert_eq!(doc.line_end(0), Some(2));
        assert_eq!(doc.line_start(1), Some(4));
        assert_eq!(doc.line_end(1), Some(6));
        assert_eq!(doc.line_start(2), Some(7));
        assert_eq!(doc.line_end(2), Some(9));
        assert_eq!(doc.line_end(3), None);
    }

    #[test]
    fn test_indentation() {
        let doc = TextDocument::new("top:\n  nested: x\n    \n\t- tab\n  # comment\n");
        assert_eq!(doc.indentation_of(0), Some(0));
        assert_eq!(doc.indentation_of(1), Some(2));
        assert_eq!(doc.indentation_of(2), None);
        assert_eq!(doc.indentation_of(3), Some(1));
        assert_eq!(doc.indentation_of(4), None);
    }

    #[test]
    fn test_comments_can_keep_their_indentation() {
        let doc = TextDocument::with_config(
            "  # comment",
            DocumentConfig {
                comments_as_blank: false,
            },
        );
        assert_eq!(doc.indentation_of(0), Some(2));
    }

    #[test]
    fn test_line_index_of() {
        let doc = TextDocument::new("a\nbc\n\nd");
        assert_eq!(doc.line_index_of(0), 0);
        assert_eq!(doc.line_index_of(1), 0);
        assert_eq!(doc.line_index_of(2), 1);
        assert_eq!(doc.line_index_of(4), 1);
        assert_eq!(doc.line_index_of(5), 2);
        assert_eq!(doc.line_index_of(6), 3);
        assert_eq!(doc.line_index_of(100), 3);
    }

    #[test]
    fn test_text_between_is_total() {
        let doc = TextDocument::new("héllo");
        assert_eq!(doc.text_between(0, 1), "h");
        assert_eq!(doc.text_between(0, 2), "");
        assert_eq!(doc.text_between(3, 100), "");
    }

    #[test]
    fn test_replace_range_recomputes_lines() {
        let mut doc = TextDocument::new("a: 1\n");
        doc.replace_range(4..4, "\nb: 2").expect("valid edit");
        assert_eq!(doc.text(), "a: 1\nb: 2\n");
        assert_eq!(doc.line_count(), 3);
    }

    #[test]
    fn test_replace_range_rejects_bad_ranges() {
        let mut doc = TextDocument::new("héllo");
        assert_eq!(
            doc.replace_range(2..3, "e"),
            Err(EditError::NotCharBoundary { offset: 2 })
        );
        assert!(matches!(
            doc.replace_range(0..10, ""),
            Err(EditError::OutOfBounds { .. })
        ));
        assert_eq!(doc.text(), "héllo");
    }

    #[test]
    fn test_structured_document_caches_until_edit() {
        let mut doc = StructuredDocument::new("a:\n  b: 1\n");
        assert!(!doc.is_parsed());
        let root = doc.structure().root();
        assert!(doc.is_parsed());
        assert_eq!(doc.structure().children(root).len(), 1);

        doc.replace_range(10..10, "c: 2\n").expect("valid edit");
        assert!(!doc.is_parsed());
        let tree = doc.structure();
        assert_eq!(tree.children(tree.root()).len(), 2);
    }

    #[test]
    fn test_failed_edit_keeps_cached_structure() {
        let mut doc = StructuredDocument::new("a: 1");
        doc.structure();
        assert!(doc.replace_range(5..6, "x").is_err());
        assert!(doc.is_parsed());
    }
}

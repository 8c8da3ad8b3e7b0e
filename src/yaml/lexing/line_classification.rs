//! Line Classification
//!
//!     Decides what a single line opens, looking only at its text with the indentation
//!     stripped. There are three outcomes:
//!
//!         - SimpleKey: an ASCII word character (`[A-Za-z0-9_]`), then ASCII word characters
//!           or hyphens, then `:` and anything at all (`server-port: 8080`, `logging:`)
//!         - SeqItem: a `-` followed by a space or by the end of the line (`- a`, `-`)
//!         - Unclassified: everything else (scalars, continuation text, flow syntax, junk)
//!
//!     The key pattern is checked first. A leading `-` is not a word character, so a line
//!     cannot match both patterns.
//!
//!     The key pattern is narrower than real yaml (no spaces, quotes or other punctuation in
//!     keys). That is enough for property-style configuration files, which is what this
//!     parser is for. Keys spelled with non-ASCII letters (`café: 1`) are not keys here and
//!     end up as raw lines.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Matches a line starting with a simple key and its `:` separator.
pub static SIMPLE_KEY_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_-]*:").unwrap());

/// Matches a line starting with a sequence item marker.
pub static SEQ_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-( |$)").unwrap());

/// Width of the `- ` marker that opens a sequence item.
pub const SEQ_MARKER_WIDTH: usize = 2;

/// What a line opens, by pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineKind {
    SimpleKey,
    SeqItem,
    Unclassified,
}

/// Classify a line's text (indentation already stripped).
pub fn classify_line(text: &str) -> LineKind {
    if SIMPLE_KEY_LINE.is_match(text) {
        LineKind::SimpleKey
    } else if SEQ_LINE.is_match(text) {
        LineKind::SeqItem
    } else {
        LineKind::Unclassified
    }
}

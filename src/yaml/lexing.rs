//! Lexing: from document lines to classified lines
//!
//!     Lexing here is deliberately shallow. The [`line_reader`] walks the document one line at
//!     a time, yielding offsets and indentation, and [`line_classification`] looks at a single
//!     line's un-indented text to decide whether it opens a key, a sequence item, or is just raw
//!     text. No tokens smaller than a line are produced; the builder needs nothing more.

pub mod line_classification;
pub mod line_reader;

pub use line_classification::{classify_line, LineKind, SEQ_MARKER_WIDTH};
pub use line_reader::{Line, LineReader};

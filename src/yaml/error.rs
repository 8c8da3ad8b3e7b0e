//! Error types for the recoverable edges of the crate
//!
//! Parsing itself never fails, so there is no parse error here. Errors only come from
//! caller-supplied strings (paths, format names) and from editing a document with a bad
//! range. Internal invariant violations are panics, not errors.

use std::fmt;
use std::ops::Range as ByteRange;

/// Errors that can occur while parsing a [`StructurePath`](crate::yaml::ast::StructurePath)
/// from its string form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathParseError {
    /// A key segment with no characters, e.g. `a..b` or a trailing `.`
    EmptyKey { position: usize },
    /// A `[` without its closing `]`
    UnterminatedIndex { position: usize },
    /// The text between brackets is not a non-negative integer
    InvalidIndex { text: String, position: usize },
    /// Something other than `.` or `[` follows an index segment
    UnexpectedCharacter { character: char, position: usize },
}

impl fmt::Display for PathParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathParseError::EmptyKey { position } => {
                write!(f, "Empty key in path at position {}", position)
            }
            PathParseError::UnterminatedIndex { position } => {
                write!(f, "Unterminated index starting at position {}", position)
            }
            PathParseError::InvalidIndex { text, position } => {
                write!(f, "Invalid index '{}' at position {}", text, position)
            }
            PathParseError::UnexpectedCharacter {
                character,
                position,
            } => write!(
                f,
                "Unexpected character '{}' at position {}",
                character, position
            ),
        }
    }
}

impl std::error::Error for PathParseError {}

/// Errors that can occur while serializing a tree to an output format
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The requested format name is not known
    UnknownFormat(String),
    /// The serializer backing the format failed
    Serialization { format: String, message: String },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::UnknownFormat(name) => {
                write!(f, "Unknown format '{}' (expected dump, json or yaml)", name)
            }
            FormatError::Serialization { format, message } => {
                write!(f, "Failed to serialize as {}: {}", format, message)
            }
        }
    }
}

impl std::error::Error for FormatError {}

/// Errors that can occur when editing a document's text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// The range reaches past the end of the text or is reversed
    OutOfBounds { range: ByteRange<usize>, len: usize },
    /// One of the range ends falls inside a multi-byte character
    NotCharBoundary { offset: usize },
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditError::OutOfBounds { range, len } => write!(
                f,
                "Edit range {}..{} is out of bounds for text of length {}",
                range.start, range.end, len
            ),
            EditError::NotCharBoundary { offset } => {
                write!(f, "Offset {} is not on a character boundary", offset)
            }
        }
    }
}

impl std::error::Error for EditError {}

//! Main module for yaml structure functionality
//!
//! The pipeline is: source text → [`document`] (line offsets and indentation) →
//! [`lexing`] (line reader and classifier) → [`building`] (tree assembly) → [`ast`]
//! (queries over the immutable result).

pub mod ast;
pub mod building;
pub mod config;
pub mod document;
pub mod error;
pub mod formats;
pub mod lexing;
pub mod testing;

pub use ast::{NodeId, NodeKind, NodeType, PathSegment, StructurePath, StructureTree};
pub use building::parse;
pub use document::{Document, StructuredDocument, TextDocument};

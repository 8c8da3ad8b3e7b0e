//! # yaml-structure
//!
//! A robust, coarse-grained parser that guesses the structure of block-style yaml from
//! indentation alone.
//!
//! This is not a yaml parser. It is meant to run continuously while a document is being
//! edited, so it never fails: anything it cannot recognize as a `simple-key:` line or a
//! `- ` sequence item is kept as raw text and attached to the closest sensible ancestor.
//! Tooling (completion, outline, navigation) then queries the resulting tree by offset or
//! by path.
//!
//! File Layout
//!
//! src/yaml
//!   ├── document     Host text adapter and the cached, editable document
//!   ├── lexing       Line reader and line classification
//!   ├── building     The indentation state machine that assembles the tree
//!   ├── ast          Arena tree, paths, queries and snapshots
//!   ├── formats      Dump / json / yaml serializers
//!   ├── config       Layered configuration (defaults + user files)
//!   └── testing      Helpers shared by unit and integration tests
//!
//! The short version:
//!
//!     let doc = TextDocument::new("server:\n  port: 8080\n");
//!     let tree = parse(&doc);
//!     let port = tree.traverse(tree.root(), &"server.port".parse()?);

pub mod yaml;

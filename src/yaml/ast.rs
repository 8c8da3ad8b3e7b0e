//! Structure tree
//!
//!     The parsed structure is an arena: every node lives in one `Vec`, addressed by a
//!     [`NodeId`]. Parent and child links are plain ids, so the tree can carry both directions
//!     without shared ownership, and the whole thing is an ordinary owned value that can be
//!     cloned, compared, and sent across threads once built.
//!
//!     Nodes come in four kinds (see [`NodeKind`]): the single `Root`, `Key` for a
//!     `simple-key:` line, `Seq` for a `- ` item, and `Raw` for a line that is neither. Raw
//!     nodes are always leaves.
//!
//!     Node offsets never point back into a live document; reading a node's text requires
//!     passing the [`Document`](crate::yaml::document::Document) it was parsed from.
//!
//!     Nodes are compared across re-parses by [`StructurePath`], not by id.

pub mod node;
pub mod path;
pub mod snapshot;
pub mod tree;

pub use node::{Node, NodeId, NodeKind, NodeType};
pub use path::{PathSegment, StructurePath};
pub use snapshot::{nesting_depth, snapshot_node, snapshot_tree, NodeSnapshot};
pub use tree::StructureTree;

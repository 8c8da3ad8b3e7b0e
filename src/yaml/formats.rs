//! Output formats for structure trees
//!
//!     - dump: the indented one-node-per-line debug view (see [`dump`])
//!     - json: a [`NodeSnapshot`] serialized with `serde_json`, pretty printed
//!     - yaml: the same snapshot serialized with `serde_yaml`

pub mod dump;

pub use dump::{dump, dump_node};

use crate::yaml::ast::{nesting_depth, snapshot_tree, NodeSnapshot, StructureTree};
use crate::yaml::document::Document;
use crate::yaml::error::FormatError;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// A named output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Dump,
    Json,
    Yaml,
}

impl Format {
    pub const ALL: [Format; 3] = [Format::Dump, Format::Json, Format::Yaml];

    pub fn name(self) -> &'static str {
        match self {
            Format::Dump => "dump",
            Format::Json => "json",
            Format::Yaml => "yaml",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::ALL
            .into_iter()
            .find(|format| format.name() == s)
            .ok_or_else(|| FormatError::UnknownFormat(s.to_string()))
    }
}

/// Deepest tree the json and yaml formats will render. Their serializers recurse once per
/// level, and a single line of repeated `- ` markers already nests one level per marker.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Render `tree` (parsed from `doc`) in the given format.
pub fn serialize<D: Document + ?Sized>(
    tree: &StructureTree,
    doc: &D,
    format: Format,
) -> Result<String, FormatError> {
    let failed = |message: String| FormatError::Serialization {
        format: format.to_string(),
        message,
    };
    match format {
        Format::Dump => Ok(dump(tree, doc)),
        Format::Json => serde_json::to_string_pretty(&checked_snapshot(tree, doc, format)?)
            .map_err(|err| failed(err.to_string())),
        Format::Yaml => serde_yaml::to_string(&checked_snapshot(tree, doc, format)?)
            .map_err(|err| failed(err.to_string())),
    }
}

fn checked_snapshot<D: Document + ?Sized>(
    tree: &StructureTree,
    doc: &D,
    format: Format,
) -> Result<NodeSnapshot, FormatError> {
    let depth = nesting_depth(tree, tree.root());
    if depth > MAX_NESTING_DEPTH {
        return Err(FormatError::Serialization {
            format: format.to_string(),
            message: format!(
                "tree nests {} levels deep, the limit is {}",
                depth, MAX_NESTING_DEPTH
            ),
        });
    }
    Ok(snapshot_tree(tree, doc))
}

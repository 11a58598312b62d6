// CLASSIFICATION: COMMUNITY
// Filename: lib.rs v0.1
// Date Modified: 2026-10-19
// Author: Lukas Bower
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! In-memory VSS signal tree with dotted-path wildcard search.
//!
//! A tree is loaded once from its native pre-order byte format and is
//! read-only afterwards. Queries resolve dotted paths such as
//! `Vehicle.Cabin.*` to node handles plus concrete resolved paths.

/// Loader configuration.
pub mod config;
/// Error types.
pub mod error;
/// JSON exports.
pub mod export;
/// Node handles and accessor views.
pub mod handle;
/// Path search.
pub mod search;
/// Arena tree, builder and file I/O.
pub mod tree;

use std::path::Path;

pub use config::TreeConfig;
pub use error::{QueryError, TreeError};
pub use handle::{NodeHandle, NodeView, ResourceView};
pub use search::{search, simple_search, SearchMatch, SearchResults, DEFAULT_MAX_FOUND};
pub use tree::{NodeSpec, Tree, TreeBuilder, TreeStats, DEFAULT_MAX_DEPTH};
pub use vss_codec::{
    CodecError, Datatype, ElementRef, EnumElement, MediaCollection, MediaItem, NodeType,
    ObjectType, PropertyDefinition, UniqueObject, Variant,
};

/// Load a tree file with the default depth limit.
pub fn load_tree(path: impl AsRef<Path>) -> Result<Tree, TreeError> {
    tree::read_tree_file(path, DEFAULT_MAX_DEPTH)
}

/// Write the subtree rooted at `root` to `path`.
pub fn save_tree(path: impl AsRef<Path>, tree: &Tree, root: NodeHandle) -> Result<(), TreeError> {
    tree::write_tree_file(path, tree, root)
}

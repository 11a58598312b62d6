// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Error types surfaced by tree loading, saving, export and search.
// Author: Lukas Bower

//! Error types for the signal tree crate.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use vss_codec::CodecError;

use crate::handle::NodeHandle;

/// Errors raised while loading, saving or exporting a tree.
#[derive(Debug, Error)]
pub enum TreeError {
    /// The tree file could not be opened, read or written.
    #[error("failed to access tree file {}: {source}", .path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The byte stream does not hold a valid tree.
    #[error("failed to decode tree: {0}")]
    Decode(#[from] CodecError),
    /// A node handed to the builder violates a tree invariant.
    #[error("invalid node '{name}': {reason}")]
    InvalidNode {
        /// Offending node name.
        name: String,
        /// Violated constraint.
        reason: String,
    },
    /// Configuration text could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
    /// A search issued on behalf of an export failed.
    #[error(transparent)]
    Query(#[from] QueryError),
    /// JSON rendering failed.
    #[error("failed to render json: {0}")]
    Export(#[from] serde_json::Error),
}

impl TreeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_node(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidNode {
            name: name.to_owned(),
            reason: reason.into(),
        }
    }
}

/// Caller errors rejected before a search runs.
///
/// Running out of result capacity is not an error; see
/// [`SearchResults::is_exhausted`](crate::search::SearchResults::is_exhausted).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    /// The search path was empty.
    #[error("empty search path")]
    EmptyPath,
    /// The root handle does not belong to the tree.
    #[error("unknown node handle {0:?}")]
    UnknownHandle(NodeHandle),
}

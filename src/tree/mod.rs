// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Arena-backed signal tree built once from a native tree file.
// Author: Lukas Bower

//! Arena-backed signal tree.
//!
//! Nodes live in a single `Vec` addressed by [`NodeHandle`]; children are
//! owned index lists and the parent is a plain back-index. A tree is
//! immutable once built, so any number of readers may share it.

mod builder;
mod io;

pub use builder::{NodeSpec, TreeBuilder};
pub use io::{decode_tree, encode_subtree, encode_tree, read_tree_file, write_tree_file};

use vss_codec::{NodeRecord, NodeType, Payload, RecordRef};

use crate::error::TreeError;
use crate::handle::{NodeHandle, NodeView};

/// Deepest nesting accepted when decoding or building a tree.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Immutable signal tree.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Node {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) node_type: NodeType,
    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,
    pub(crate) payload: Payload,
}

impl Node {
    pub(crate) fn from_record(
        record: NodeRecord,
        parent: Option<NodeHandle>,
        children: Vec<NodeHandle>,
    ) -> Self {
        Self {
            name: record.name,
            description: record.description,
            node_type: record.node_type,
            parent,
            children,
            payload: record.payload,
        }
    }

    pub(crate) fn record_ref(&self) -> RecordRef<'_> {
        RecordRef {
            node_type: self.node_type,
            name: &self.name,
            description: &self.description,
            child_count: self.children.len(),
            payload: &self.payload,
        }
    }

    fn same_fields(&self, other: &Node) -> bool {
        self.name == other.name
            && self.description == other.description
            && self.node_type == other.node_type
            && self.payload == other.payload
            && self.children.len() == other.children.len()
    }
}

/// Size and shape summary of a tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Total node count.
    pub nodes: usize,
    /// Non-branch nodes.
    pub leaves: usize,
    /// Deepest nesting level; the root is level 1.
    pub max_depth: usize,
}

impl Tree {
    pub(crate) fn from_nodes(nodes: Vec<Node>) -> Self {
        debug_assert!(!nodes.is_empty(), "tree must hold a root node");
        Self { nodes }
    }

    /// Handle of the root node.
    #[must_use]
    pub fn root(&self) -> NodeHandle {
        NodeHandle::ROOT
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check whether `handle` addresses a node of this tree.
    #[must_use]
    pub fn contains(&self, handle: NodeHandle) -> bool {
        handle.index() < self.nodes.len()
    }

    /// Accessor view for `handle`, or `None` if the handle is foreign.
    #[must_use]
    pub fn node(&self, handle: NodeHandle) -> Option<NodeView<'_>> {
        self.nodes
            .get(handle.index())
            .map(|node| NodeView::new(self, handle, node))
    }

    /// Full dotted path of `handle` from the tree root.
    #[must_use]
    pub fn path_of(&self, handle: NodeHandle) -> Option<String> {
        let mut names = Vec::new();
        let mut cursor = Some(handle);
        while let Some(current) = cursor {
            let node = self.nodes.get(current.index())?;
            names.push(node.name.as_str());
            cursor = node.parent;
        }
        names.reverse();
        Some(names.join("."))
    }

    /// Count nodes and leaves and measure the deepest nesting.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        let mut stack = vec![(self.root(), 1usize)];
        while let Some((handle, depth)) = stack.pop() {
            let node = self.get(handle);
            stats.nodes += 1;
            if !node.node_type.is_branch() {
                stats.leaves += 1;
            }
            stats.max_depth = stats.max_depth.max(depth);
            stack.extend(node.children.iter().map(|child| (*child, depth + 1)));
        }
        stats
    }

    /// Compare two trees node by node from their roots.
    ///
    /// Attributes and child order must match; arena layout may differ.
    #[must_use]
    pub fn structural_eq(&self, other: &Tree) -> bool {
        let mut pending = vec![(self.root(), other.root())];
        while let Some((left, right)) = pending.pop() {
            let (a, b) = (self.get(left), other.get(right));
            if !a.same_fields(b) {
                return false;
            }
            pending.extend(a.children.iter().copied().zip(b.children.iter().copied()));
        }
        true
    }

    /// Encode the whole tree into its native byte representation.
    pub fn encode(&self) -> Result<Vec<u8>, TreeError> {
        encode_tree(self)
    }

    /// Node behind a handle already validated against this tree.
    pub(crate) fn get(&self, handle: NodeHandle) -> &Node {
        &self.nodes[handle.index()]
    }
}

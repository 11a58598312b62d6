// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Depth-first reader and writer for native VSS tree files.
// Author: Lukas Bower

//! Pre-order tree reader and writer.
//!
//! The reader reserves each node's child list to the header's child count
//! before descending, then installs children in file order as they return.
//! The writer mirrors it record for record.

use std::fs;
use std::path::Path;

use log::{debug, info};
use vss_codec::{encode_record, CodecError, RecordIter, HEADER_LEN};

use super::{Node, Tree};
use crate::error::{QueryError, TreeError};
use crate::handle::NodeHandle;

/// Decode a complete tree from `bytes`.
///
/// No partial tree is returned on failure. Bytes left after the root's
/// subtree are rejected.
pub fn decode_tree(bytes: &[u8], max_depth: usize) -> Result<Tree, TreeError> {
    let mut reader = TreeReader::new(bytes, max_depth);
    reader.read_node(None)?;
    let trailing = reader.records.remaining();
    if trailing > 0 {
        return Err(CodecError::TrailingBytes(trailing).into());
    }
    debug!(
        "decoded {} nodes, max tree depth {}",
        reader.nodes.len(),
        reader.max_seen
    );
    Ok(Tree::from_nodes(reader.nodes))
}

/// Encode the whole tree in pre-order.
pub fn encode_tree(tree: &Tree) -> Result<Vec<u8>, TreeError> {
    encode_subtree(tree, tree.root())
}

/// Encode the subtree rooted at `root` in pre-order.
pub fn encode_subtree(tree: &Tree, root: NodeHandle) -> Result<Vec<u8>, TreeError> {
    if !tree.contains(root) {
        return Err(QueryError::UnknownHandle(root).into());
    }
    let mut out = Vec::new();
    write_node(tree, root, &mut out)?;
    Ok(out)
}

/// Read and decode a tree file.
pub fn read_tree_file(path: impl AsRef<Path>, max_depth: usize) -> Result<Tree, TreeError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|err| TreeError::io(path, err))?;
    let tree = decode_tree(&bytes, max_depth)?;
    let stats = tree.stats();
    info!(
        "loaded VSS tree from {} ({} nodes, max depth {})",
        path.display(),
        stats.nodes,
        stats.max_depth
    );
    Ok(tree)
}

/// Encode the subtree at `root` and write it to `path`.
///
/// Encoding completes in memory first, so an invalid tree never leaves a
/// file behind.
pub fn write_tree_file(
    path: impl AsRef<Path>,
    tree: &Tree,
    root: NodeHandle,
) -> Result<(), TreeError> {
    let path = path.as_ref();
    let bytes = encode_subtree(tree, root)?;
    fs::write(path, &bytes).map_err(|err| TreeError::io(path, err))?;
    info!("wrote {} bytes of tree data to {}", bytes.len(), path.display());
    Ok(())
}

fn write_node(tree: &Tree, handle: NodeHandle, out: &mut Vec<u8>) -> Result<(), CodecError> {
    let node = tree.get(handle);
    encode_record(node.record_ref(), out)?;
    for child in &node.children {
        write_node(tree, *child, out)?;
    }
    Ok(())
}

struct TreeReader<'a> {
    records: RecordIter<'a>,
    nodes: Vec<Node>,
    depth: usize,
    max_seen: usize,
    limit: usize,
}

impl<'a> TreeReader<'a> {
    fn new(bytes: &'a [u8], limit: usize) -> Self {
        Self {
            records: RecordIter::new(bytes),
            nodes: Vec::new(),
            depth: 0,
            max_seen: 0,
            limit,
        }
    }

    fn read_node(&mut self, parent: Option<NodeHandle>) -> Result<NodeHandle, CodecError> {
        let record = self.records.next().unwrap_or(Err(CodecError::Truncated))?;
        self.depth += 1;
        if self.depth > self.limit {
            return Err(CodecError::DepthExceeded { limit: self.limit });
        }
        self.max_seen = self.max_seen.max(self.depth);

        let child_count = record.child_count as usize;
        // every child needs at least its header
        if child_count.saturating_mul(HEADER_LEN) > self.records.remaining() {
            return Err(CodecError::Truncated);
        }
        let index = self.nodes.len();
        let raw = u32::try_from(index).map_err(|_| CodecError::InvalidLength(index as i64))?;
        let handle = NodeHandle::from_raw(raw);
        self.nodes.push(Node::from_record(
            record,
            parent,
            Vec::with_capacity(child_count),
        ));
        for _ in 0..child_count {
            let child = self.read_node(Some(handle))?;
            self.nodes[index].children.push(child);
        }
        self.depth -= 1;
        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{NodeSpec, TreeBuilder};
    use vss_codec::Datatype;

    fn chain(depth: usize) -> Tree {
        let mut builder = TreeBuilder::new(NodeSpec::branch("L0", "")).expect("root");
        let mut parent = builder.root();
        for level in 1..depth {
            parent = builder
                .add_child(parent, NodeSpec::branch(&format!("L{level}"), ""))
                .expect("child");
        }
        builder.build()
    }

    #[test]
    fn depth_limit_is_enforced() {
        let bytes = encode_tree(&chain(6)).expect("encode");
        assert!(decode_tree(&bytes, 6).is_ok());
        assert!(matches!(
            decode_tree(&bytes, 5),
            Err(TreeError::Decode(CodecError::DepthExceeded { limit: 5 }))
        ));
    }

    #[test]
    fn inflated_child_count_is_truncation() {
        let mut builder = TreeBuilder::new(NodeSpec::branch("Vehicle", "")).expect("root");
        builder
            .add_child(
                builder.root(),
                NodeSpec::sensor("Speed", "", Datatype::Float),
            )
            .expect("child");
        let mut bytes = encode_tree(&builder.build()).expect("encode");
        bytes[12..16].copy_from_slice(&1_000_000i32.to_le_bytes());
        assert!(matches!(
            decode_tree(&bytes, 8),
            Err(TreeError::Decode(CodecError::Truncated))
        ));
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let mut bytes = encode_tree(&chain(2)).expect("encode");
        bytes.push(0);
        assert!(matches!(
            decode_tree(&bytes, 8),
            Err(TreeError::Decode(CodecError::TrailingBytes(1)))
        ));
    }

    #[test]
    fn empty_input_is_truncation() {
        assert!(matches!(
            decode_tree(&[], 8),
            Err(TreeError::Decode(CodecError::Truncated))
        ));
    }
}

// Author: Lukas Bower
// Purpose: Provide VSS native tree wire types and record codec primitives.
#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![no_std]

//! Wire types and per-node record codec for the native VSS signal tree
//! format. A tree file is a flat pre-order sequence of node records; the
//! record layout depends on the node type carried in each header.
//! Structural reassembly of the tree lives in the `vss-tree` crate.

extern crate alloc;

#[cfg(test)]
extern crate std;

mod codec;
mod fuzz;
mod records;
mod types;

pub use codec::{decode_record, encode_record, Codec};
pub use fuzz::fuzz_decode;
pub use records::RecordIter;
pub use types::*;

// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Provide a pre-order record iterator over VSS native tree buffers.
// Author: Lukas Bower

//! Sequential record iterator for VSS native tree buffers.

use crate::codec::Codec;
use crate::{CodecError, NodeRecord};

/// Iterator over the node records of a tree buffer in file (pre-order) order.
///
/// The iterator fuses after the first error.
#[derive(Debug, Clone)]
pub struct RecordIter<'a> {
    buffer: &'a [u8],
    offset: usize,
    failed: bool,
}

impl<'a> RecordIter<'a> {
    /// Create a new iterator positioned at the start of `buffer`.
    #[must_use]
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            offset: 0,
            failed: false,
        }
    }

    /// Byte offset of the next record.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.offset
    }
}

impl<'a> Iterator for RecordIter<'a> {
    type Item = Result<NodeRecord, CodecError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.buffer.len() {
            return None;
        }
        match Codec.decode_record(&self.buffer[self.offset..]) {
            Ok((record, consumed)) => {
                self.offset += consumed;
                Some(Ok(record))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

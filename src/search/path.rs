// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Dotted search path parsing shared by the resolver and wildcard engine.
// Author: Lukas Bower

/// Segment matching any single child name.
pub const WILDCARD: &str = "*";

/// Search path split into its dot-separated segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPath<'a> {
    segments: Vec<&'a str>,
}

impl<'a> SearchPath<'a> {
    /// Split `path` on `.`; a path without dots has one segment.
    #[must_use]
    pub fn parse(path: &'a str) -> Self {
        Self {
            segments: path.split('.').collect(),
        }
    }

    /// Segment at `step`, or the empty string past the end.
    #[must_use]
    pub fn segment(&self, step: usize) -> &'a str {
        self.segments.get(step).copied().unwrap_or("")
    }

    /// Index of the final segment.
    #[must_use]
    pub fn last_step(&self) -> usize {
        self.segments.len() - 1
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// `split` always yields at least one segment.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Number of segments in a dotted path.
#[must_use]
pub fn segment_count(path: &str) -> usize {
    path.bytes().filter(|b| *b == b'.').count() + 1
}

/// Leading `keep` segments of `path`, or `None` when it has no more than
/// that many.
///
/// A `keep` of zero behaves like one.
#[must_use]
pub fn segment_prefix(path: &str, keep: usize) -> Option<&str> {
    path.match_indices('.')
        .nth(keep.saturating_sub(1))
        .map(|(dot, _)| &path[..dot])
}

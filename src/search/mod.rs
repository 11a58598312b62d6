// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Public search entry points over a loaded signal tree.
// Author: Lukas Bower

//! Path search over a loaded tree.
//!
//! A path is a dotted list of segments whose first segment names the search
//! root itself. A `*` segment matches any single child. With `all_depths`
//! set, a path ending in `*` enumerates every leaf below the matched level.

mod path;
mod resolver;
mod wildcard;

pub use path::{segment_count, segment_prefix, SearchPath, WILDCARD};

use log::debug;

use crate::error::QueryError;
use crate::handle::NodeHandle;
use crate::tree::Tree;
use resolver::SearchContext;
use wildcard::WildcardQueue;

/// Result capacity used when the caller does not pick one.
pub const DEFAULT_MAX_FOUND: usize = 150;

/// One resolved match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMatch {
    /// Matched node.
    pub handle: NodeHandle,
    /// Concrete dotted path from the tree root, wildcards substituted.
    pub path: String,
}

/// Ordered matches of one search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResults {
    matches: Vec<SearchMatch>,
    exhausted: bool,
}

impl SearchResults {
    /// Matches in traversal order.
    #[must_use]
    pub fn matches(&self) -> &[SearchMatch] {
        &self.matches
    }

    /// Consume into the match list.
    #[must_use]
    pub fn into_matches(self) -> Vec<SearchMatch> {
        self.matches
    }

    /// Number of matches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// True when nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// The result capacity was reached, so more matches may exist.
    ///
    /// In all-depths mode each level runs with the budget left over from
    /// the previous one, and the flag is set as soon as any level uses up
    /// its budget. It can therefore be true even when fewer than
    /// `max_found` results come back and nothing else would match.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Matched handles in order.
    pub fn handles(&self) -> impl Iterator<Item = NodeHandle> + '_ {
        self.matches.iter().map(|found| found.handle)
    }

    /// Resolved paths in order.
    pub fn paths(&self) -> impl Iterator<Item = &str> + '_ {
        self.matches.iter().map(|found| found.path.as_str())
    }
}

impl IntoIterator for SearchResults {
    type Item = SearchMatch;
    type IntoIter = std::vec::IntoIter<SearchMatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.into_iter()
    }
}

/// Resolve `path` under `root`, returning at most `max_found` matches.
///
/// Single-level matching records at most `max_found - 1` entries because
/// the resolver keeps one slot in reserve. With `all_depths` and a
/// trailing `*`, only leaves are returned, breadth-first by level.
pub fn search(
    tree: &Tree,
    path: &str,
    root: NodeHandle,
    max_found: usize,
    all_depths: bool,
) -> Result<SearchResults, QueryError> {
    if path.is_empty() {
        return Err(QueryError::EmptyPath);
    }
    if !tree.contains(root) {
        return Err(QueryError::UnknownHandle(root));
    }

    let results = if all_depths && path.ends_with(WILDCARD) {
        let expansion = WildcardQueue::new(tree, path, root, max_found).run();
        SearchResults {
            matches: expansion.matches,
            exhausted: expansion.exhausted,
        }
    } else {
        let outcome = SearchContext::new(tree, root, path, max_found).run(root);
        SearchResults {
            matches: outcome.matches,
            exhausted: outcome.exhausted,
        }
    };
    debug!(
        "search '{}' from {:?} found {} nodes (exhausted: {})",
        path,
        root,
        results.len(),
        results.exhausted
    );
    Ok(results)
}

/// Search from the tree root with [`DEFAULT_MAX_FOUND`] capacity.
pub fn simple_search(tree: &Tree, path: &str, all_depths: bool) -> Result<SearchResults, QueryError> {
    search(tree, path, tree.root(), DEFAULT_MAX_FOUND, all_depths)
}

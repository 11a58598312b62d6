// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Segment-by-segment path resolver with speculative response slots.
// Author: Lukas Bower

//! Single-pass path resolver.
//!
//! Every call owns a [`SearchContext`]: the parsed search path, the step
//! offset of the search root and the response slots filled so far. A new
//! slot starts with the full path of the search root and is only created
//! once the previous one holds a match, so `max_found` is a count and
//! never an allocation size. Matching writes
//! speculative path text into the next free slot before it knows whether
//! the slot will be used, so at most `max_found - 1` matches are recorded.

use super::path::{segment_count, segment_prefix, SearchPath, WILDCARD};
use super::SearchMatch;
use crate::handle::NodeHandle;
use crate::tree::Tree;

pub(crate) struct SearchContext<'t, 'p> {
    tree: &'t Tree,
    path: SearchPath<'p>,
    step_offset: usize,
    max_found: usize,
    prefix: String,
    slots: Vec<Slot>,
    found: usize,
}

struct Slot {
    path: String,
    handle: Option<NodeHandle>,
}

impl<'t, 'p> SearchContext<'t, 'p> {
    /// Prepare a search of `path` under `root`.
    ///
    /// `root` must belong to `tree`.
    pub(crate) fn new(tree: &'t Tree, root: NodeHandle, path: &'p str, max_found: usize) -> Self {
        let prefix = tree.path_of(root).unwrap_or_default();
        let step_offset = segment_count(&prefix) - 1;
        let slot = Slot {
            path: prefix.clone(),
            handle: None,
        };
        Self {
            tree,
            path: SearchPath::parse(path),
            step_offset,
            max_found,
            prefix,
            slots: vec![slot],
            found: 0,
        }
    }

    /// Walk from `root` and return the recorded matches in order.
    pub(crate) fn run(mut self, root: NodeHandle) -> ResolverOutcome {
        self.step(root, 0);
        let exhausted = self.found + 1 >= self.max_found;
        let matches = self
            .slots
            .into_iter()
            .take(self.found)
            .filter_map(|slot| {
                slot.handle.map(|handle| SearchMatch {
                    handle,
                    path: slot.path,
                })
            })
            .collect();
        ResolverOutcome { matches, exhausted }
    }

    fn step(&mut self, node: NodeHandle, step: usize) -> Option<NodeHandle> {
        if self.found + 1 >= self.max_found {
            return None;
        }
        let current = self.tree.get(node);
        if step == self.path.last_step() {
            let segment = self.path.segment(step);
            if segment == current.name || segment == WILDCARD {
                self.slots[self.found].handle = Some(node);
                self.found += 1;
                self.slots.push(Slot {
                    path: self.prefix.clone(),
                    handle: None,
                });
                return Some(node);
            }
        }

        let next = self.path.segment(step + 1);
        if next != WILDCARD {
            let child = current
                .children
                .iter()
                .copied()
                .find(|child| self.tree.get(*child).name == next)?;
            self.append(next);
            return self.step(child, step + 1);
        }

        let keep = self.step_offset + step + 1;
        let mut response = None;
        for child in current.children.iter().copied() {
            if self.found >= self.max_found {
                break;
            }
            let name = &self.tree.get(child).name;
            self.append(name);
            match self.step(child, step + 1) {
                None => self.truncate_slot(self.found, self.found, keep),
                Some(hit) => {
                    let source = self.found.checked_sub(1).unwrap_or(self.found);
                    self.truncate_slot(self.found, source, keep);
                    response = Some(hit);
                }
            }
        }
        response
    }

    fn append(&mut self, name: &str) {
        let slot = &mut self.slots[self.found].path;
        if !slot.is_empty() {
            slot.push('.');
        }
        slot.push_str(name);
    }

    /// Reset slot `target` to the first `keep` segments of slot `source`.
    ///
    /// A source without enough segments leaves the target untouched.
    fn truncate_slot(&mut self, target: usize, source: usize, keep: usize) {
        let Some(slot) = self.slots.get(source) else {
            return;
        };
        if let Some(prefix) = segment_prefix(&slot.path, keep) {
            let prefix = prefix.to_owned();
            self.slots[target].path = prefix;
        }
    }
}

pub(crate) struct ResolverOutcome {
    pub(crate) matches: Vec<SearchMatch>,
    pub(crate) exhausted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{NodeSpec, TreeBuilder};
    use vss_codec::Datatype;

    fn fan(children: usize) -> Tree {
        let mut builder = TreeBuilder::new(NodeSpec::branch("A", "")).expect("root");
        for index in 0..children {
            builder
                .add_child(
                    builder.root(),
                    NodeSpec::sensor(&format!("B{index}"), "", Datatype::Uint8),
                )
                .expect("child");
        }
        builder.build()
    }

    #[test]
    fn wildcard_rolls_back_between_children() {
        let tree = fan(3);
        let outcome = SearchContext::new(&tree, tree.root(), "A.*", 10).run(tree.root());
        let paths: Vec<_> = outcome.matches.iter().map(|m| m.path.as_str()).collect();
        assert_eq!(paths, ["A.B0", "A.B1", "A.B2"]);
        assert!(!outcome.exhausted);
    }

    #[test]
    fn reserve_slot_limits_matches() {
        let tree = fan(5);
        let outcome = SearchContext::new(&tree, tree.root(), "A.*", 3).run(tree.root());
        assert_eq!(outcome.matches.len(), 2);
        assert!(outcome.exhausted);
    }

    #[test]
    fn slots_grow_with_matches_only() {
        let tree = fan(3);
        let mut context = SearchContext::new(&tree, tree.root(), "A.B1", usize::MAX);
        assert_eq!(context.slots.len(), 1);
        assert!(context.step(tree.root(), 0).is_some());
        assert_eq!(context.slots.len(), 2);
        assert_eq!(context.slots[1].path, "A");
    }

    #[test]
    fn zero_capacity_finds_nothing() {
        let tree = fan(2);
        let outcome = SearchContext::new(&tree, tree.root(), "A.*", 0).run(tree.root());
        assert!(outcome.matches.is_empty());
        assert!(outcome.exhausted);
    }

    #[test]
    fn root_name_is_checked_only_for_single_segment_paths() {
        let tree = fan(1);
        let hit = SearchContext::new(&tree, tree.root(), "A", 4).run(tree.root());
        assert_eq!(hit.matches.len(), 1);
        let miss = SearchContext::new(&tree, tree.root(), "X", 4).run(tree.root());
        assert!(miss.matches.is_empty());
        let relaxed = SearchContext::new(&tree, tree.root(), "X.B0", 4).run(tree.root());
        assert_eq!(relaxed.matches[0].path, "A.B0");
    }
}

// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Breadth-first leaf enumeration for trailing wildcard queries.
// Author: Lukas Bower

use std::collections::VecDeque;

use log::trace;

use super::path::WILDCARD;
use super::resolver::SearchContext;
use super::SearchMatch;
use crate::handle::NodeHandle;
use crate::tree::Tree;

struct Job {
    path: String,
    root: NodeHandle,
    budget: usize,
}

/// Job queue driving one trailing wildcard expansion.
///
/// Branch matches are re-queued as `<name>.*` rooted at themselves; leaf
/// matches are final results.
pub(crate) struct WildcardQueue<'t> {
    tree: &'t Tree,
    jobs: VecDeque<Job>,
    max_found: usize,
}

pub(crate) struct Expansion {
    pub(crate) matches: Vec<SearchMatch>,
    pub(crate) exhausted: bool,
}

impl<'t> WildcardQueue<'t> {
    pub(crate) fn new(tree: &'t Tree, path: &str, root: NodeHandle, max_found: usize) -> Self {
        let mut jobs = VecDeque::new();
        jobs.push_back(Job {
            path: path.to_owned(),
            root,
            budget: max_found,
        });
        Self {
            tree,
            jobs,
            max_found,
        }
    }

    pub(crate) fn run(mut self) -> Expansion {
        let mut results = Vec::new();
        let mut left = self.max_found;
        let mut hit_capacity = false;

        while results.len() < self.max_found {
            let Some(job) = self.jobs.pop_front() else {
                break;
            };
            let outcome = SearchContext::new(self.tree, job.root, &job.path, job.budget).run(job.root);
            trace!(
                "wildcard job '{}' matched {} nodes",
                job.path,
                outcome.matches.len()
            );
            hit_capacity |= outcome.exhausted;
            left = left.saturating_sub(outcome.matches.len());

            for found in outcome.matches {
                if results.len() == self.max_found {
                    break;
                }
                let node = self.tree.get(found.handle);
                if node.node_type.is_branch() {
                    self.jobs.push_back(Job {
                        path: format!("{}.{}", node.name, WILDCARD),
                        root: found.handle,
                        budget: left,
                    });
                } else {
                    results.push(found);
                }
            }
        }

        let exhausted = hit_capacity || results.len() >= self.max_found;
        Expansion {
            matches: results,
            exhausted,
        }
    }
}

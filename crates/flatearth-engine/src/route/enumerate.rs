//! Exhaustive covering-path search.
//!
//! # Order
//!
//! Depth-first backtracking that always tries successors in ascending
//! [`NodeId`] order. Without a fixed start every node `0..n` is tried as the
//! first node in turn, so results come out in lexicographic order of the
//! node sequence.
//!
//! # Limits
//!
//! `max_paths` stops the search after that many results. The single-path
//! variant used by the in-process explorer also carries a step budget (one
//! step per node pushed onto the partial path) so a hopeless search on a
//! larger graph terminates.

use fixedbitset::FixedBitSet;
use tracing::{debug, instrument};

use crate::graph::{AdjacencyMatrix, NodeId};

/// Every Hamiltonian path of `matrix`, optionally fixed to begin at `start`.
///
/// An out-of-range `start` yields no paths.
#[must_use]
#[instrument(skip(matrix), fields(n = matrix.node_count()))]
pub fn enumerate_covering_paths(
    matrix: &AdjacencyMatrix,
    start: Option<NodeId>,
    max_paths: Option<usize>,
) -> Vec<Vec<NodeId>> {
    let mut search = Search::new(matrix, max_paths.unwrap_or(usize::MAX), usize::MAX);
    search.run(start);
    debug!(found = search.found.len(), steps = search.steps, "covering paths enumerated");
    search.found
}

/// First covering path from `start` in search order, or `None` if there is
/// none or `step_budget` runs out first.
#[must_use]
pub fn find_covering_path(
    matrix: &AdjacencyMatrix,
    start: NodeId,
    step_budget: usize,
) -> Option<Vec<NodeId>> {
    let mut search = Search::new(matrix, 1, step_budget);
    search.run(Some(start));
    search.found.pop()
}

struct Search<'a> {
    matrix: &'a AdjacencyMatrix,
    visited: FixedBitSet,
    path: Vec<NodeId>,
    found: Vec<Vec<NodeId>>,
    max_paths: usize,
    steps: usize,
    step_budget: usize,
}

impl<'a> Search<'a> {
    fn new(matrix: &'a AdjacencyMatrix, max_paths: usize, step_budget: usize) -> Self {
        let n = matrix.node_count();
        Self {
            matrix,
            visited: FixedBitSet::with_capacity(n),
            path: Vec::with_capacity(n),
            found: Vec::new(),
            max_paths,
            steps: 0,
            step_budget,
        }
    }

    fn run(&mut self, start: Option<NodeId>) {
        let n = self.matrix.node_count();
        match start {
            Some(node) if node < n => self.extend(node),
            Some(_) => {}
            None => {
                for node in 0..n {
                    if self.exhausted() {
                        break;
                    }
                    self.extend(node);
                }
            }
        }
    }

    fn exhausted(&self) -> bool {
        self.found.len() >= self.max_paths || self.steps >= self.step_budget
    }

    fn extend(&mut self, node: NodeId) {
        if self.exhausted() {
            return;
        }
        self.steps += 1;
        self.visited.insert(node);
        self.path.push(node);

        let matrix = self.matrix;
        if self.path.len() == matrix.node_count() {
            self.found.push(self.path.clone());
        } else {
            for next in matrix.successors(node) {
                if !self.visited.contains(next) {
                    self.extend(next);
                    if self.exhausted() {
                        break;
                    }
                }
            }
        }

        self.path.pop();
        self.visited.set(node, false);
    }
}

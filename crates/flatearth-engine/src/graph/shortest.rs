//! All-pairs shortest hop counts (Floyd–Warshall).
//!
//! Distances are `f64` so that unreachable pairs can be represented as
//! `+∞`; IEEE arithmetic gives `∞ + x = ∞` without overflow, so the
//! relaxation step needs no special casing.

use serde::Serialize;
use tracing::instrument;

use super::matrix::{AdjacencyMatrix, NodeId};

/// `n × n` table of minimum hop counts: `0` on the diagonal, `+∞` when no
/// directed path exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortestPathTable {
    n: usize,
    dist: Vec<f64>,
}

impl ShortestPathTable {
    /// Run Floyd–Warshall over `matrix`, relaxing through `k` in increasing
    /// order. `O(n³)`.
    #[must_use]
    #[instrument(skip(matrix), fields(n = matrix.node_count()))]
    pub fn compute(matrix: &AdjacencyMatrix) -> Self {
        let n = matrix.node_count();
        let mut dist = vec![f64::INFINITY; n * n];
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    dist[i * n + j] = 0.0;
                } else if matrix.has_edge(i, j) {
                    dist[i * n + j] = 1.0;
                }
            }
        }

        for k in 0..n {
            for i in 0..n {
                let through = dist[i * n + k];
                if through.is_infinite() {
                    continue;
                }
                for j in 0..n {
                    let candidate = through + dist[k * n + j];
                    if candidate < dist[i * n + j] {
                        dist[i * n + j] = candidate;
                    }
                }
            }
        }

        Self { n, dist }
    }

    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.n
    }

    /// Hop count from `from` to `to`; `+∞` if unreachable or out of range.
    #[must_use]
    pub fn get(&self, from: NodeId, to: NodeId) -> f64 {
        if from < self.n && to < self.n {
            self.dist[from * self.n + to]
        } else {
            f64::INFINITY
        }
    }

    #[must_use]
    pub fn is_reachable(&self, from: NodeId, to: NodeId) -> bool {
        self.get(from, to).is_finite()
    }

    /// Largest finite off-diagonal distance, or `0` when no pair is connected.
    #[must_use]
    pub fn max_finite(&self) -> f64 {
        (0..self.n)
            .flat_map(|i| (0..self.n).filter(move |&j| j != i).map(move |j| (i, j)))
            .map(|(i, j)| self.get(i, j))
            .filter(|d| d.is_finite())
            .fold(0.0, f64::max)
    }

    /// Rows with unreachable entries as `None` (JSON has no infinity).
    #[must_use]
    pub fn rows(&self) -> Vec<Vec<Option<f64>>> {
        (0..self.n)
            .map(|i| {
                (0..self.n)
                    .map(|j| Some(self.get(i, j)).filter(|d| d.is_finite()))
                    .collect()
            })
            .collect()
    }
}

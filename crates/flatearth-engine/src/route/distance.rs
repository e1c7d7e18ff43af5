//! Cost matrix handed to the route optimizer.
//!
//! Connected pairs cost `1`; every other cell, the diagonal included, holds
//! the [`NO_EDGE`] sentinel.

use serde::Serialize;

use crate::graph::{AdjacencyMatrix, NodeId};

/// Cost of a pair with no direct edge.
pub const NO_EDGE: i64 = i64::MAX;

/// `n × n` integer travel costs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DistanceMatrix {
    n: usize,
    cells: Vec<i64>,
}

impl DistanceMatrix {
    #[must_use]
    pub fn from_adjacency(matrix: &AdjacencyMatrix) -> Self {
        let n = matrix.node_count();
        let cells = (0..n)
            .flat_map(|i| (0..n).map(move |j| (i, j)))
            .map(|(i, j)| if matrix.has_edge(i, j) { 1 } else { NO_EDGE })
            .collect();
        Self { n, cells }
    }

    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.n
    }

    /// Cost of `from → to`; [`NO_EDGE`] when absent or out of range.
    #[must_use]
    pub fn cost(&self, from: NodeId, to: NodeId) -> i64 {
        if from < self.n && to < self.n {
            self.cells[from * self.n + to]
        } else {
            NO_EDGE
        }
    }

    #[must_use]
    pub fn is_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.cost(from, to) != NO_EDGE
    }

    /// Recover the adjacency the costs were built from.
    #[must_use]
    pub fn to_adjacency(&self) -> AdjacencyMatrix {
        let mut matrix = AdjacencyMatrix::with_nodes(self.n);
        for i in 0..self.n {
            for j in 0..self.n {
                if self.is_edge(i, j) {
                    matrix.set_edge(i, j, true);
                }
            }
        }
        matrix
    }

    #[must_use]
    pub fn rows(&self) -> Vec<Vec<i64>> {
        self.cells.chunks(self.n.max(1)).take(self.n).map(<[i64]>::to_vec).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_on_diagonal_and_non_edges() {
        let m = AdjacencyMatrix::from_edges(3, &[(0, 1), (1, 2)]).expect("edges");
        let d = DistanceMatrix::from_adjacency(&m);
        assert_eq!(d.rows(), vec![
            vec![NO_EDGE, 1, NO_EDGE],
            vec![NO_EDGE, NO_EDGE, 1],
            vec![NO_EDGE, NO_EDGE, NO_EDGE],
        ]);
        assert_eq!(d.cost(5, 0), NO_EDGE);
    }

    #[test]
    fn adjacency_recovered() {
        let m = AdjacencyMatrix::from_edges(4, &[(0, 1), (1, 0), (2, 3), (3, 1)]).expect("edges");
        assert_eq!(DistanceMatrix::from_adjacency(&m).to_adjacency(), m);
    }
}

//! In/out degree scan over the adjacency matrix.
//!
//! Degrees only count edges to or from *other* nodes; the diagonal is
//! always empty so no special casing is needed beyond that.

use serde::Serialize;

use super::matrix::{AdjacencyMatrix, NodeId};

/// In- and out-degree of one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodeDegree {
    pub in_degree: usize,
    pub out_degree: usize,
}

impl NodeDegree {
    /// No incoming edge from any other node.
    #[must_use]
    pub const fn is_zero_in(self) -> bool {
        self.in_degree == 0
    }

    /// Exactly one incoming edge from another node.
    #[must_use]
    pub const fn is_single_in(self) -> bool {
        self.in_degree == 1
    }

    /// No outgoing edge to any other node.
    #[must_use]
    pub const fn is_dead_end(self) -> bool {
        self.out_degree == 0
    }
}

/// Degrees of every node, indexed by [`NodeId`]. `O(n²)`.
#[must_use]
pub fn degree_table(matrix: &AdjacencyMatrix) -> Vec<NodeDegree> {
    let n = matrix.node_count();
    let mut table = vec![
        NodeDegree {
            in_degree: 0,
            out_degree: 0,
        };
        n
    ];
    for (from, to) in matrix.edges() {
        table[from].out_degree += 1;
        table[to].in_degree += 1;
    }
    table
}

/// Nodes with no incoming edges, ascending.
#[must_use]
pub fn zero_in_degree_nodes(matrix: &AdjacencyMatrix) -> Vec<NodeId> {
    degree_table(matrix)
        .iter()
        .enumerate()
        .filter(|(_, degree)| degree.is_zero_in())
        .map(|(node, _)| node)
        .collect()
}

/// Nodes with no outgoing edges, ascending.
#[must_use]
pub fn dead_end_nodes(matrix: &AdjacencyMatrix) -> Vec<NodeId> {
    degree_table(matrix)
        .iter()
        .enumerate()
        .filter(|(_, degree)| degree.is_dead_end())
        .map(|(node, _)| node)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_degrees() {
        // 0 → 1, 0 → 2, 0 → 3
        let m = AdjacencyMatrix::from_edges(4, &[(0, 1), (0, 2), (0, 3)]).expect("edges");
        let table = degree_table(&m);
        assert_eq!(table[0].out_degree, 3);
        assert_eq!(table[0].in_degree, 0);
        for leaf in 1..4 {
            assert!(table[leaf].is_single_in());
            assert!(table[leaf].is_dead_end());
        }
        assert_eq!(zero_in_degree_nodes(&m), vec![0]);
        assert_eq!(dead_end_nodes(&m), vec![1, 2, 3]);
    }

    #[test]
    fn isolated_node_is_both_zero_in_and_dead_end() {
        let m = AdjacencyMatrix::from_edges(3, &[(0, 1)]).expect("edges");
        assert!(zero_in_degree_nodes(&m).contains(&2));
        assert!(dead_end_nodes(&m).contains(&2));
    }
}

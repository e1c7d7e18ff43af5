//! Turn zero in-degree nodes into reachable ones.
//!
//! For every outgoing edge `i → k` of a zero in-degree node `i` the reverse
//! edge `k → i` is added. A second application finds no zero in-degree
//! node with outgoing edges left, so the transform is idempotent.

use tracing::{debug, instrument};

use crate::error::Result;
use crate::graph::{AdjacencyMatrix, NodeId, zero_in_degree_nodes};

/// Convert `node` if it currently has no incoming edges. Returns the number
/// of edges added (zero for any other node).
///
/// # Errors
///
/// Returns [`crate::EngineError::NodeOutOfRange`] for an invalid node.
#[instrument(skip(matrix), fields(n = matrix.node_count()))]
pub fn convert_zero_in_node(matrix: &mut AdjacencyMatrix, node: NodeId) -> Result<usize> {
    matrix.check_node(node)?;
    if matrix.predecessors(node).next().is_some() {
        return Ok(0);
    }
    Ok(add_reverse_edges(matrix, node))
}

/// Convert every node that is zero in-degree before the call. Returns the
/// number of edges added.
#[instrument(skip(matrix), fields(n = matrix.node_count()))]
pub fn convert_zero_in_nodes(matrix: &mut AdjacencyMatrix) -> usize {
    let added: usize = zero_in_degree_nodes(matrix)
        .into_iter()
        .map(|node| add_reverse_edges(matrix, node))
        .sum();
    debug!(added, "zero in-degree nodes converted");
    added
}

fn add_reverse_edges(matrix: &mut AdjacencyMatrix, node: NodeId) -> usize {
    let targets: Vec<NodeId> = matrix.successors(node).collect();
    let mut added = 0;
    for target in targets {
        if !matrix.has_edge(target, node) {
            matrix.set_edge(target, node, true);
            added += 1;
        }
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EngineError;

    #[test]
    fn star_centre_becomes_bidirectional() {
        let mut m = AdjacencyMatrix::from_edges(4, &[(0, 1), (0, 2), (0, 3)]).expect("edges");
        assert_eq!(convert_zero_in_node(&mut m, 0), Ok(3));
        for leaf in 1..4 {
            assert!(m.has_edge(leaf, 0));
        }
        assert_eq!(convert_zero_in_node(&mut m, 0), Ok(0));
    }

    #[test]
    fn non_zero_in_node_untouched() {
        let mut m = AdjacencyMatrix::from_edges(3, &[(0, 1), (1, 2)]).expect("edges");
        let before = m.clone();
        assert_eq!(convert_zero_in_node(&mut m, 1), Ok(0));
        assert_eq!(m, before);
        assert!(matches!(
            convert_zero_in_node(&mut m, 3),
            Err(EngineError::NodeOutOfRange { node: 3, .. })
        ));
    }

    #[test]
    fn convert_all_is_idempotent() {
        // Two sources feeding a sink.
        let mut m = AdjacencyMatrix::from_edges(3, &[(0, 2), (1, 2)]).expect("edges");
        assert_eq!(convert_zero_in_nodes(&mut m), 2);
        let once = m.clone();
        assert_eq!(convert_zero_in_nodes(&mut m), 0);
        assert_eq!(m, once);
        assert!(zero_in_degree_nodes(&m).is_empty());
    }
}

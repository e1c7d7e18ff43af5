//! Preconditions and result checks for covering routes.

use fixedbitset::FixedBitSet;

use crate::error::{EngineError, Result};
use crate::graph::{AdjacencyMatrix, NodeId, degree_table};

/// At most one zero in-degree node and at most one dead end.
///
/// # Errors
///
/// Returns [`EngineError::InvalidTopology`] with both counts otherwise.
pub fn check_topology(matrix: &AdjacencyMatrix) -> Result<()> {
    let degrees = degree_table(matrix);
    let zero_in_degree = degrees.iter().filter(|d| d.is_zero_in()).count();
    let dead_ends = degrees.iter().filter(|d| d.is_dead_end()).count();
    if zero_in_degree > 1 || dead_ends > 1 {
        return Err(EngineError::InvalidTopology {
            zero_in_degree,
            dead_ends,
        });
    }
    Ok(())
}

/// `true` if `path` visits every node exactly once and every consecutive
/// pair is an edge of `matrix`.
#[must_use]
pub fn is_covering_path(matrix: &AdjacencyMatrix, path: &[NodeId]) -> bool {
    let n = matrix.node_count();
    if path.len() != n {
        return false;
    }
    let mut seen = FixedBitSet::with_capacity(n);
    for &node in path {
        if node >= n || seen.put(node) {
            return false;
        }
    }
    path.windows(2).all(|pair| matrix.has_edge(pair[0], pair[1]))
}

/// Accept `route` only if it is a covering path beginning at `start`.
///
/// # Errors
///
/// Returns [`EngineError::NoFeasibleRoute`] for an empty, short, repeated,
/// disconnected, or wrongly-anchored sequence.
pub fn validate_route(matrix: &AdjacencyMatrix, route: &[NodeId], start: Option<NodeId>) -> Result<()> {
    let anchored = start.is_none_or(|s| route.first() == Some(&s));
    if anchored && is_covering_path(matrix, route) {
        Ok(())
    } else {
        Err(EngineError::NoFeasibleRoute { start })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> AdjacencyMatrix {
        AdjacencyMatrix::from_edges(3, &[(0, 1), (1, 2)]).expect("edges")
    }

    #[test]
    fn topology_counts_reported() {
        let star = AdjacencyMatrix::from_edges(4, &[(0, 1), (0, 2), (0, 3)]).expect("edges");
        assert_eq!(
            check_topology(&star),
            Err(EngineError::InvalidTopology {
                zero_in_degree: 1,
                dead_ends: 3,
            })
        );
        assert!(check_topology(&chain()).is_ok());
    }

    #[test]
    fn covering_path_checks() {
        let m = chain();
        assert!(is_covering_path(&m, &[0, 1, 2]));
        assert!(!is_covering_path(&m, &[0, 1]));
        assert!(!is_covering_path(&m, &[1, 2, 0]));
        assert!(!is_covering_path(&m, &[0, 1, 1]));
        assert!(!is_covering_path(&m, &[0, 1, 9]));
    }

    #[test]
    fn validate_requires_start_anchor() {
        let m = chain();
        assert!(validate_route(&m, &[0, 1, 2], Some(0)).is_ok());
        assert!(validate_route(&m, &[0, 1, 2], None).is_ok());
        assert_eq!(
            validate_route(&m, &[0, 1, 2], Some(1)),
            Err(EngineError::NoFeasibleRoute { start: Some(1) })
        );
        assert!(validate_route(&m, &[], Some(0)).is_err());
    }
}

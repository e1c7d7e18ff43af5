//! Per-node and per-edge structural classification.
//!
//! Node flags are independent booleans; [`NodeClassification::role`] picks
//! the single role shown to the user with the precedence
//!
//! ```text
//! single-in-degree > zero-in-degree > bridge > dead-end > default
//! ```
//!
//! Edge flags follow the same idea with
//! `redundant > bidirectional > from-zero-in-degree > default`.

#![allow(clippy::module_name_repetitions)]

use serde::Serialize;
use tracing::{debug, instrument};

use super::degree::degree_table;
use super::matrix::{AdjacencyMatrix, NodeId};
use super::reachability::{find_bridge_nodes, find_redundant_edges};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Structural flags for one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodeClassification {
    pub node: NodeId,
    pub is_zero_in_degree: bool,
    pub is_single_in_degree: bool,
    pub is_dead_end: bool,
    pub is_bridge: bool,
}

/// The one role a node is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeRole {
    SingleInDegree,
    ZeroInDegree,
    Bridge,
    DeadEnd,
    Default,
}

impl NodeClassification {
    #[must_use]
    pub const fn role(&self) -> NodeRole {
        if self.is_single_in_degree {
            NodeRole::SingleInDegree
        } else if self.is_zero_in_degree {
            NodeRole::ZeroInDegree
        } else if self.is_bridge {
            NodeRole::Bridge
        } else if self.is_dead_end {
            NodeRole::DeadEnd
        } else {
            NodeRole::Default
        }
    }
}

/// Structural flags for one directed edge `from → to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EdgeClassification {
    pub from: NodeId,
    pub to: NodeId,
    /// `to → from` exists as well.
    pub is_bidirectional: bool,
    /// `to` stays reachable from `from` without this edge.
    pub is_redundant: bool,
    /// `from` has no incoming edges.
    pub is_from_zero_in_degree: bool,
}

/// The one style an edge is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Redundant,
    Bidirectional,
    FromZeroInDegree,
    Default,
}

impl EdgeClassification {
    #[must_use]
    pub const fn kind(&self) -> EdgeKind {
        if self.is_redundant {
            EdgeKind::Redundant
        } else if self.is_bidirectional {
            EdgeKind::Bidirectional
        } else if self.is_from_zero_in_degree {
            EdgeKind::FromZeroInDegree
        } else {
            EdgeKind::Default
        }
    }
}

/// Classification of a whole matrix snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphAnalysis {
    /// One entry per node, indexed by [`NodeId`].
    pub nodes: Vec<NodeClassification>,
    /// One entry per edge, in row-major order.
    pub edges: Vec<EdgeClassification>,
}

// ---------------------------------------------------------------------------
// Core computation
// ---------------------------------------------------------------------------

/// Classify every node and edge of `matrix`.
#[must_use]
#[instrument(skip(matrix), fields(n = matrix.node_count()))]
pub fn analyze(matrix: &AdjacencyMatrix) -> GraphAnalysis {
    let nodes = classify_nodes(matrix);
    let redundant = find_redundant_edges(matrix);

    let edges: Vec<EdgeClassification> = matrix
        .edges()
        .map(|(from, to)| classify_edge(matrix, &nodes, from, to, redundant.has_edge(from, to)))
        .collect();

    debug!(nodes = nodes.len(), edges = edges.len(), "graph classified");
    GraphAnalysis { nodes, edges }
}

/// Node flags only (degree scan plus bridge detection).
#[must_use]
pub fn classify_nodes(matrix: &AdjacencyMatrix) -> Vec<NodeClassification> {
    let degrees = degree_table(matrix);
    let bridges = find_bridge_nodes(matrix);

    degrees
        .iter()
        .enumerate()
        .map(|(node, degree)| NodeClassification {
            node,
            is_zero_in_degree: degree.is_zero_in(),
            is_single_in_degree: degree.is_single_in(),
            is_dead_end: degree.is_dead_end(),
            is_bridge: bridges.binary_search(&node).is_ok(),
        })
        .collect()
}

/// Tag a single edge given already-computed node flags.
///
/// `redundant` is supplied by the caller: whole-graph classification passes
/// the result of redundant-edge detection, path views pass `false`.
#[must_use]
pub fn classify_edge(
    matrix: &AdjacencyMatrix,
    nodes: &[NodeClassification],
    from: NodeId,
    to: NodeId,
    redundant: bool,
) -> EdgeClassification {
    EdgeClassification {
        from,
        to,
        is_bidirectional: matrix.has_edge(to, from),
        is_redundant: redundant,
        is_from_zero_in_degree: nodes.get(from).is_some_and(|n| n.is_zero_in_degree),
    }
}

/// Edge tags for consecutive pairs of a covering path only.
#[must_use]
pub fn classify_path_edges(
    matrix: &AdjacencyMatrix,
    nodes: &[NodeClassification],
    path: &[NodeId],
) -> Vec<EdgeClassification> {
    path.windows(2)
        .map(|pair| classify_edge(matrix, nodes, pair[0], pair[1], false))
        .collect()
}

impl GraphAnalysis {
    /// Number of zero in-degree nodes.
    #[must_use]
    pub fn zero_in_degree_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_zero_in_degree).count()
    }

    /// Number of dead-end nodes.
    #[must_use]
    pub fn dead_end_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_dead_end).count()
    }

    /// Bridge nodes, ascending.
    #[must_use]
    pub fn bridges(&self) -> Vec<NodeId> {
        self.nodes.iter().filter(|n| n.is_bridge).map(|n| n.node).collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(n: usize, edges: &[(NodeId, NodeId)]) -> AdjacencyMatrix {
        AdjacencyMatrix::from_edges(n, edges).expect("valid edges")
    }

    #[test]
    fn role_precedence() {
        let base = NodeClassification {
            node: 0,
            is_zero_in_degree: true,
            is_single_in_degree: true,
            is_dead_end: true,
            is_bridge: true,
        };
        assert_eq!(base.role(), NodeRole::SingleInDegree);

        let n = NodeClassification {
            is_single_in_degree: false,
            ..base
        };
        assert_eq!(n.role(), NodeRole::ZeroInDegree);

        let n = NodeClassification {
            is_zero_in_degree: false,
            ..n
        };
        assert_eq!(n.role(), NodeRole::Bridge);

        let n = NodeClassification {
            is_bridge: false,
            ..n
        };
        assert_eq!(n.role(), NodeRole::DeadEnd);

        let n = NodeClassification {
            is_dead_end: false,
            ..n
        };
        assert_eq!(n.role(), NodeRole::Default);
    }

    #[test]
    fn edge_kind_precedence() {
        let e = EdgeClassification {
            from: 0,
            to: 1,
            is_bidirectional: true,
            is_redundant: true,
            is_from_zero_in_degree: true,
        };
        assert_eq!(e.kind(), EdgeKind::Redundant);
        let e = EdgeClassification {
            is_redundant: false,
            ..e
        };
        assert_eq!(e.kind(), EdgeKind::Bidirectional);
        let e = EdgeClassification {
            is_bidirectional: false,
            ..e
        };
        assert_eq!(e.kind(), EdgeKind::FromZeroInDegree);
        let e = EdgeClassification {
            is_from_zero_in_degree: false,
            ..e
        };
        assert_eq!(e.kind(), EdgeKind::Default);
    }

    #[test]
    fn star_classification() {
        let m = matrix(4, &[(0, 1), (0, 2), (0, 3)]);
        let analysis = analyze(&m);

        assert!(analysis.nodes[0].is_zero_in_degree);
        assert_eq!(analysis.nodes[0].role(), NodeRole::ZeroInDegree);
        for leaf in 1..4 {
            assert!(analysis.nodes[leaf].is_dead_end);
            assert!(analysis.nodes[leaf].is_single_in_degree);
        }
        assert_eq!(analysis.zero_in_degree_count(), 1);
        assert_eq!(analysis.dead_end_count(), 3);
        assert!(analysis.edges.iter().all(|e| e.kind() == EdgeKind::FromZeroInDegree));
    }

    #[test]
    fn bidirectional_and_redundant_tags() {
        // 0 ⇄ 1, 1 → 2, 0 → 2: 0 → 2 is redundant via 0 → 1 → 2 and
        // 1 → 2 is redundant via 1 → 0 → 2.
        let m = matrix(3, &[(0, 1), (1, 0), (1, 2), (0, 2)]);
        let analysis = analyze(&m);
        let find = |from, to| {
            analysis
                .edges
                .iter()
                .find(|e| e.from == from && e.to == to)
                .copied()
                .expect("edge present")
        };
        assert!(find(0, 1).is_bidirectional);
        assert!(find(1, 0).is_bidirectional);
        assert!(find(0, 2).is_redundant);
        assert!(find(1, 2).is_redundant);
        assert_eq!(find(1, 2).kind(), EdgeKind::Redundant);
        assert_eq!(analysis.edges.len(), 4);
    }

    #[test]
    fn shortcut_is_redundant_but_chain_edges_are_not() {
        // 0 ⇄ 1 → 2 → 3 with shortcut 0 → 3. Node 3 is a dead end, so only
        // the shortcut has an alternate path.
        let m = matrix(4, &[(0, 1), (1, 0), (1, 2), (2, 3), (0, 3)]);
        let analysis = analyze(&m);
        let redundant: Vec<_> = analysis
            .edges
            .iter()
            .filter(|e| e.is_redundant)
            .map(|e| (e.from, e.to))
            .collect();
        assert_eq!(redundant, vec![(0, 3)]);
        let back = analysis
            .edges
            .iter()
            .find(|e| e.from == 1 && e.to == 0)
            .expect("edge present");
        assert_eq!(back.kind(), EdgeKind::Bidirectional);
    }

    #[test]
    fn path_edges_never_carry_redundancy() {
        let m = matrix(3, &[(0, 1), (1, 2), (0, 2)]);
        let nodes = classify_nodes(&m);
        let edges = classify_path_edges(&m, &nodes, &[0, 1, 2]);
        assert_eq!(edges.len(), 2);
        assert!(edges.iter().all(|e| !e.is_redundant));
        assert!(edges[0].is_from_zero_in_degree);
        assert!(!edges[1].is_from_zero_in_degree);
    }

    #[test]
    fn analysis_is_idempotent() {
        let m = matrix(5, &[(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (1, 3)]);
        assert_eq!(analyze(&m), analyze(&m));
    }
}

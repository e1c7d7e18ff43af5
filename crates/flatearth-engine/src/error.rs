//! Engine error type.
//!
//! Every variant is a recoverable, user-facing condition: the operation that
//! raised it aborts without touching the matrix, classification, or layout
//! held by the caller.

use crate::graph::NodeId;

/// Convenience alias used across the engine.
pub type Result<T, E = EngineError> = std::result::Result<T, E>;

/// Errors surfaced by the analysis, routing, and session layers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// More than one start (zero in-degree) or end (dead-end) node when a
    /// single covering path is required.
    #[error(
        "graph has too many start or end points ({zero_in_degree} zero in-degree, {dead_ends} dead-end)"
    )]
    InvalidTopology {
        /// Number of zero in-degree nodes.
        zero_in_degree: usize,
        /// Number of dead-end (zero out-degree) nodes.
        dead_ends: usize,
    },

    /// No covering path exists, the optimizer returned nothing, or the
    /// returned sequence failed adjacency validation.
    #[error("{}", no_route_message(*start))]
    NoFeasibleRoute {
        /// Start node that was requested, if any.
        start: Option<NodeId>,
    },

    /// The graph has no nodes.
    #[error("graph is empty")]
    EmptyGraph,

    /// Matrix text or rows could not be turned into a square 0/1 matrix.
    #[error("malformed adjacency matrix at row {row}: {reason}")]
    MalformedMatrix {
        /// 1-based row number where the problem was found.
        row: usize,
        /// What was wrong with the row.
        reason: String,
    },

    /// A node index outside `[0, n)`.
    #[error("node {node} out of range (graph has {node_count} nodes)")]
    NodeOutOfRange {
        /// Offending node index.
        node: NodeId,
        /// Number of nodes in the current snapshot.
        node_count: usize,
    },

    /// A covering-route request is already outstanding for this session.
    #[error("a route request is already in flight")]
    RouteInFlight,

    /// The optimizer answered for a matrix snapshot that has since changed.
    #[error("route result is stale (requested at revision {requested}, current {current})")]
    StaleRoute {
        /// Revision captured when the request was issued.
        requested: u64,
        /// Revision of the session when the answer arrived.
        current: u64,
    },

    /// Path navigation was requested before any route set was computed.
    #[error("no covering paths are loaded")]
    NoActivePaths,
}

fn no_route_message(start: Option<NodeId>) -> String {
    match start {
        Some(node) => format!("impossible to cover all nodes starting at node {}", node + 1),
        None => "impossible to cover all nodes".to_string(),
    }
}

impl EngineError {
    /// Stable machine-readable identifier for front ends and scripts.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidTopology { .. } => "invalid_topology",
            Self::NoFeasibleRoute { .. } => "no_feasible_route",
            Self::EmptyGraph => "empty_graph",
            Self::MalformedMatrix { .. } => "malformed_matrix",
            Self::NodeOutOfRange { .. } => "node_out_of_range",
            Self::RouteInFlight => "route_in_flight",
            Self::StaleRoute { .. } => "stale_route",
            Self::NoActivePaths => "no_active_paths",
        }
    }

    /// Optional remediation hint shown next to the message.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        match self {
            Self::InvalidTopology { .. } => Some(
                "Ensure at most one start node (zero in-degree) and one end node (zero out-degree).",
            ),
            Self::NoFeasibleRoute { .. } => {
                Some("Pick another start node or add edges so every node can be chained.")
            }
            Self::EmptyGraph => Some("Add at least one location."),
            Self::MalformedMatrix { .. } => {
                Some("Each row must list exactly n entries of 0 or 1 for n rows.")
            }
            Self::NodeOutOfRange { .. } => Some("Node numbers start at 1."),
            Self::RouteInFlight => Some("Wait for the outstanding request to finish."),
            Self::StaleRoute { .. } => Some("Request the route again for the current graph."),
            Self::NoActivePaths => Some("Compute all routes before navigating them."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::EngineError;
    use std::collections::HashSet;

    #[test]
    fn all_codes_are_unique() {
        let all = [
            EngineError::InvalidTopology {
                zero_in_degree: 2,
                dead_ends: 0,
            },
            EngineError::NoFeasibleRoute { start: None },
            EngineError::EmptyGraph,
            EngineError::MalformedMatrix {
                row: 1,
                reason: String::new(),
            },
            EngineError::NodeOutOfRange {
                node: 4,
                node_count: 2,
            },
            EngineError::RouteInFlight,
            EngineError::StaleRoute {
                requested: 1,
                current: 2,
            },
            EngineError::NoActivePaths,
        ];
        let codes: HashSet<&str> = all.iter().map(EngineError::code).collect();
        assert_eq!(codes.len(), all.len());
    }

    #[test]
    fn no_route_message_uses_display_number() {
        let err = EngineError::NoFeasibleRoute { start: Some(0) };
        assert_eq!(err.to_string(), "impossible to cover all nodes starting at node 1");
        let err = EngineError::NoFeasibleRoute { start: None };
        assert_eq!(err.to_string(), "impossible to cover all nodes");
    }
}

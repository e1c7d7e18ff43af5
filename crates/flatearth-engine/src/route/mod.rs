//! Covering-path service.
//!
//! # Overview
//!
//! A covering path visits every node exactly once along existing edges.
//! Two request shapes are supported:
//!
//! - **Single route** ([`single_route`]): check the topology precondition,
//!   hand a [`DistanceMatrix`] to a [`RouteExplorer`], and validate whatever
//!   comes back.
//! - **All routes** ([`all_routes`]): same precondition, then exhaustive
//!   enumeration; the result feeds a [`PathCursor`].
//!
//! The only matrix mutation lives in [`convert`], as a separate explicit
//! transform.
//!
//! ```text
//! AdjacencyMatrix ─┬─ validate::check_topology()
//!                  ├─ DistanceMatrix ─→ RouteExplorer ─→ validate::validate_route()
//!                  └─ enumerate::enumerate_covering_paths() ─→ PathCursor
//! ```

pub mod convert;
pub mod cursor;
pub mod distance;
pub mod enumerate;
pub mod explorer;
pub mod validate;

pub use convert::{convert_zero_in_node, convert_zero_in_nodes};
pub use cursor::{PathCommand, PathCursor};
pub use distance::{DistanceMatrix, NO_EDGE};
pub use enumerate::{enumerate_covering_paths, find_covering_path};
pub use explorer::{BacktrackingExplorer, RouteExplorer};
pub use validate::{check_topology, is_covering_path, validate_route};

use tracing::{info, instrument};

use crate::config::RouteConfig;
use crate::error::{EngineError, Result};
use crate::graph::{AdjacencyMatrix, NodeId};

/// Shared checks for both request shapes.
///
/// # Errors
///
/// [`EngineError::EmptyGraph`], [`EngineError::NodeOutOfRange`], or
/// [`EngineError::InvalidTopology`].
pub fn check_route_request(matrix: &AdjacencyMatrix, start: Option<NodeId>) -> Result<()> {
    if matrix.is_empty() {
        return Err(EngineError::EmptyGraph);
    }
    if let Some(node) = start {
        matrix.check_node(node)?;
    }
    check_topology(matrix)
}

/// Ask `explorer` for one covering path from `start` and validate it.
///
/// # Errors
///
/// Any [`check_route_request`] failure, or [`EngineError::NoFeasibleRoute`]
/// when the explorer answers `None` or an invalid sequence.
#[instrument(skip(explorer, matrix), fields(n = matrix.node_count()))]
pub async fn single_route<E>(explorer: &E, matrix: &AdjacencyMatrix, start: NodeId) -> Result<Vec<NodeId>>
where
    E: RouteExplorer + Sync,
{
    check_route_request(matrix, Some(start))?;
    let distances = DistanceMatrix::from_adjacency(matrix);
    let route = explorer
        .solve_covering_route(&distances, start)
        .await
        .ok_or(EngineError::NoFeasibleRoute { start: Some(start) })?;
    validate_route(matrix, &route, Some(start))?;
    info!(start, "covering route found");
    Ok(route)
}

/// Every covering path, optionally fixed to `start`, validated.
///
/// # Errors
///
/// Any [`check_route_request`] failure, or [`EngineError::NoFeasibleRoute`]
/// when no covering path exists.
pub fn all_routes(
    matrix: &AdjacencyMatrix,
    start: Option<NodeId>,
    config: &RouteConfig,
) -> Result<Vec<Vec<NodeId>>> {
    check_route_request(matrix, start)?;
    let paths = enumerate_covering_paths(matrix, start, config.max_paths);
    if paths.is_empty() {
        return Err(EngineError::NoFeasibleRoute { start });
    }
    for path in &paths {
        validate_route(matrix, path, start)?;
    }
    info!(count = paths.len(), "covering routes enumerated");
    Ok(paths)
}

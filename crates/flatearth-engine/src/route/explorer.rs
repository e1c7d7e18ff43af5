//! Route-optimizer collaborator boundary.

use std::future::Future;

use tracing::{debug, warn};

use crate::graph::NodeId;

use super::distance::DistanceMatrix;
use super::enumerate::find_covering_path;

/// Anything that can propose a route visiting every node from `start`.
///
/// Implementations are best-effort: the answer is validated against the
/// adjacency before use, so a wrong or partial sequence is reported as
/// "no feasible route" rather than trusted.
pub trait RouteExplorer {
    /// Ordered node sequence beginning at `start`, or `None`.
    fn solve_covering_route(
        &self,
        distances: &DistanceMatrix,
        start: NodeId,
    ) -> impl Future<Output = Option<Vec<NodeId>>> + Send;
}

/// In-process explorer: the first covering path found by depth-first
/// search, giving up after `step_budget` search steps.
///
/// The search runs on Tokio's blocking pool once the future is polled, so
/// it must be awaited inside a Tokio runtime. A current-thread runtime is
/// enough.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BacktrackingExplorer {
    pub step_budget: usize,
}

impl BacktrackingExplorer {
    pub const DEFAULT_STEP_BUDGET: usize = 1_000_000;

    #[must_use]
    pub const fn with_budget(step_budget: usize) -> Self {
        Self { step_budget }
    }
}

impl Default for BacktrackingExplorer {
    fn default() -> Self {
        Self::with_budget(Self::DEFAULT_STEP_BUDGET)
    }
}

impl RouteExplorer for BacktrackingExplorer {
    fn solve_covering_route(
        &self,
        distances: &DistanceMatrix,
        start: NodeId,
    ) -> impl Future<Output = Option<Vec<NodeId>>> + Send {
        let step_budget = self.step_budget;
        async move {
            let adjacency = distances.to_adjacency();
            let search = tokio::task::spawn_blocking(move || {
                find_covering_path(&adjacency, start, step_budget)
            });
            match search.await {
                Ok(route) => {
                    debug!(start, found = route.is_some(), "backtracking explorer finished");
                    route
                }
                Err(err) => {
                    warn!(start, error = %err, "backtracking search did not complete");
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::AdjacencyMatrix;

    fn ring(n: usize) -> DistanceMatrix {
        let edges: Vec<_> = (0..n).map(|i| (i, (i + 1) % n)).collect();
        DistanceMatrix::from_adjacency(&AdjacencyMatrix::from_edges(n, &edges).expect("edges"))
    }

    #[test]
    fn answers_on_a_current_thread_runtime() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("runtime");
        let route = runtime.block_on(BacktrackingExplorer::default().solve_covering_route(&ring(5), 3));
        assert_eq!(route, Some(vec![3, 4, 0, 1, 2]));
    }

    #[tokio::test]
    async fn exhausted_budget_yields_nothing() {
        let route = BacktrackingExplorer::with_budget(1)
            .solve_covering_route(&ring(6), 0)
            .await;
        assert_eq!(route, None);
    }
}

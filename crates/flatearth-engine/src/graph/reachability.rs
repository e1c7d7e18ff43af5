//! Directed-reachability analysis: bridge nodes and redundant edges.
//!
//! # Bridge Nodes
//!
//! A node `r` is a *bridge* when removing it strictly shrinks the reachable
//! set of some other node `i`, beyond the loss of `r` itself:
//!
//! ```text
//! expected(i, r) = |Reach(i)| − [r ∈ Reach(i)]
//! bridge(r)      ⇔ ∃ i ≠ r : |Reach_{G − r}(i)| < expected(i, r)
//! ```
//!
//! This is a directed notion, not undirected articulation points: a node on
//! the only route `a → r → b` is a bridge even when the underlying
//! undirected graph is biconnected. The cost is `O(n)` traversals per
//! candidate, i.e. `O(n² · (n + e))` overall, which is fine for the tens of
//! locations this engine is used with.
//!
//! # Redundant Edges
//!
//! An edge `i → j` is *redundant* when `j` stays reachable from `i` with that
//! single edge removed. Each edge is tested independently on an
//! [`EdgeFiltered`] view, so the caller's matrix is never modified.

use fixedbitset::FixedBitSet;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Bfs, Dfs, EdgeFiltered, EdgeRef, NodeFiltered};
use tracing::{debug, instrument};

use super::matrix::{AdjacencyMatrix, NodeId};

/// Reachable set of every node (each set includes the node itself).
#[must_use]
pub fn reachability_closure(matrix: &AdjacencyMatrix) -> Vec<FixedBitSet> {
    let graph = matrix.to_digraph();
    (0..matrix.node_count())
        .map(|start| reach(&graph, start))
        .collect()
}

/// Nodes whose removal strictly reduces some other node's reachable set.
///
/// Returned ascending.
#[must_use]
#[instrument(skip(matrix), fields(n = matrix.node_count()))]
pub fn find_bridge_nodes(matrix: &AdjacencyMatrix) -> Vec<NodeId> {
    let graph = matrix.to_digraph();
    let n = matrix.node_count();
    let full: Vec<FixedBitSet> = (0..n).map(|start| reach(&graph, start)).collect();

    let bridges: Vec<NodeId> = (0..n)
        .filter(|&removed| is_bridge(&graph, &full, removed))
        .collect();

    debug!(count = bridges.len(), "bridge nodes found");
    bridges
}

/// Edges `i → j` for which a path `i ⇝ j` survives removal of the edge.
///
/// The result is a matrix whose set cells are a subset of `matrix`'s edges.
#[must_use]
#[instrument(skip(matrix), fields(n = matrix.node_count(), e = matrix.edge_count()))]
pub fn find_redundant_edges(matrix: &AdjacencyMatrix) -> AdjacencyMatrix {
    let graph = matrix.to_digraph();
    let mut redundant = AdjacencyMatrix::with_nodes(matrix.node_count());

    for (from, to) in matrix.edges() {
        if has_alternate_path(&graph, from, to) {
            redundant.set_edge(from, to, true);
        }
    }

    debug!(count = redundant.edge_count(), "redundant edges found");
    redundant
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn reach(graph: &DiGraph<NodeId, ()>, start: NodeId) -> FixedBitSet {
    let mut visited = FixedBitSet::with_capacity(graph.node_count());
    let mut dfs = Dfs::new(graph, NodeIndex::new(start));
    while let Some(node) = dfs.next(graph) {
        visited.insert(node.index());
    }
    visited
}

/// Reachable set from `start` when traversal may not step onto `blocked`.
fn reach_avoiding(graph: &DiGraph<NodeId, ()>, start: NodeId, blocked: NodeId) -> FixedBitSet {
    let view = NodeFiltered::from_fn(graph, |node: NodeIndex| node.index() != blocked);
    let mut visited = FixedBitSet::with_capacity(graph.node_count());
    let mut dfs = Dfs::new(&view, NodeIndex::new(start));
    while let Some(node) = dfs.next(&view) {
        visited.insert(node.index());
    }
    visited
}

fn is_bridge(graph: &DiGraph<NodeId, ()>, full: &[FixedBitSet], removed: NodeId) -> bool {
    (0..full.len()).filter(|&i| i != removed).any(|i| {
        let expected = full[i].count_ones(..) - usize::from(full[i].contains(removed));
        reach_avoiding(graph, i, removed).count_ones(..) < expected
    })
}

/// Breadth-first search for `from ⇝ to` ignoring the direct edge.
fn has_alternate_path(graph: &DiGraph<NodeId, ()>, from: NodeId, to: NodeId) -> bool {
    let view = EdgeFiltered::from_fn(graph, |edge| {
        !(edge.source().index() == from && edge.target().index() == to)
    });
    let target = NodeIndex::new(to);
    let mut bfs = Bfs::new(&view, NodeIndex::new(from));
    while let Some(node) = bfs.next(&view) {
        if node == target {
            return true;
        }
    }
    false
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Graph model and structural analysis.
//!
//! # Overview
//!
//! Everything here is a pure function of an [`AdjacencyMatrix`] snapshot.
//! Nothing mutates the caller's matrix: checks that need "the graph without
//! X" run on filtered petgraph views instead of editing cells in place.
//!
//! ## Pipeline
//!
//! ```text
//! AdjacencyMatrix
//!        ↓  matrix::AdjacencyMatrix::to_digraph()
//! DiGraph<NodeId, ()>
//!   ├─ reachability::find_bridge_nodes()     (directed reachability cut nodes)
//!   ├─ reachability::find_redundant_edges()  (edges with an alternate path)
//!   └─ degree::degree_table()                (in/out degree scan)
//!        ↓  classify::analyze()
//! GraphAnalysis (per-node roles, per-edge tags)
//!
//! AdjacencyMatrix
//!        ↓  shortest::ShortestPathTable::compute()
//! ShortestPathTable (Floyd–Warshall hop counts, +∞ if unreachable)
//! ```

pub mod classify;
pub mod degree;
pub mod matrix;
pub mod reachability;
pub mod shortest;

// Re-export primary types at module level for convenience.
pub use classify::{EdgeClassification, EdgeKind, GraphAnalysis, NodeClassification, NodeRole};
pub use degree::{NodeDegree, dead_end_nodes, degree_table, zero_in_degree_nodes};
pub use matrix::{AdjacencyMatrix, NodeId};
pub use reachability::{find_bridge_nodes, find_redundant_edges, reachability_closure};
pub use shortest::ShortestPathTable;

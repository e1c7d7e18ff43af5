//! Square boolean adjacency matrix and its conversions.
//!
//! # Edge Direction
//!
//! `M[i][j] = true` means a directed edge `i → j`. Node `i` corresponds to
//! row/column `i`; the 1-based display number (`i + 1`) is only used by
//! presentation code.
//!
//! # Self-loops
//!
//! The diagonal is always `false`. Constructors clear any self-loop they are
//! handed (logging a warning) and [`AdjacencyMatrix::set_edge`] ignores
//! diagonal writes, so every algorithm may assume `M[i][i] = false`.
//!
//! # Text Format
//!
//! ```text
//! # 0 → 1 → 2 → 0
//! 0 1 0
//! 0 0 1
//! 1 0 0
//! ```
//!
//! Cells are `0` or `1`, separated by whitespace and/or commas. `#` starts a
//! comment; blank lines are skipped.

use std::fmt;

use petgraph::graph::{DiGraph, NodeIndex};
use tracing::warn;

use crate::error::{EngineError, Result};

/// Row/column index of a node, in `[0, n)`.
pub type NodeId = usize;

/// Immutable-by-convention snapshot of a directed, unweighted graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct AdjacencyMatrix {
    n: usize,
    cells: Vec<bool>,
}

impl AdjacencyMatrix {
    /// A graph with `n` nodes and no edges.
    #[must_use]
    pub fn with_nodes(n: usize) -> Self {
        Self {
            n,
            cells: vec![false; n * n],
        }
    }

    /// Build from boolean rows.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MalformedMatrix`] if any row length differs
    /// from the number of rows.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self> {
        let n = rows.len();
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.as_ref().len() != n) {
            return Err(EngineError::MalformedMatrix {
                row: i + 1,
                reason: format!("expected {n} entries, found {}", row.as_ref().len()),
            });
        }
        let mut matrix = Self::with_nodes(n);
        for (i, row) in rows.iter().enumerate() {
            for (j, &cell) in row.as_ref().iter().enumerate() {
                if cell && i == j {
                    warn!(node = i, "self-loop ignored");
                    continue;
                }
                matrix.cells[i * n + j] = cell;
            }
        }
        Ok(matrix)
    }

    /// Build an `n`-node matrix from an edge list.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NodeOutOfRange`] if an endpoint is `>= n`.
    pub fn from_edges(n: usize, edges: &[(NodeId, NodeId)]) -> Result<Self> {
        let mut matrix = Self::with_nodes(n);
        for &(from, to) in edges {
            matrix.check_node(from)?;
            matrix.check_node(to)?;
            if from == to {
                warn!(node = from, "self-loop ignored");
                continue;
            }
            matrix.set_edge(from, to, true);
        }
        Ok(matrix)
    }

    /// Parse the plain-text grid format described in the module docs.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MalformedMatrix`] for non-`0`/`1` cells or a
    /// non-square grid.
    pub fn parse(text: &str) -> Result<Self> {
        let mut rows: Vec<Vec<bool>> = Vec::new();
        for line in text.lines() {
            let content = line.split('#').next().unwrap_or_default().trim();
            if content.is_empty() {
                continue;
            }
            let row = content
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|token| !token.is_empty())
                .map(|token| match token {
                    "0" => Ok(false),
                    "1" => Ok(true),
                    other => Err(EngineError::MalformedMatrix {
                        row: rows.len() + 1,
                        reason: format!("cell `{other}` is not 0 or 1"),
                    }),
                })
                .collect::<Result<Vec<bool>>>()?;
            rows.push(row);
        }
        Self::from_rows(&rows)
    }

    /// Number of nodes `n`.
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.n
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// `true` if the directed edge `from → to` exists. Out-of-range indices
    /// read as `false`.
    #[must_use]
    pub fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
        from < self.n && to < self.n && self.cells[from * self.n + to]
    }

    /// Add or remove `from → to`. Diagonal and out-of-range writes are ignored.
    pub fn set_edge(&mut self, from: NodeId, to: NodeId, present: bool) {
        if from < self.n && to < self.n && from != to {
            self.cells[from * self.n + to] = present;
        }
    }

    /// All edges in row-major order.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        (0..self.n).flat_map(move |i| self.successors(i).map(move |j| (i, j)))
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Targets of edges leaving `node`, ascending.
    pub fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.n).filter(move |&j| self.has_edge(node, j))
    }

    /// Sources of edges entering `node`, ascending.
    pub fn predecessors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.n).filter(move |&i| self.has_edge(i, node))
    }

    /// Convert to a petgraph [`DiGraph`] whose `NodeIndex::index()` equals
    /// the matrix index and whose node weight is the same index.
    #[must_use]
    pub fn to_digraph(&self) -> DiGraph<NodeId, ()> {
        let mut graph = DiGraph::with_capacity(self.n, self.edge_count());
        for i in 0..self.n {
            graph.add_node(i);
        }
        for (from, to) in self.edges() {
            graph.add_edge(NodeIndex::new(from), NodeIndex::new(to), ());
        }
        graph
    }

    /// BLAKE3 hash of the node count and edge set, used to detect whether a
    /// long-running computation still refers to the current snapshot.
    #[must_use]
    pub fn content_hash(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(self.n as u64).to_le_bytes());
        for (from, to) in self.edges() {
            hasher.update(&(from as u64).to_le_bytes());
            hasher.update(&(to as u64).to_le_bytes());
        }
        format!("blake3:{}", hasher.finalize().to_hex())
    }

    /// Boolean rows, e.g. for serialization.
    #[must_use]
    pub fn rows(&self) -> Vec<Vec<bool>> {
        self.cells.chunks(self.n.max(1)).take(self.n).map(<[bool]>::to_vec).collect()
    }

    /// Error unless `node < n`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NodeOutOfRange`].
    pub fn check_node(&self, node: NodeId) -> Result<()> {
        if node < self.n {
            Ok(())
        } else {
            Err(EngineError::NodeOutOfRange {
                node,
                node_count: self.n,
            })
        }
    }
}

impl fmt::Display for AdjacencyMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.n {
            let row: Vec<&str> = (0..self.n)
                .map(|j| if self.has_edge(i, j) { "1" } else { "0" })
                .collect();
            writeln!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}

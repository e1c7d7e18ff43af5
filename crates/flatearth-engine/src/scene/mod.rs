//! Renderer-agnostic drawing model.
//!
//! [`build_scene`] combines node positions with a [`GraphAnalysis`] into
//! positioned node discs and inset, arrow-tipped edge segments. The scene is
//! rebuilt from scratch on every pass; nothing here is mutated
//! incrementally.
//!
//! # Edge Geometry
//!
//! For an edge from `a` to `b` with unit direction `u`:
//!
//! ```text
//! start = a + r·u
//! end   = b − r·u
//! wing± = end − L·(cos(θ ∓ φ), sin(θ ∓ φ))     θ = atan2(u), φ = half-angle
//! ```
//!
//! Coincident endpoints get `u = 0`, so the segment collapses to a point
//! instead of producing `NaN`.

pub mod actions;
pub mod style;

pub use actions::{ContextAction, context_actions};
pub use style::{Color, LegendEntry, Stroke, legend};

use serde::Serialize;
use tracing::{debug, instrument};

use crate::config::SceneConfig;
use crate::graph::classify::classify_path_edges;
use crate::graph::{AdjacencyMatrix, EdgeClassification, EdgeKind, GraphAnalysis, NodeId, NodeRole};
use crate::layout::Position;

use style::{arrow_fill, edge_stroke, role_color};

/// Which edges the scene draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeSet<'a> {
    /// Every edge of the matrix, with redundancy tags.
    All,
    /// Only consecutive pairs of a covering path, never tagged redundant.
    Path(&'a [NodeId]),
}

/// A node disc.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeVisual {
    pub node: NodeId,
    /// 1-based number shown to the user.
    pub display_number: usize,
    /// Location name, or the display number when unnamed.
    pub label: String,
    pub center: Position,
    pub radius: f64,
    pub role: NodeRole,
    pub color: Color,
}

impl NodeVisual {
    /// Hit test against the square circumscribing the disc.
    #[must_use]
    pub fn contains(&self, point: Position) -> bool {
        (point.x - self.center.x).abs() <= self.radius && (point.y - self.center.y).abs() <= self.radius
    }
}

/// A directed edge segment with its arrowhead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeVisual {
    pub from: NodeId,
    pub to: NodeId,
    pub start: Position,
    pub end: Position,
    /// Tip followed by the two wings.
    pub arrowhead: [Position; 3],
    pub kind: EdgeKind,
    pub stroke: Stroke,
    pub arrow_fill: Color,
}

/// Everything the presentation layer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub nodes: Vec<NodeVisual>,
    pub edges: Vec<EdgeVisual>,
    /// The covering path whose edges are shown, if any.
    pub active_path: Option<Vec<NodeId>>,
}

impl Scene {
    /// First node whose hit region contains `point`.
    #[must_use]
    pub fn node_at(&self, point: Position) -> Option<NodeId> {
        self.nodes.iter().find(|n| n.contains(point)).map(|n| n.node)
    }
}

/// Build the scene for `positions` (one per node).
///
/// `names` is matched to nodes by index; missing or blank names fall back
/// to the display number.
#[must_use]
#[instrument(skip_all, fields(n = matrix.node_count()))]
pub fn build_scene(
    matrix: &AdjacencyMatrix,
    analysis: &GraphAnalysis,
    positions: &[Position],
    edges: EdgeSet<'_>,
    names: &[String],
    config: &SceneConfig,
) -> Scene {
    let nodes: Vec<NodeVisual> = analysis
        .nodes
        .iter()
        .zip(positions)
        .map(|(class, &center)| {
            let role = class.role();
            let display_number = class.node + 1;
            let label = names
                .get(class.node)
                .map(String::as_str)
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map_or_else(|| display_number.to_string(), str::to_string);
            NodeVisual {
                node: class.node,
                display_number,
                label,
                center,
                radius: config.node_radius,
                role,
                color: role_color(role),
            }
        })
        .collect();

    let (tags, active_path) = match edges {
        EdgeSet::All => (analysis.edges.clone(), None),
        EdgeSet::Path(path) => (
            classify_path_edges(matrix, &analysis.nodes, path),
            Some(path.to_vec()),
        ),
    };

    let edges: Vec<EdgeVisual> = tags
        .iter()
        .filter_map(|tag| {
            let from = positions.get(tag.from)?;
            let to = positions.get(tag.to)?;
            Some(edge_visual(tag, *from, *to, config))
        })
        .collect();

    debug!(nodes = nodes.len(), edges = edges.len(), "scene built");
    Scene {
        nodes,
        edges,
        active_path,
    }
}

fn edge_visual(tag: &EdgeClassification, from: Position, to: Position, config: &SceneConfig) -> EdgeVisual {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let length = dx.hypot(dy);
    let (ux, uy) = if length > f64::EPSILON {
        (dx / length, dy / length)
    } else {
        (0.0, 0.0)
    };

    let r = config.node_radius;
    let start = Position::new(ux.mul_add(r, from.x), uy.mul_add(r, from.y));
    let end = Position::new((-ux).mul_add(r, to.x), (-uy).mul_add(r, to.y));

    let angle = uy.atan2(ux);
    let wing = |offset: f64| {
        Position::new(
            (-config.arrow_length).mul_add((angle + offset).cos(), end.x),
            (-config.arrow_length).mul_add((angle + offset).sin(), end.y),
        )
    };
    let arrowhead = [end, wing(-config.arrow_half_angle), wing(config.arrow_half_angle)];

    let kind = tag.kind();
    EdgeVisual {
        from: tag.from,
        to: tag.to,
        start,
        end,
        arrowhead,
        kind,
        stroke: edge_stroke(kind),
        arrow_fill: arrow_fill(tag.is_bidirectional),
    }
}

//! Context actions offered at a canvas location.

use serde::Serialize;

use crate::graph::{GraphAnalysis, NodeId};
use crate::layout::Position;

use super::Scene;

/// Command the presentation layer binds to a menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ContextAction {
    /// Enumerate covering paths, optionally fixed to a start node.
    ShowAllRoutes { start: Option<NodeId> },
    /// Add reverse edges for one zero in-degree node.
    ConvertZeroInNode { node: NodeId },
    /// Add reverse edges for every zero in-degree node.
    ConvertZeroInNodes,
}

impl ContextAction {
    /// Menu text, using 1-based node numbers.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::ShowAllRoutes { start: Some(node) } => format!("All Routes from {}", node + 1),
            Self::ShowAllRoutes { start: None } => "All Possible Routes".to_string(),
            Self::ConvertZeroInNode { node } => format!("Convert zero-in node {}", node + 1),
            Self::ConvertZeroInNodes => "Convert zero-in nodes".to_string(),
        }
    }
}

/// Actions for a click at `point`: per-node actions when it hits a node,
/// whole-graph actions on empty canvas.
#[must_use]
pub fn context_actions(scene: &Scene, analysis: &GraphAnalysis, point: Position) -> Vec<ContextAction> {
    match scene.node_at(point) {
        Some(node) => {
            let mut actions = vec![ContextAction::ShowAllRoutes { start: Some(node) }];
            if analysis.nodes.get(node).is_some_and(|n| n.is_zero_in_degree) {
                actions.push(ContextAction::ConvertZeroInNode { node });
            }
            actions
        }
        None => vec![
            ContextAction::ShowAllRoutes { start: None },
            ContextAction::ConvertZeroInNodes,
        ],
    }
}

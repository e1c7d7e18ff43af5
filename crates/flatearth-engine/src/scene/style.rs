//! Colours, stroke styles, and the legend derived from them.

use serde::Serialize;

use crate::graph::{EdgeKind, NodeRole};

/// Named colour used by the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    DarkGreen,
    Red,
    Orange,
    Brown,
    Black,
    OrangeRed,
    Blue,
    Gray,
}

impl Color {
    /// `#RRGGBB` form.
    #[must_use]
    pub const fn hex(self) -> &'static str {
        match self {
            Self::DarkGreen => "#006400",
            Self::Red => "#FF0000",
            Self::Orange => "#FFA500",
            Self::Brown => "#A52A2A",
            Self::Black => "#000000",
            Self::OrangeRed => "#FF4500",
            Self::Blue => "#0000FF",
            Self::Gray => "#808080",
        }
    }
}

/// Fill colour for a node role.
#[must_use]
pub const fn role_color(role: NodeRole) -> Color {
    match role {
        NodeRole::SingleInDegree => Color::DarkGreen,
        NodeRole::ZeroInDegree => Color::Red,
        NodeRole::Bridge => Color::Orange,
        NodeRole::DeadEnd => Color::Brown,
        NodeRole::Default => Color::Black,
    }
}

/// Line appearance for an edge kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    /// On/off dash lengths; solid when absent.
    pub dash: Option<[f64; 2]>,
}

#[must_use]
pub const fn edge_stroke(kind: EdgeKind) -> Stroke {
    match kind {
        EdgeKind::Redundant => Stroke {
            color: Color::OrangeRed,
            width: 2.0,
            dash: Some([4.0, 4.0]),
        },
        EdgeKind::Bidirectional => Stroke {
            color: Color::Blue,
            width: 4.0,
            dash: None,
        },
        EdgeKind::FromZeroInDegree => Stroke {
            color: Color::Red,
            width: 2.0,
            dash: None,
        },
        EdgeKind::Default => Stroke {
            color: Color::Gray,
            width: 2.0,
            dash: None,
        },
    }
}

/// Arrowheads are blue on bidirectional edges and gray otherwise,
/// independent of the shaft colour.
#[must_use]
pub const fn arrow_fill(is_bidirectional: bool) -> Color {
    if is_bidirectional { Color::Blue } else { Color::Gray }
}

/// One legend row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LegendEntry {
    Node {
        label: &'static str,
        color: Color,
    },
    Edge {
        label: &'static str,
        color: Color,
        dash: Option<[f64; 2]>,
    },
}

impl LegendEntry {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Node { label, .. } | Self::Edge { label, .. } => *label,
        }
    }

    #[must_use]
    pub const fn color(&self) -> Color {
        match self {
            Self::Node { color, .. } | Self::Edge { color, .. } => *color,
        }
    }
}

/// Node roles followed by edge styles, in display order.
#[must_use]
pub fn legend() -> Vec<LegendEntry> {
    let nodes = [
        (NodeRole::SingleInDegree, "Single In-Degree"),
        (NodeRole::ZeroInDegree, "Zero In-Degree"),
        (NodeRole::Bridge, "Bridge Node"),
        (NodeRole::DeadEnd, "Dead-End"),
        (NodeRole::Default, "Default Node"),
    ];
    let edges = [
        (EdgeKind::Default, "Default Edge"),
        (EdgeKind::Bidirectional, "Bidirectional Edge"),
        (EdgeKind::Redundant, "Redundant Edge"),
        (EdgeKind::FromZeroInDegree, "From Zero In-Degree"),
    ];

    nodes
        .into_iter()
        .map(|(role, label)| LegendEntry::Node {
            label,
            color: role_color(role),
        })
        .chain(edges.into_iter().map(|(kind, label)| {
            let stroke = edge_stroke(kind);
            LegendEntry::Edge {
                label,
                color: stroke.color,
                dash: stroke.dash,
            }
        }))
        .collect()
}

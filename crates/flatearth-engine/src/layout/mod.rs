//! Node placement strategies.
//!
//! # Overview
//!
//! Three interchangeable engines assign one [`Position`] per node on a
//! [`Canvas`]:
//!
//! | Mode                              | Input                          | Deterministic |
//! |-----------------------------------|--------------------------------|---------------|
//! | [`LayoutMode::Ellipse`]           | node count                     | yes           |
//! | [`LayoutMode::StressMajorization`]| shortest-path table            | yes           |
//! | [`LayoutMode::ForceDirected`]     | adjacency (either direction)   | only if seeded|
//!
//! All engines share one signature and are selected through
//! [`compute_layout`]. Every engine tolerates `n = 0` and `n = 1`, and the
//! dispatcher replaces any non-finite coordinate with the canvas centre so
//! `NaN` never reaches the scene.

pub mod ellipse;
pub mod force;
pub mod stress;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::config::LayoutConfig;
use crate::graph::{AdjacencyMatrix, ShortestPathTable};

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// A 2-D point in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Drawing surface size. Negative or non-finite dimensions collapse to zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Canvas {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        let sanitize = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        Self {
            width: sanitize(width),
            height: sanitize(height),
        }
    }

    #[must_use]
    pub fn center(self) -> Position {
        Position::new(self.width / 2.0, self.height / 2.0)
    }

    #[must_use]
    pub fn min_side(self) -> f64 {
        self.width.min(self.height)
    }

    #[must_use]
    pub fn area(self) -> f64 {
        self.width * self.height
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(1200.0, 800.0)
    }
}

// ---------------------------------------------------------------------------
// Mode selection
// ---------------------------------------------------------------------------

/// Closed set of layout strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    #[default]
    Ellipse,
    StressMajorization,
    ForceDirected,
}

impl LayoutMode {
    pub const ALL: [Self; 3] = [Self::Ellipse, Self::StressMajorization, Self::ForceDirected];

    /// `true` if the engine consumes a [`ShortestPathTable`].
    #[must_use]
    pub const fn needs_distances(self) -> bool {
        matches!(self, Self::StressMajorization)
    }

    /// Human-facing name, as shown in a layout picker.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ellipse => "Ellipse Layout",
            Self::StressMajorization => "Kamada-Kawai Layout",
            Self::ForceDirected => "Force Directed Layout",
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ellipse => "ellipse",
            Self::StressMajorization => "stress",
            Self::ForceDirected => "force",
        };
        f.write_str(name)
    }
}

impl FromStr for LayoutMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ellipse" | "circle" | "circular" => Ok(Self::Ellipse),
            "stress" | "stress-majorization" | "kamada-kawai" | "kk" => Ok(Self::StressMajorization),
            "force" | "force-directed" | "spring" => Ok(Self::ForceDirected),
            other => Err(format!(
                "unknown layout mode `{other}` (expected ellipse, stress, or force)"
            )),
        }
    }
}

/// Place every node of `matrix` on `canvas` using `mode`.
///
/// `distances` is only read by the stress engine; when it is absent (or was
/// computed for a different node count) the engine derives it itself.
#[must_use]
#[instrument(skip(matrix, distances, config), fields(n = matrix.node_count()))]
pub fn compute_layout(
    mode: LayoutMode,
    matrix: &AdjacencyMatrix,
    distances: Option<&ShortestPathTable>,
    canvas: Canvas,
    config: &LayoutConfig,
) -> Vec<Position> {
    let engine: fn(&AdjacencyMatrix, Option<&ShortestPathTable>, Canvas, &LayoutConfig) -> Vec<Position> =
        match mode {
            LayoutMode::Ellipse => ellipse::layout,
            LayoutMode::StressMajorization => stress::layout,
            LayoutMode::ForceDirected => force::layout,
        };
    let mut positions = engine(matrix, distances, canvas, config);

    let center = canvas.center();
    for (node, position) in positions.iter_mut().enumerate() {
        if !position.is_finite() {
            warn!(node, %mode, "non-finite coordinate replaced with canvas centre");
            *position = center;
        }
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parses_aliases() {
        assert_eq!("kamada-kawai".parse::<LayoutMode>(), Ok(LayoutMode::StressMajorization));
        assert_eq!("Force".parse::<LayoutMode>(), Ok(LayoutMode::ForceDirected));
        assert_eq!("ellipse".parse::<LayoutMode>(), Ok(LayoutMode::Ellipse));
        assert!("grid".parse::<LayoutMode>().is_err());
    }

    #[test]
    fn mode_display_round_trips() {
        for mode in LayoutMode::ALL {
            assert_eq!(mode.to_string().parse::<LayoutMode>(), Ok(mode));
        }
    }

    #[test]
    fn canvas_sanitizes_dimensions() {
        let c = Canvas::new(f64::NAN, -5.0);
        assert!(c.width.abs() < f64::EPSILON);
        assert!(c.height.abs() < f64::EPSILON);
    }

    #[test]
    fn every_mode_handles_empty_and_single_node() {
        let config = LayoutConfig::default();
        let canvas = Canvas::new(800.0, 600.0);
        for mode in LayoutMode::ALL {
            assert!(compute_layout(mode, &AdjacencyMatrix::with_nodes(0), None, canvas, &config).is_empty());
            let one = compute_layout(mode, &AdjacencyMatrix::with_nodes(1), None, canvas, &config);
            assert_eq!(one.len(), 1);
            assert!(one[0].is_finite(), "{mode}: {:?}", one[0]);
        }
    }

    #[test]
    fn zero_sized_canvas_stays_finite() {
        let config = LayoutConfig::default();
        let m = AdjacencyMatrix::from_edges(3, &[(0, 1), (1, 2)]).expect("edges");
        for mode in LayoutMode::ALL {
            let positions = compute_layout(mode, &m, None, Canvas::new(0.0, 0.0), &config);
            assert_eq!(positions.len(), 3);
            assert!(positions.iter().all(|p| p.is_finite()), "{mode}");
        }
    }
}

//! Closed-form ellipse placement.
//!
//! Node `i` sits at angle `2π·i/n` on an ellipse centred on the canvas with
//! radii `x_scale·r` and `y_scale·r`, where `r = min(width, height) / divisor`.
//! Every coordinate is linear in the canvas size, so scaling the canvas
//! uniformly scales the layout by the same factor.

use std::f64::consts::TAU;

use crate::config::{EllipseConfig, LayoutConfig};
use crate::graph::{AdjacencyMatrix, ShortestPathTable};

use super::{Canvas, Position};

/// Layout-engine entry point; only the node count of `matrix` matters.
#[must_use]
pub fn layout(
    matrix: &AdjacencyMatrix,
    _distances: Option<&ShortestPathTable>,
    canvas: Canvas,
    config: &LayoutConfig,
) -> Vec<Position> {
    ellipse_positions(matrix.node_count(), canvas, &config.ellipse)
}

/// Positions for `n` nodes around the canvas ellipse.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn ellipse_positions(n: usize, canvas: Canvas, config: &EllipseConfig) -> Vec<Position> {
    if n == 0 {
        return Vec::new();
    }
    let center = canvas.center();
    let radius = if config.radius_divisor > 0.0 {
        canvas.min_side() / config.radius_divisor
    } else {
        0.0
    };

    (0..n)
        .map(|i| {
            let angle = TAU * i as f64 / n as f64;
            Position::new(
                radius.mul_add(config.x_scale * angle.cos(), center.x),
                radius.mul_add(config.y_scale * angle.sin(), center.y),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_node_on_positive_x_axis() {
        let canvas = Canvas::new(1000.0, 500.0);
        let positions = ellipse_positions(4, canvas, &EllipseConfig::default());
        let r = 500.0 / 2.7;
        assert!((positions[0].x - (500.0 + 1.2 * r)).abs() < 1e-9);
        assert!((positions[0].y - 250.0).abs() < 1e-9);
        // Quarter turn lands below the centre (canvas y grows downwards).
        assert!((positions[1].x - 500.0).abs() < 1e-9);
        assert!((positions[1].y - (250.0 + 0.8 * r)).abs() < 1e-9);
    }

    #[test]
    fn deterministic() {
        let canvas = Canvas::new(640.0, 480.0);
        let config = EllipseConfig::default();
        assert_eq!(ellipse_positions(7, canvas, &config), ellipse_positions(7, canvas, &config));
    }

    #[test]
    fn invariant_under_uniform_scaling() {
        let config = EllipseConfig::default();
        let small = ellipse_positions(6, Canvas::new(300.0, 200.0), &config);
        let large = ellipse_positions(6, Canvas::new(900.0, 600.0), &config);
        for (a, b) in small.iter().zip(&large) {
            assert!((a.x * 3.0 - b.x).abs() < 1e-9);
            assert!((a.y * 3.0 - b.y).abs() < 1e-9);
        }
    }
}

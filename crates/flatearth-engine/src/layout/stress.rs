//! Stress-majorization layout (Kamada–Kawai style gradient descent).
//!
//! # Algorithm
//!
//! For every connected pair `(i, j)` with hop distance `d_ij`:
//!
//! ```text
//! L_ij = L0 · d_ij / max_d          (target Euclidean length)
//! K_ij = spring_constant / d_ij²    (stiffness)
//! ```
//!
//! Unreachable pairs get `K_ij = 0` and exert no force. Starting from a
//! circle, each iteration visits nodes in order and moves node `i` by
//! `−learning_rate · Σ_j K_ij (|p_i − p_j| − L_ij) · unit(p_i − p_j)`,
//! updating positions in place. The loop stops after `max_iterations` or
//! once the largest per-node gradient magnitude falls below `epsilon`.

use std::f64::consts::TAU;

use tracing::{debug, instrument};

use crate::config::{LayoutConfig, StressConfig};
use crate::graph::{AdjacencyMatrix, ShortestPathTable};

use super::{Canvas, Position};

/// Positions plus convergence metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct StressLayout {
    pub positions: Vec<Position>,
    /// Iterations actually run.
    pub iterations: usize,
    /// Whether the gradient fell below `epsilon` before the budget ran out.
    pub converged: bool,
}

/// Layout-engine entry point. Uses `distances` when it matches the matrix,
/// otherwise computes the table.
#[must_use]
pub fn layout(
    matrix: &AdjacencyMatrix,
    distances: Option<&ShortestPathTable>,
    canvas: Canvas,
    config: &LayoutConfig,
) -> Vec<Position> {
    let n = matrix.node_count();
    match distances {
        Some(table) if table.node_count() == n => stress_layout(table, canvas, &config.stress),
        _ => stress_layout(&ShortestPathTable::compute(matrix), canvas, &config.stress),
    }
    .positions
}

/// Run the gradient descent over a precomputed shortest-path table.
#[must_use]
#[allow(clippy::cast_precision_loss)]
#[instrument(skip(table, config), fields(n = table.node_count()))]
pub fn stress_layout(table: &ShortestPathTable, canvas: Canvas, config: &StressConfig) -> StressLayout {
    let n = table.node_count();
    if n == 0 {
        return StressLayout {
            positions: Vec::new(),
            iterations: 0,
            converged: true,
        };
    }

    let (lengths, stiffness) = spring_tables(table, config);

    let center = canvas.center();
    let radius = if config.initial_radius_divisor > 0.0 {
        canvas.min_side() / config.initial_radius_divisor
    } else {
        0.0
    };
    let mut positions: Vec<Position> = (0..n)
        .map(|i| {
            let angle = TAU * i as f64 / n as f64;
            Position::new(
                radius.mul_add(angle.cos(), center.x),
                radius.mul_add(angle.sin(), center.y),
            )
        })
        .collect();

    let floor = config.distance_floor.max(f64::MIN_POSITIVE);
    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.max_iterations {
        iterations += 1;
        let mut max_delta: f64 = 0.0;

        for i in 0..n {
            let (mut gx, mut gy) = (0.0_f64, 0.0_f64);
            for j in 0..n {
                if i == j {
                    continue;
                }
                let k = stiffness[i * n + j];
                if k == 0.0 {
                    continue;
                }
                let dx = positions[i].x - positions[j].x;
                let dy = positions[i].y - positions[j].y;
                let dist = dx.hypot(dy).max(floor);
                let delta = k * (dist - lengths[i * n + j]);
                gx += delta * dx / dist;
                gy += delta * dy / dist;
            }

            positions[i].x -= gx * config.learning_rate;
            positions[i].y -= gy * config.learning_rate;
            max_delta = max_delta.max(gx.hypot(gy));
        }

        if max_delta < config.epsilon {
            converged = true;
            break;
        }
    }

    debug!(iterations, converged, "stress layout finished");
    StressLayout {
        positions,
        iterations,
        converged,
    }
}

/// Target lengths and stiffness, row-major, zero for unreachable pairs.
fn spring_tables(table: &ShortestPathTable, config: &StressConfig) -> (Vec<f64>, Vec<f64>) {
    let n = table.node_count();
    let max_d = table.max_finite();
    let mut lengths = vec![0.0; n * n];
    let mut stiffness = vec![0.0; n * n];
    if max_d <= 0.0 {
        return (lengths, stiffness);
    }

    for i in 0..n {
        for j in 0..n {
            let d = table.get(i, j);
            if i != j && d.is_finite() && d > 0.0 {
                lengths[i * n + j] = config.ideal_length * d / max_d;
                stiffness[i * n + j] = config.spring_constant / (d * d);
            }
        }
    }
    (lengths, stiffness)
}

//! Fruchterman–Reingold spring embedder.
//!
//! Nodes start at uniform random positions. Each iteration accumulates a
//! repulsive push `k² / d` between every ordered pair and an attractive pull
//! `d² / k` for every ordered pair joined by an edge in either direction
//! (applied to both endpoints), with `k = sqrt(area / n)` and
//! `d = |p_i − p_j| + distance_offset`. Each node then moves by its
//! displacement capped at the current temperature and is clamped inside the
//! padded canvas. The temperature starts at `width / divisor` and decays
//! geometrically.
//!
//! Output is random unless [`ForceConfig::seed`] is set.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

use crate::config::{ForceConfig, LayoutConfig};
use crate::graph::{AdjacencyMatrix, ShortestPathTable};

use super::{Canvas, Position};

/// Layout-engine entry point. Seeds from config, otherwise from entropy.
#[must_use]
pub fn layout(
    matrix: &AdjacencyMatrix,
    _distances: Option<&ShortestPathTable>,
    canvas: Canvas,
    config: &LayoutConfig,
) -> Vec<Position> {
    let mut rng = config
        .force
        .seed
        .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
    force_positions(matrix, canvas, &config.force, &mut rng)
}

/// Run the spring embedder with a caller-supplied random source.
#[must_use]
#[allow(clippy::cast_precision_loss)]
#[instrument(skip(matrix, config, rng), fields(n = matrix.node_count()))]
pub fn force_positions<R: Rng + ?Sized>(
    matrix: &AdjacencyMatrix,
    canvas: Canvas,
    config: &ForceConfig,
    rng: &mut R,
) -> Vec<Position> {
    let n = matrix.node_count();
    if n == 0 {
        return Vec::new();
    }
    if canvas.area() <= 0.0 {
        return vec![canvas.center(); n];
    }

    let (width, height) = (canvas.width, canvas.height);
    let mut positions: Vec<Position> = (0..n)
        .map(|_| Position::new(rng.r#gen::<f64>() * width, rng.r#gen::<f64>() * height))
        .collect();

    let k = (canvas.area() / n as f64).sqrt();
    let mut temperature = if config.initial_temperature_divisor > 0.0 {
        width / config.initial_temperature_divisor
    } else {
        width
    };
    let x_bounds = padded_bounds(width, config.padding);
    let y_bounds = padded_bounds(height, config.padding);

    let linked: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| (0..n).map(move |j| (i, j)))
        .filter(|&(i, j)| i != j && (matrix.has_edge(i, j) || matrix.has_edge(j, i)))
        .collect();

    let mut disp = vec![(0.0_f64, 0.0_f64); n];
    for _ in 0..config.iterations {
        disp.fill((0.0, 0.0));

        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let (ux, uy, dist) = separation(positions[i], positions[j], config.distance_offset);
                let repulse = k * k / dist;
                disp[i].0 += ux * repulse;
                disp[i].1 += uy * repulse;
            }
        }

        for &(i, j) in &linked {
            let (ux, uy, dist) = separation(positions[i], positions[j], config.distance_offset);
            let attract = dist * dist / k;
            disp[i].0 -= ux * attract;
            disp[i].1 -= uy * attract;
            disp[j].0 += ux * attract;
            disp[j].1 += uy * attract;
        }

        for (position, &(dx, dy)) in positions.iter_mut().zip(&disp) {
            let length = dx.hypot(dy);
            let (step_x, step_y) = if length > 0.0 {
                let capped = length.min(temperature);
                (dx / length * capped, dy / length * capped)
            } else {
                (0.0, 0.0)
            };
            position.x = (position.x + step_x).clamp(x_bounds.0, x_bounds.1);
            position.y = (position.y + step_y).clamp(y_bounds.0, y_bounds.1);
        }

        temperature *= config.cooling;
    }

    debug!(iterations = config.iterations, "force layout finished");
    positions
}

/// Unit vector from `b` to `a` and the offset distance between them.
fn separation(a: Position, b: Position, offset: f64) -> (f64, f64, f64) {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let dist = dx.hypot(dy) + offset;
    if dist > 0.0 {
        (dx / dist, dy / dist, dist)
    } else {
        (0.0, 0.0, f64::MIN_POSITIVE)
    }
}

/// `[padding, extent − padding]`, collapsed to the midpoint when the canvas
/// is narrower than twice the padding.
fn padded_bounds(extent: f64, padding: f64) -> (f64, f64) {
    let lo = padding.max(0.0);
    let hi = extent - lo;
    if lo <= hi {
        (lo, hi)
    } else {
        let mid = extent / 2.0;
        (mid, mid)
    }
}

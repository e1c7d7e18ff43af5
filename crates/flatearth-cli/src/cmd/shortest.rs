//! `flatearth shortest-paths` — all-pairs hop counts.

use std::io::Write;

use clap::Args;
use flatearth_engine::ShortestPathTable;
use serde::Serialize;

use crate::input::GraphArgs;
use crate::output::{OutputMode, node_label, pretty_kv, pretty_section, render_mode};

/// Arguments for `flatearth shortest-paths`.
#[derive(Args, Debug)]
pub struct ShortestPathsArgs {
    #[command(flatten)]
    pub graph: GraphArgs,
}

#[derive(Debug, Serialize)]
struct ShortestPathsOutput {
    labels: Vec<String>,
    /// `null` where the target is unreachable.
    distances: Vec<Vec<Option<f64>>>,
    /// Longest finite distance (the graph diameter over reachable pairs).
    diameter: f64,
}

/// Execute `flatearth shortest-paths`.
pub fn run_shortest_paths(args: &ShortestPathsArgs, output: OutputMode) -> anyhow::Result<()> {
    let graph = args.graph.load()?;
    let table = ShortestPathTable::compute(&graph.matrix);
    let payload = ShortestPathsOutput {
        labels: (0..table.node_count())
            .map(|n| node_label(n, &graph.names))
            .collect(),
        distances: table.rows(),
        diameter: table.max_finite(),
    };
    render_mode(output, &payload, render_text, render_pretty)
}

fn cell(distance: Option<f64>, unreachable: &str) -> String {
    distance.map_or_else(|| unreachable.to_string(), |d| d.to_string())
}

fn render_text(payload: &ShortestPathsOutput, w: &mut dyn Write) -> std::io::Result<()> {
    for row in &payload.distances {
        let cells: Vec<String> = row.iter().map(|&d| cell(d, "inf")).collect();
        writeln!(w, "{}", cells.join(" "))?;
    }
    Ok(())
}

fn render_pretty(payload: &ShortestPathsOutput, w: &mut dyn Write) -> std::io::Result<()> {
    let n = payload.distances.len();
    pretty_section(w, &format!("Shortest paths ({n} nodes)"))?;
    if n == 0 {
        writeln!(w, "Graph is empty.")?;
        return Ok(());
    }

    write!(w, "{:>6}", "")?;
    for j in 1..=n {
        write!(w, "{j:>5}")?;
    }
    writeln!(w)?;
    for (i, row) in payload.distances.iter().enumerate() {
        write!(w, "{:>6}", i + 1)?;
        for &d in row {
            write!(w, "{:>5}", cell(d, "∞"))?;
        }
        writeln!(w)?;
    }

    writeln!(w)?;
    pretty_kv(w, "Diameter", payload.diameter.to_string())?;
    if payload.labels.iter().zip(1..).any(|(label, n)| *label != n.to_string()) {
        pretty_kv(w, "Names", payload.labels.join(", "))?;
    }
    Ok(())
}

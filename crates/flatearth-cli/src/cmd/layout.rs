//! `flatearth layout` — node positions for one layout strategy.

use std::io::Write;

use clap::Args;
use flatearth_engine::{Canvas, EngineConfig, GraphSession, LayoutMode, Position};
use serde::Serialize;

use crate::input::{GraphArgs, LoadedGraph};
use crate::output::{OutputMode, node_label, pretty_section, render_mode};

/// Layout selection shared by `layout`, `scene`, and `actions`.
#[derive(Args, Debug, Clone)]
pub struct LayoutArgs {
    /// Layout strategy: ellipse, stress, or force.
    #[arg(long, default_value_t = LayoutMode::Ellipse)]
    pub mode: LayoutMode,

    /// Canvas width.
    #[arg(long, default_value_t = 1200.0)]
    pub width: f64,

    /// Canvas height.
    #[arg(long, default_value_t = 800.0)]
    pub height: f64,

    /// Seed for the force-directed layout (overrides the config file).
    #[arg(long)]
    pub seed: Option<u64>,
}

impl LayoutArgs {
    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width, self.height)
    }

    /// Session over `graph` laid out as requested.
    pub fn session(&self, graph: LoadedGraph, mut config: EngineConfig) -> GraphSession {
        if let Some(seed) = self.seed {
            config.layout.force.seed = Some(seed);
        }
        GraphSession::new(graph.matrix, config)
            .with_names(graph.names)
            .with_layout(self.mode, self.canvas())
    }
}

/// Arguments for `flatearth layout`.
#[derive(Args, Debug)]
pub struct LayoutCmdArgs {
    #[command(flatten)]
    pub graph: GraphArgs,

    #[command(flatten)]
    pub layout: LayoutArgs,
}

#[derive(Debug, Serialize)]
struct LayoutOutput {
    mode: LayoutMode,
    canvas: Canvas,
    positions: Vec<PlacedNode>,
}

#[derive(Debug, Serialize)]
struct PlacedNode {
    node: usize,
    label: String,
    x: f64,
    y: f64,
}

/// Execute `flatearth layout`.
pub fn run_layout(
    args: &LayoutCmdArgs,
    output: OutputMode,
    config: EngineConfig,
) -> anyhow::Result<()> {
    let session = args.layout.session(args.graph.load()?, config);
    let payload = LayoutOutput {
        mode: session.layout_mode(),
        canvas: session.canvas(),
        positions: placed(session.positions(), session.names()),
    };
    render_mode(output, &payload, render_text, render_pretty)
}

fn placed(positions: &[Position], names: &[String]) -> Vec<PlacedNode> {
    positions
        .iter()
        .enumerate()
        .map(|(node, p)| PlacedNode {
            node: node + 1,
            label: node_label(node, names),
            x: p.x,
            y: p.y,
        })
        .collect()
}

fn render_text(payload: &LayoutOutput, w: &mut dyn Write) -> std::io::Result<()> {
    for p in &payload.positions {
        writeln!(w, "{} {:.2} {:.2}", p.node, p.x, p.y)?;
    }
    Ok(())
}

fn render_pretty(payload: &LayoutOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(
        w,
        &format!(
            "{} ({} x {})",
            payload.mode.label(),
            payload.canvas.width,
            payload.canvas.height
        ),
    )?;
    if payload.positions.is_empty() {
        writeln!(w, "No nodes to place.")?;
    }
    for p in &payload.positions {
        writeln!(w, "  {:<20} ({:>8.1}, {:>8.1})", p.label, p.x, p.y)?;
    }
    Ok(())
}

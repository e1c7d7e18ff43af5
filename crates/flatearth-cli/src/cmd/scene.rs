//! `flatearth scene` — the drawable model a front end renders.

use std::io::Write;

use anyhow::Context;
use clap::Args;
use flatearth_engine::route::PathCommand;
use flatearth_engine::{Canvas, EngineConfig, LayoutMode, Scene};
use serde::Serialize;

use super::classify::{edge_kind_name, role_name};
use super::layout::LayoutArgs;
use crate::input::{GraphArgs, node_arg};
use crate::output::{OutputMode, path_arrows, pretty_kv, pretty_section, render_mode};

/// Arguments for `flatearth scene`.
#[derive(Args, Debug)]
pub struct SceneArgs {
    #[command(flatten)]
    pub graph: GraphArgs,

    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Draw only the first covering route, from any start.
    #[arg(long)]
    pub path: bool,

    /// Draw only a covering route starting at this node (1-based).
    #[arg(long, value_name = "N")]
    pub path_start: Option<usize>,

    /// Which covering route to draw (1-based, clamped). Implies `--path`.
    #[arg(long, value_name = "I")]
    pub index: Option<usize>,
}

impl SceneArgs {
    const fn wants_path(&self) -> bool {
        self.path || self.path_start.is_some() || self.index.is_some()
    }
}

#[derive(Debug, Serialize)]
struct SceneOutput<'a> {
    mode: LayoutMode,
    canvas: Canvas,
    #[serde(skip_serializing_if = "Option::is_none")]
    route: Option<RoutePosition>,
    scene: &'a Scene,
}

#[derive(Debug, Serialize)]
struct RoutePosition {
    position: usize,
    total: usize,
}

/// Execute `flatearth scene`.
pub fn run_scene(args: &SceneArgs, output: OutputMode, config: EngineConfig) -> anyhow::Result<()> {
    let mut session = args.layout.session(args.graph.load()?, config);

    let (scene, route) = if args.wants_path() {
        let start = args.path_start.map(node_arg).transpose()?;
        let mut scene = session.show_all_routes(start)?;
        if let Some(index) = args.index {
            scene = session.go_to_path(PathCommand::JumpTo(index))?;
        }
        let cursor = session.cursor().context("route cursor missing")?;
        let route = RoutePosition {
            position: cursor.position(),
            total: cursor.total(),
        };
        (scene, Some(route))
    } else {
        (session.recompute(), None)
    };

    let payload = SceneOutput {
        mode: session.layout_mode(),
        canvas: session.canvas(),
        route,
        scene: &scene,
    };
    render_mode(output, &payload, render_text, render_pretty)
}

fn render_text(payload: &SceneOutput<'_>, w: &mut dyn Write) -> std::io::Result<()> {
    for node in &payload.scene.nodes {
        writeln!(
            w,
            "node {} {:.2} {:.2} {} {}",
            node.display_number,
            node.center.x,
            node.center.y,
            node.color.hex(),
            node.label
        )?;
    }
    for edge in &payload.scene.edges {
        writeln!(
            w,
            "edge {} {} {} {}",
            edge.from + 1,
            edge.to + 1,
            edge.stroke.color.hex(),
            if edge.stroke.dash.is_some() { "dashed" } else { "solid" }
        )?;
    }
    if let Some(path) = &payload.scene.active_path {
        let nodes: Vec<String> = path.iter().map(|n| (n + 1).to_string()).collect();
        writeln!(w, "path {}", nodes.join(" "))?;
    }
    Ok(())
}

fn render_pretty(payload: &SceneOutput<'_>, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(
        w,
        &format!(
            "Scene: {} ({} x {})",
            payload.mode.label(),
            payload.canvas.width,
            payload.canvas.height
        ),
    )?;
    if let (Some(route), Some(path)) = (&payload.route, &payload.scene.active_path) {
        pretty_kv(w, "Route", format!("{} / {}", route.position, route.total))?;
        pretty_kv(w, "Path", path_arrows(path))?;
        writeln!(w)?;
    }

    pretty_section(w, "Nodes")?;
    for node in &payload.scene.nodes {
        writeln!(
            w,
            "  {:<16} ({:>7.1}, {:>7.1})  {:<16} {}",
            node.label,
            node.center.x,
            node.center.y,
            role_name(node.role),
            node.color.hex()
        )?;
    }

    if !payload.scene.edges.is_empty() {
        writeln!(w)?;
        pretty_section(w, "Edges")?;
        for edge in &payload.scene.edges {
            let arrow = format!("{} → {}", edge.from + 1, edge.to + 1);
            writeln!(
                w,
                "  {arrow:<12} {:<20} {}{}",
                edge_kind_name(edge.kind),
                edge.stroke.color.hex(),
                if edge.stroke.dash.is_some() { " dashed" } else { "" }
            )?;
        }
    }
    Ok(())
}

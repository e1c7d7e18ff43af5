//! `flatearth route` — ask the route explorer for one covering route.
//!
//! Runs the same request/answer cycle a front end uses: the session issues a
//! request for its current snapshot, the explorer is awaited on a
//! current-thread runtime, and the answer is applied back to the session.

use std::io::Write;

use anyhow::Context;
use clap::Args;
use flatearth_engine::route::BacktrackingExplorer;
use flatearth_engine::{EngineConfig, GraphSession};
use serde::Serialize;
use tracing::info;

use crate::input::{GraphArgs, node_arg};
use crate::output::{OutputMode, node_label, render};

/// Arguments for `flatearth route`.
#[derive(Args, Debug)]
pub struct RouteArgs {
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Start node (1-based).
    #[arg(long, value_name = "N")]
    pub start: usize,

    /// Give up after this many search steps.
    #[arg(long, value_name = "STEPS", default_value_t = BacktrackingExplorer::DEFAULT_STEP_BUDGET)]
    pub budget: usize,
}

#[derive(Debug, Serialize)]
struct RouteOutput {
    start: usize,
    route: Vec<usize>,
    labels: Vec<String>,
}

/// Execute `flatearth route`.
pub fn run_route(args: &RouteArgs, output: OutputMode, config: EngineConfig) -> anyhow::Result<()> {
    let graph = args.graph.load()?;
    let start = node_arg(args.start)?;
    let explorer = BacktrackingExplorer::with_budget(args.budget);

    let mut session = GraphSession::new(graph.matrix, config).with_names(graph.names);
    let request = session.begin_route(start)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let outcome = runtime.block_on(request.solve(&explorer));

    let scene = session.finish_route(outcome)?;
    let route = scene.active_path.unwrap_or_default();
    info!(start = args.start, len = route.len(), "covering route found");

    let payload = RouteOutput {
        start: args.start,
        route: route.iter().map(|n| n + 1).collect(),
        labels: route.iter().map(|&n| node_label(n, session.names())).collect(),
    };
    render(output, &payload, render_route_human)
}

fn render_route_human(payload: &RouteOutput, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "Route from {}: {}", payload.start, payload.labels.join(" → "))
}

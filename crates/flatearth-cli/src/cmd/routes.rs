//! `flatearth routes` — enumerate covering paths and browse them.

use std::io::Write;

use anyhow::Context;
use clap::Args;
use flatearth_engine::route::{PathCommand, PathCursor};
use flatearth_engine::{EngineConfig, GraphSession};
use serde::Serialize;

use crate::input::{GraphArgs, node_arg};
use crate::output::{OutputMode, node_label, path_arrows, pretty_kv, pretty_section, render_mode};

/// Arguments for `flatearth routes`.
#[derive(Args, Debug)]
pub struct RoutesArgs {
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Only routes starting at this node (1-based).
    #[arg(long, value_name = "N")]
    pub start: Option<usize>,

    /// Route to select (1-based, clamped into range).
    #[arg(long, value_name = "I", default_value_t = 1)]
    pub index: usize,

    /// List every route instead of just the selected one.
    #[arg(long)]
    pub list: bool,
}

#[derive(Debug, Serialize)]
struct RoutesOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    start: Option<usize>,
    position: usize,
    total: usize,
    /// Selected route as 1-based node numbers.
    route: Vec<usize>,
    labels: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    routes: Option<Vec<Vec<usize>>>,
}

/// Execute `flatearth routes`.
pub fn run_routes(args: &RoutesArgs, output: OutputMode, config: EngineConfig) -> anyhow::Result<()> {
    let graph = args.graph.load()?;
    let start = args.start.map(node_arg).transpose()?;

    let mut session = GraphSession::new(graph.matrix, config).with_names(graph.names);
    session.show_all_routes(start)?;
    session.go_to_path(PathCommand::JumpTo(args.index))?;
    let cursor = session.cursor().context("route cursor missing")?;

    let payload = build_output(cursor, start, session.names(), args.list);
    render_mode(output, &payload, render_text, render_pretty)
}

fn one_based(path: &[usize]) -> Vec<usize> {
    path.iter().map(|n| n + 1).collect()
}

fn build_output(
    cursor: &PathCursor,
    start: Option<usize>,
    names: &[String],
    list: bool,
) -> RoutesOutput {
    let current = cursor.current();
    RoutesOutput {
        start: start.map(|s| s + 1),
        position: cursor.position(),
        total: cursor.total(),
        route: one_based(current),
        labels: current.iter().map(|&n| node_label(n, names)).collect(),
        routes: list.then(|| cursor.paths().iter().map(|p| one_based(p)).collect()),
    }
}

fn render_text(payload: &RoutesOutput, w: &mut dyn Write) -> std::io::Result<()> {
    match &payload.routes {
        Some(routes) => {
            for route in routes {
                let nodes: Vec<String> = route.iter().map(ToString::to_string).collect();
                writeln!(w, "{}", nodes.join(" "))?;
            }
        }
        None => {
            let nodes: Vec<String> = payload.route.iter().map(ToString::to_string).collect();
            writeln!(w, "{}/{} {}", payload.position, payload.total, nodes.join(" "))?;
        }
    }
    Ok(())
}

fn render_pretty(payload: &RoutesOutput, w: &mut dyn Write) -> std::io::Result<()> {
    let heading = match payload.start {
        Some(start) => format!("All routes from {start}"),
        None => "All possible routes".to_string(),
    };
    pretty_section(w, &heading)?;

    if let Some(routes) = &payload.routes {
        for (i, route) in routes.iter().enumerate() {
            let marker = if i + 1 == payload.position { '>' } else { ' ' };
            let zero_based: Vec<usize> = route.iter().map(|n| n - 1).collect();
            writeln!(w, "{marker} {:>4}  {}", i + 1, path_arrows(&zero_based))?;
        }
        writeln!(w)?;
    }

    pretty_kv(w, "Route", format!("{} / {}", payload.position, payload.total))?;
    pretty_kv(w, "Path", payload.labels.join(" → "))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cursor() -> PathCursor {
        let mut cursor = PathCursor::new(vec![vec![0, 1, 2], vec![1, 2, 0], vec![2, 0, 1]], None)
            .expect("non-empty");
        cursor.apply(PathCommand::JumpTo(2));
        cursor
    }

    #[test]
    fn routes_args_parse() {
        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: RoutesArgs,
        }

        let parsed = Wrapper::parse_from(["test", "-m", "m.txt"]);
        assert_eq!(parsed.args.index, 1);
        assert!(parsed.args.start.is_none());
        assert!(!parsed.args.list);

        let parsed = Wrapper::parse_from(["test", "-m", "m.txt", "--start", "3", "--index", "2", "--list"]);
        assert_eq!(parsed.args.start, Some(3));
        assert_eq!(parsed.args.index, 2);
        assert!(parsed.args.list);
    }

    #[test]
    fn output_uses_display_numbers() {
        let names = vec!["Hall".to_string()];
        let payload = build_output(&cursor(), None, &names, false);
        assert_eq!((payload.position, payload.total), (2, 3));
        assert_eq!(payload.route, vec![2, 3, 1]);
        assert_eq!(payload.labels, vec!["2", "3", "1 (Hall)"]);
        assert!(payload.routes.is_none());
    }

    #[test]
    fn text_shows_cursor_surface() {
        let payload = build_output(&cursor(), None, &[], false);
        let mut out = Vec::new();
        render_text(&payload, &mut out).expect("render");
        assert_eq!(String::from_utf8(out).expect("utf8"), "2/3 2 3 1\n");
    }

    #[test]
    fn pretty_list_marks_selection() {
        let payload = build_output(&cursor(), Some(1), &[], true);
        let mut out = Vec::new();
        render_pretty(&payload, &mut out).expect("render");

        let rendered = String::from_utf8(out).expect("utf8");
        assert!(rendered.starts_with("All routes from 2\n"));
        assert!(rendered.contains(">    2  2 → 3 → 1"));
        assert!(rendered.contains("Route:       2 / 3"));
    }
}

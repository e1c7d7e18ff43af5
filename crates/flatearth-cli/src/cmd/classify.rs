//! `flatearth classify` — node roles, edge styles, and routing readiness.

use std::io::Write;

use clap::Args;
use flatearth_engine::graph::classify::analyze;
use flatearth_engine::graph::{EdgeKind, GraphAnalysis, NodeRole};
use flatearth_engine::route::check_topology;
use serde::Serialize;

use crate::input::{GraphArgs, LoadedGraph};
use crate::output::{OutputMode, node_label, pretty_kv, pretty_section, render_mode};

/// Arguments for `flatearth classify`.
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    #[command(flatten)]
    pub graph: GraphArgs,
}

#[derive(Debug, Serialize)]
struct ClassifyOutput {
    node_count: usize,
    edge_count: usize,
    zero_in_degree: usize,
    dead_ends: usize,
    /// At most one start and one end node, so a covering route may exist.
    route_ready: bool,
    nodes: Vec<NodeRow>,
    edges: Vec<EdgeRow>,
}

#[derive(Debug, Serialize)]
struct NodeRow {
    node: usize,
    label: String,
    role: NodeRole,
    zero_in_degree: bool,
    single_in_degree: bool,
    dead_end: bool,
    bridge: bool,
}

#[derive(Debug, Serialize)]
struct EdgeRow {
    from: usize,
    to: usize,
    kind: EdgeKind,
    bidirectional: bool,
    redundant: bool,
    from_zero_in_degree: bool,
}

/// Execute `flatearth classify`.
pub fn run_classify(args: &ClassifyArgs, output: OutputMode) -> anyhow::Result<()> {
    let graph = args.graph.load()?;
    let analysis = analyze(&graph.matrix);
    let payload = build_output(&graph, &analysis);
    render_mode(output, &payload, render_classify_text, render_classify_pretty)
}

fn build_output(graph: &LoadedGraph, analysis: &GraphAnalysis) -> ClassifyOutput {
    let nodes = analysis
        .nodes
        .iter()
        .map(|n| NodeRow {
            node: n.node + 1,
            label: node_label(n.node, &graph.names),
            role: n.role(),
            zero_in_degree: n.is_zero_in_degree,
            single_in_degree: n.is_single_in_degree,
            dead_end: n.is_dead_end,
            bridge: n.is_bridge,
        })
        .collect();
    let edges = analysis
        .edges
        .iter()
        .map(|e| EdgeRow {
            from: e.from + 1,
            to: e.to + 1,
            kind: e.kind(),
            bidirectional: e.is_bidirectional,
            redundant: e.is_redundant,
            from_zero_in_degree: e.is_from_zero_in_degree,
        })
        .collect();

    ClassifyOutput {
        node_count: graph.matrix.node_count(),
        edge_count: graph.matrix.edge_count(),
        zero_in_degree: analysis.zero_in_degree_count(),
        dead_ends: analysis.dead_end_count(),
        route_ready: check_topology(&graph.matrix).is_ok(),
        nodes,
        edges,
    }
}

/// Display name of a node role.
pub const fn role_name(role: NodeRole) -> &'static str {
    match role {
        NodeRole::SingleInDegree => "single in-degree",
        NodeRole::ZeroInDegree => "zero in-degree",
        NodeRole::Bridge => "bridge",
        NodeRole::DeadEnd => "dead-end",
        NodeRole::Default => "default",
    }
}

/// Display name of an edge style.
pub const fn edge_kind_name(kind: EdgeKind) -> &'static str {
    match kind {
        EdgeKind::Redundant => "redundant",
        EdgeKind::Bidirectional => "bidirectional",
        EdgeKind::FromZeroInDegree => "from zero in-degree",
        EdgeKind::Default => "default",
    }
}

fn node_flags(row: &NodeRow) -> Vec<&'static str> {
    [
        (row.zero_in_degree, "zero-in"),
        (row.single_in_degree, "single-in"),
        (row.dead_end, "dead-end"),
        (row.bridge, "bridge"),
    ]
    .into_iter()
    .filter_map(|(set, flag)| set.then_some(flag))
    .collect()
}

fn edge_flags(row: &EdgeRow) -> Vec<&'static str> {
    [
        (row.bidirectional, "bidirectional"),
        (row.redundant, "redundant"),
        (row.from_zero_in_degree, "from-zero-in"),
    ]
    .into_iter()
    .filter_map(|(set, flag)| set.then_some(flag))
    .collect()
}

fn render_classify_text(payload: &ClassifyOutput, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(
        w,
        "nodes={} edges={} zero_in={} dead_ends={} route_ready={}",
        payload.node_count,
        payload.edge_count,
        payload.zero_in_degree,
        payload.dead_ends,
        payload.route_ready
    )?;
    for row in &payload.nodes {
        let flags = node_flags(row);
        writeln!(
            w,
            "node {} {} {}",
            row.node,
            serde_name(&row.role),
            if flags.is_empty() { "-".to_string() } else { flags.join(",") }
        )?;
    }
    for row in &payload.edges {
        writeln!(w, "edge {} {} {}", row.from, row.to, serde_name(&row.kind))?;
    }
    Ok(())
}

fn render_classify_pretty(payload: &ClassifyOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(
        w,
        &format!(
            "Classification ({} nodes, {} edges)",
            payload.node_count, payload.edge_count
        ),
    )?;
    if payload.node_count == 0 {
        writeln!(w, "Graph is empty.")?;
        return Ok(());
    }

    pretty_kv(w, "Zero-in", payload.zero_in_degree.to_string())?;
    pretty_kv(w, "Dead ends", payload.dead_ends.to_string())?;
    let bridges: Vec<String> = payload
        .nodes
        .iter()
        .filter(|n| n.bridge)
        .map(|n| n.node.to_string())
        .collect();
    pretty_kv(
        w,
        "Bridges",
        if bridges.is_empty() { "none".to_string() } else { bridges.join(", ") },
    )?;
    pretty_kv(w, "Routable", if payload.route_ready { "yes" } else { "no" })?;

    writeln!(w)?;
    pretty_section(w, "Nodes")?;
    for row in &payload.nodes {
        let flags = node_flags(row);
        if flags.is_empty() {
            writeln!(w, "  {:<20} {}", row.label, role_name(row.role))?;
        } else {
            writeln!(
                w,
                "  {:<20} {:<18} [{}]",
                row.label,
                role_name(row.role),
                flags.join(", ")
            )?;
        }
    }

    if !payload.edges.is_empty() {
        writeln!(w)?;
        pretty_section(w, "Edges")?;
        for row in &payload.edges {
            let arrow = format!("{} → {}", row.from, row.to);
            let flags = edge_flags(row);
            if flags.is_empty() {
                writeln!(w, "  {arrow:<12} {}", edge_kind_name(row.kind))?;
            } else {
                writeln!(
                    w,
                    "  {arrow:<12} {:<20} ({})",
                    edge_kind_name(row.kind),
                    flags.join(", ")
                )?;
            }
        }
    }
    Ok(())
}

/// The snake_case tag used in JSON, reused for text rows.
fn serde_name<T: Serialize>(value: &T) -> String {
    serde_json::to_value(value)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flatearth_engine::AdjacencyMatrix;
    use std::path::PathBuf;

    fn star() -> LoadedGraph {
        LoadedGraph {
            matrix: AdjacencyMatrix::from_edges(3, &[(0, 1), (0, 2)]).expect("edges"),
            names: vec!["Hall".to_string()],
        }
    }

    #[test]
    fn classify_args_parse() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: ClassifyArgs,
        }

        let parsed = Wrapper::parse_from(["test", "--matrix", "m.txt", "--names", "n.txt"]);
        assert_eq!(parsed.args.graph.matrix, PathBuf::from("m.txt"));
        assert_eq!(parsed.args.graph.names, Some(PathBuf::from("n.txt")));
    }

    #[test]
    fn build_output_uses_display_numbers() {
        let graph = star();
        let payload = build_output(&graph, &analyze(&graph.matrix));
        assert_eq!(payload.nodes[0].node, 1);
        assert_eq!(payload.nodes[0].label, "1 (Hall)");
        assert_eq!(payload.nodes[0].role, NodeRole::ZeroInDegree);
        assert_eq!((payload.edges[0].from, payload.edges[0].to), (1, 2));
        assert_eq!(payload.dead_ends, 2);
        assert!(!payload.route_ready);
    }

    #[test]
    fn text_rows_use_snake_case_tags() {
        let graph = star();
        let payload = build_output(&graph, &analyze(&graph.matrix));
        let mut out = Vec::new();
        render_classify_text(&payload, &mut out).expect("render");

        let rendered = String::from_utf8(out).expect("utf8");
        assert!(rendered.starts_with("nodes=3 edges=2 zero_in=1 dead_ends=2 route_ready=false"));
        assert!(rendered.contains("node 1 zero_in_degree zero-in\n"));
        assert!(rendered.contains("node 2 single_in_degree single-in,dead-end\n"));
        assert!(rendered.contains("edge 1 3 from_zero_in_degree\n"));
    }

    #[test]
    fn pretty_lists_sections() {
        let graph = star();
        let payload = build_output(&graph, &analyze(&graph.matrix));
        let mut out = Vec::new();
        render_classify_pretty(&payload, &mut out).expect("render");

        let rendered = String::from_utf8(out).expect("utf8");
        assert!(rendered.contains("Classification (3 nodes, 2 edges)"));
        assert!(rendered.contains("Routable:    no"));
        assert!(rendered.contains("Bridges:     none"));
        assert!(rendered.contains("1 → 2"));
    }

    #[test]
    fn pretty_empty_graph() {
        let graph = LoadedGraph {
            matrix: AdjacencyMatrix::with_nodes(0),
            names: Vec::new(),
        };
        let payload = build_output(&graph, &analyze(&graph.matrix));
        let mut out = Vec::new();
        render_classify_pretty(&payload, &mut out).expect("render");
        assert!(String::from_utf8(out).expect("utf8").contains("Graph is empty."));
    }
}

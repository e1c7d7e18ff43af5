//! `flatearth convert-zero-in` — add reverse edges out of zero in-degree nodes.

use std::io::Write;

use anyhow::Context;
use clap::Args;
use flatearth_engine::AdjacencyMatrix;
use flatearth_engine::graph::zero_in_degree_nodes;
use flatearth_engine::route::{convert_zero_in_node, convert_zero_in_nodes};
use serde::Serialize;
use tracing::info;

use crate::input::{GraphArgs, node_arg};
use crate::output::{OutputMode, pretty_kv, render_mode};

/// Arguments for `flatearth convert-zero-in`.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Convert only this node (1-based). Every zero in-degree node otherwise.
    #[arg(long, value_name = "N")]
    pub node: Option<usize>,

    /// Rewrite the matrix file in place.
    #[arg(long)]
    pub write: bool,
}

#[derive(Debug, Serialize)]
struct ConvertOutput {
    /// Nodes that received reverse edges (1-based).
    converted: Vec<usize>,
    edges_added: usize,
    written: bool,
    matrix: String,
}

/// Execute `flatearth convert-zero-in`.
pub fn run_convert(args: &ConvertArgs, output: OutputMode) -> anyhow::Result<()> {
    let mut matrix = args.graph.load()?.matrix;
    let node = args.node.map(node_arg).transpose()?;
    let (converted, edges_added) = convert(&mut matrix, node)?;

    let written = args.write && edges_added > 0;
    if written {
        let path = &args.graph.matrix;
        std::fs::write(path, matrix.to_string())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), edges_added, "matrix rewritten");
    }

    let payload = ConvertOutput {
        converted: converted.iter().map(|n| n + 1).collect(),
        edges_added,
        written,
        matrix: matrix.to_string(),
    };
    render_mode(output, &payload, render_text, render_pretty)
}

/// Apply the conversion and report which nodes gained edges.
fn convert(
    matrix: &mut AdjacencyMatrix,
    node: Option<usize>,
) -> flatearth_engine::Result<(Vec<usize>, usize)> {
    match node {
        Some(node) => {
            let added = convert_zero_in_node(matrix, node)?;
            let converted = if added > 0 { vec![node] } else { Vec::new() };
            Ok((converted, added))
        }
        None => {
            let targets: Vec<usize> = zero_in_degree_nodes(matrix)
                .into_iter()
                .filter(|&n| matrix.successors(n).next().is_some())
                .collect();
            let added = convert_zero_in_nodes(matrix);
            Ok((targets, added))
        }
    }
}

fn render_text(payload: &ConvertOutput, w: &mut dyn Write) -> std::io::Result<()> {
    write!(w, "{}", payload.matrix)
}

fn render_pretty(payload: &ConvertOutput, w: &mut dyn Write) -> std::io::Result<()> {
    if payload.edges_added == 0 {
        writeln!(w, "Nothing to convert.")?;
    } else {
        let nodes: Vec<String> = payload.converted.iter().map(ToString::to_string).collect();
        pretty_kv(w, "Converted", nodes.join(", "))?;
        pretty_kv(w, "Edges added", payload.edges_added.to_string())?;
        if payload.written {
            writeln!(w, "Matrix file updated.")?;
        }
    }
    writeln!(w)?;
    write!(w, "{}", payload.matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flatearth_engine::EngineError;

    fn star() -> AdjacencyMatrix {
        AdjacencyMatrix::from_edges(3, &[(0, 1), (0, 2)]).expect("edges")
    }

    #[test]
    fn convert_all_reports_targets() {
        let mut m = star();
        let (converted, added) = convert(&mut m, None).expect("convert");
        assert_eq!(converted, vec![0]);
        assert_eq!(added, 2);
        assert!(m.has_edge(1, 0) && m.has_edge(2, 0));
    }

    #[test]
    fn isolated_zero_in_node_is_not_reported() {
        let mut m = AdjacencyMatrix::from_edges(3, &[(0, 1)]).expect("edges");
        let (converted, added) = convert(&mut m, None).expect("convert");
        assert_eq!(converted, vec![0]);
        assert_eq!(added, 1);
    }

    #[test]
    fn convert_single_node_with_predecessors_is_noop() {
        let mut m = star();
        let (converted, added) = convert(&mut m, Some(1)).expect("convert");
        assert!(converted.is_empty());
        assert_eq!(added, 0);
        assert_eq!(m, star());
    }

    #[test]
    fn convert_single_node_out_of_range() {
        let mut m = star();
        assert!(matches!(
            convert(&mut m, Some(7)),
            Err(EngineError::NodeOutOfRange { node: 7, node_count: 3 })
        ));
    }

    #[test]
    fn pretty_reports_nothing_to_convert() {
        let payload = ConvertOutput {
            converted: Vec::new(),
            edges_added: 0,
            written: false,
            matrix: "0 1\n1 0\n".into(),
        };
        let mut out = Vec::new();
        render_pretty(&payload, &mut out).expect("render");
        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            "Nothing to convert.\n\n0 1\n1 0\n"
        );
    }
}

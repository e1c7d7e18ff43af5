//! `flatearth actions` — context-menu entries for a point on the canvas.

use std::io::Write;

use clap::Args;
use flatearth_engine::scene::ContextAction;
use flatearth_engine::{EngineConfig, Position};
use serde::Serialize;

use super::layout::LayoutArgs;
use crate::input::GraphArgs;
use crate::output::{OutputMode, render};

/// Arguments for `flatearth actions`.
#[derive(Args, Debug)]
pub struct ActionsArgs {
    #[command(flatten)]
    pub graph: GraphArgs,

    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Canvas x coordinate of the click.
    #[arg(long, allow_negative_numbers = true)]
    pub x: f64,

    /// Canvas y coordinate of the click.
    #[arg(long, allow_negative_numbers = true)]
    pub y: f64,
}

#[derive(Debug, Serialize)]
struct ActionsOutput {
    x: f64,
    y: f64,
    /// Node under the point (1-based), if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    node: Option<usize>,
    actions: Vec<ActionRow>,
}

#[derive(Debug, Serialize)]
struct ActionRow {
    label: String,
    #[serde(flatten)]
    action: ContextAction,
}

/// Execute `flatearth actions`.
pub fn run_actions(args: &ActionsArgs, output: OutputMode, config: EngineConfig) -> anyhow::Result<()> {
    let mut session = args.layout.session(args.graph.load()?, config);
    let point = Position::new(args.x, args.y);
    let node = session.recompute().node_at(point);

    let payload = ActionsOutput {
        x: args.x,
        y: args.y,
        node: node.map(|n| n + 1),
        actions: session
            .context_actions(point)
            .into_iter()
            .map(|action| ActionRow {
                label: action.label(),
                action,
            })
            .collect(),
    };
    render(output, &payload, render_actions_human)
}

fn render_actions_human(payload: &ActionsOutput, w: &mut dyn Write) -> std::io::Result<()> {
    match payload.node {
        Some(node) => writeln!(w, "Node {node}:")?,
        None => writeln!(w, "Canvas:")?,
    }
    for row in &payload.actions {
        writeln!(w, "  {}", row.label)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn actions_args_accept_negative_coordinates() {
        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: ActionsArgs,
        }

        let parsed = Wrapper::parse_from(["test", "-m", "m.txt", "--x", "-5", "--y", "12.5"]);
        assert!((parsed.args.x + 5.0).abs() < f64::EPSILON);
        assert!((parsed.args.y - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn action_rows_flatten_the_action_tag() {
        let row = ActionRow {
            label: "Convert zero-in node 1".into(),
            action: ContextAction::ConvertZeroInNode { node: 0 },
        };
        let value = serde_json::to_value(&row).expect("json");
        assert_eq!(value["action"], "convert_zero_in_node");
        assert_eq!(value["node"], 0);
        assert_eq!(value["label"], "Convert zero-in node 1");
    }

    #[test]
    fn human_lists_labels_under_target() {
        let payload = ActionsOutput {
            x: 0.0,
            y: 0.0,
            node: None,
            actions: vec![
                ActionRow {
                    label: "All Possible Routes".into(),
                    action: ContextAction::ShowAllRoutes { start: None },
                },
                ActionRow {
                    label: "Convert zero-in nodes".into(),
                    action: ContextAction::ConvertZeroInNodes,
                },
            ],
        };
        let mut out = Vec::new();
        render_actions_human(&payload, &mut out).expect("render");
        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            "Canvas:\n  All Possible Routes\n  Convert zero-in nodes\n"
        );
    }
}

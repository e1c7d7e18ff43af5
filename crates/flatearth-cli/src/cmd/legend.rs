//! `flatearth legend` — colour key for node roles and edge styles.

use std::io::Write;

use clap::Args;
use flatearth_engine::GraphSession;
use flatearth_engine::scene::LegendEntry;

use crate::output::{OutputMode, pretty_section, render_mode};

/// Arguments for `flatearth legend`.
#[derive(Args, Debug, Default)]
pub struct LegendArgs {}

/// Execute `flatearth legend`.
pub fn run_legend(_args: &LegendArgs, output: OutputMode) -> anyhow::Result<()> {
    let entries = GraphSession::legend();
    render_mode(
        output,
        &entries,
        |e, w| render_text(e, w),
        |e, w| render_pretty(e, w),
    )
}

fn dash_style(entry: &LegendEntry) -> &'static str {
    match entry {
        LegendEntry::Edge { dash: Some(_), .. } => "dashed",
        LegendEntry::Edge { dash: None, .. } => "solid",
        LegendEntry::Node { .. } => "fill",
    }
}

fn render_text(entries: &[LegendEntry], w: &mut dyn Write) -> std::io::Result<()> {
    for entry in entries {
        writeln!(
            w,
            "{} {} {}",
            entry.color().hex(),
            dash_style(entry),
            entry.label()
        )?;
    }
    Ok(())
}

fn render_pretty(entries: &[LegendEntry], w: &mut dyn Write) -> std::io::Result<()> {
    let (nodes, edges): (Vec<&LegendEntry>, Vec<&LegendEntry>) = entries
        .iter()
        .partition(|e| matches!(e, LegendEntry::Node { .. }));

    pretty_section(w, "Nodes")?;
    for entry in nodes {
        writeln!(w, "  ● {:<20} {}", entry.label(), entry.color().hex())?;
    }
    writeln!(w)?;
    pretty_section(w, "Edges")?;
    for entry in edges {
        let stroke = if dash_style(entry) == "dashed" { "╌╌▶" } else { "──▶" };
        writeln!(w, "  {stroke} {:<20} {}", entry.label(), entry.color().hex())?;
    }
    Ok(())
}

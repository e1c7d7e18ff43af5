#![forbid(unsafe_code)]

mod cmd;
mod config;
mod input;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "flatearth: directed location-graph analysis, layout, and covering routes",
    long_about = None
)]
struct Cli {
    /// Enable debug logging for flatearth crates.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format: pretty, text, or json.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Engine config file (TOML). Overrides project and user config.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        resolve_output_mode(self.format, self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Analysis",
        about = "Classify nodes and edges",
        long_about = "Tag every node (zero in-degree, single in-degree, dead-end, bridge) and every edge (bidirectional, redundant, from zero in-degree), and report whether a covering route can be requested.",
        after_help = "EXAMPLES:\n    # Classify a matrix file\n    flatearth classify --matrix house.txt\n\n    # Include location names\n    flatearth classify --matrix house.txt --names rooms.txt\n\n    # Emit machine-readable output\n    flatearth classify --matrix house.txt --format json"
    )]
    Classify(cmd::classify::ClassifyArgs),

    #[command(
        name = "shortest-paths",
        next_help_heading = "Analysis",
        about = "All-pairs shortest hop counts",
        long_about = "Print the shortest number of hops between every pair of nodes. Unreachable pairs show as inf (text), ∞ (pretty), or null (json).",
        after_help = "EXAMPLES:\n    flatearth shortest-paths --matrix house.txt\n    flatearth shortest-paths --matrix house.txt --format json"
    )]
    ShortestPaths(cmd::shortest::ShortestPathsArgs),

    #[command(
        next_help_heading = "Drawing",
        about = "Compute node positions",
        long_about = "Place every node on a canvas with the ellipse, stress-majorization, or force-directed layout.",
        after_help = "EXAMPLES:\n    # Default ellipse on a 1200x800 canvas\n    flatearth layout --matrix house.txt\n\n    # Reproducible force-directed layout\n    flatearth layout --matrix house.txt --mode force --seed 42\n\n    # Stress layout on a custom canvas\n    flatearth layout --matrix house.txt --mode stress --width 800 --height 600"
    )]
    Layout(cmd::layout::LayoutCmdArgs),

    #[command(
        next_help_heading = "Drawing",
        about = "Build the drawable scene",
        long_about = "Build the scene a front end draws: node circles with role colours, edge segments with arrowheads and stroke styles, optionally restricted to one covering route.",
        after_help = "EXAMPLES:\n    # Every edge\n    flatearth scene --matrix house.txt --format json\n\n    # Only the second covering route starting at node 3\n    flatearth scene --matrix house.txt --path-start 3 --index 2"
    )]
    Scene(cmd::scene::SceneArgs),

    #[command(
        next_help_heading = "Drawing",
        about = "Context actions at a canvas point",
        long_about = "List the context-menu actions offered for a click at (x, y): per-node actions on a node, whole-graph actions on empty canvas.",
        after_help = "EXAMPLES:\n    flatearth actions --matrix house.txt --x 600 --y 400"
    )]
    Actions(cmd::actions::ActionsArgs),

    #[command(
        next_help_heading = "Drawing",
        about = "Show the colour legend",
        long_about = "Show the node-role and edge-style legend with colours and dash styles."
    )]
    Legend(cmd::legend::LegendArgs),

    #[command(
        next_help_heading = "Routes",
        about = "Enumerate covering routes",
        long_about = "Enumerate every route that visits each node exactly once and select one by position. Positions and node numbers are 1-based.",
        after_help = "EXAMPLES:\n    # First route from any start\n    flatearth routes --matrix house.txt\n\n    # Third route starting at node 2\n    flatearth routes --matrix house.txt --start 2 --index 3\n\n    # List them all\n    flatearth routes --matrix house.txt --list"
    )]
    Routes(cmd::routes::RoutesArgs),

    #[command(
        next_help_heading = "Routes",
        about = "Find one covering route",
        long_about = "Ask the route explorer for a single covering route from a start node and validate its answer against the matrix.",
        after_help = "EXAMPLES:\n    flatearth route --matrix house.txt --start 1\n    flatearth route --matrix house.txt --start 1 --budget 10000"
    )]
    Route(cmd::route::RouteArgs),

    #[command(
        name = "convert-zero-in",
        next_help_heading = "Routes",
        about = "Add reverse edges out of zero in-degree nodes",
        long_about = "For zero in-degree nodes, add an edge back from every successor so the node can be reached. Converts all such nodes unless --node is given.",
        after_help = "EXAMPLES:\n    # Preview the converted matrix\n    flatearth convert-zero-in --matrix house.txt\n\n    # Convert node 1 and save\n    flatearth convert-zero-in --matrix house.txt --node 1 --write"
    )]
    ConvertZeroIn(cmd::convert::ConvertArgs),

    #[command(
        next_help_heading = "Setup",
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n    flatearth completions bash > /etc/bash_completion.d/flatearth"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("FLATEARTH_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "flatearth=debug,info"
        } else {
            "flatearth=info,warn"
        })
    });

    let format = env::var("FLATEARTH_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let output = cli.output_mode();
    debug!(?output, command = ?cli.command, "starting");

    match run(&cli, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if render_error(output, &CliError::from_anyhow(&err)).is_err() {
                eprintln!("error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, output: OutputMode) -> anyhow::Result<()> {
    let load_config = || config::load_config(cli.config.as_deref());

    match &cli.command {
        Commands::Classify(args) => cmd::classify::run_classify(args, output),
        Commands::ShortestPaths(args) => cmd::shortest::run_shortest_paths(args, output),
        Commands::Layout(args) => cmd::layout::run_layout(args, output, load_config()?),
        Commands::Scene(args) => cmd::scene::run_scene(args, output, load_config()?),
        Commands::Actions(args) => cmd::actions::run_actions(args, output, load_config()?),
        Commands::Legend(args) => cmd::legend::run_legend(args, output),
        Commands::Routes(args) => cmd::routes::run_routes(args, output, load_config()?),
        Commands::Route(args) => cmd::route::run_route(args, output, load_config()?),
        Commands::ConvertZeroIn(args) => cmd::convert::run_convert(args, output),
        Commands::Completions(args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    }
}

//! Graph inputs shared by every analysis command.

use anyhow::{Context, Result};
use clap::Args;
use flatearth_engine::AdjacencyMatrix;
use std::path::{Path, PathBuf};
use tracing::debug;

/// `--matrix` / `--names` pair.
#[derive(Args, Debug, Clone)]
pub struct GraphArgs {
    /// Adjacency matrix file: rows of 0/1 separated by whitespace or commas,
    /// `#` starts a comment.
    #[arg(short, long, value_name = "FILE")]
    pub matrix: PathBuf,

    /// Location names, one per line (line N names node N).
    #[arg(short, long, value_name = "FILE")]
    pub names: Option<PathBuf>,
}

/// A matrix read from disk plus its optional names.
#[derive(Debug, Clone)]
pub struct LoadedGraph {
    pub matrix: AdjacencyMatrix,
    pub names: Vec<String>,
}

impl GraphArgs {
    pub fn load(&self) -> Result<LoadedGraph> {
        let matrix = read_matrix(&self.matrix)?;
        let names = match &self.names {
            Some(path) => read_names(path)?,
            None => Vec::new(),
        };
        debug!(
            nodes = matrix.node_count(),
            edges = matrix.edge_count(),
            names = names.len(),
            "graph loaded"
        );
        Ok(LoadedGraph { matrix, names })
    }
}

pub fn read_matrix(path: &Path) -> Result<AdjacencyMatrix> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    AdjacencyMatrix::parse(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn read_names(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(parse_names(&text))
}

fn parse_names(text: &str) -> Vec<String> {
    text.lines().map(|line| line.trim().to_string()).collect()
}

/// Convert a 1-based node number from the command line into a node id.
pub fn node_arg(display: usize) -> Result<usize> {
    display
        .checked_sub(1)
        .context("node numbers start at 1")
}

#[cfg(test)]
mod tests {
    use super::*;
    use flatearth_engine::EngineError;
    use tempfile::TempDir;

    #[test]
    fn names_keep_blank_lines_as_positions() {
        assert_eq!(parse_names("Hall\n\n  Attic \n"), vec!["Hall", "", "Attic"]);
    }

    #[test]
    fn load_reads_matrix_and_names() {
        let dir = TempDir::new().expect("tempdir");
        let matrix = dir.path().join("m.txt");
        let names = dir.path().join("n.txt");
        std::fs::write(&matrix, "# ring\n0,1\n1,0\n").expect("write");
        std::fs::write(&names, "Hall\nAttic\n").expect("write");

        let args = GraphArgs {
            matrix,
            names: Some(names),
        };
        let graph = args.load().expect("load");
        assert_eq!(graph.matrix.node_count(), 2);
        assert_eq!(graph.matrix.edge_count(), 2);
        assert_eq!(graph.names, vec!["Hall", "Attic"]);
    }

    #[test]
    fn malformed_matrix_keeps_engine_error() {
        let dir = TempDir::new().expect("tempdir");
        let matrix = dir.path().join("m.txt");
        std::fs::write(&matrix, "0 1\n0\n").expect("write");

        let err = read_matrix(&matrix).expect_err("not square");
        assert!(matches!(
            err.downcast_ref::<EngineError>(),
            Some(EngineError::MalformedMatrix { .. })
        ));
        assert!(err.to_string().starts_with("Failed to parse"));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = read_matrix(Path::new("/definitely/not/here.txt")).expect_err("missing");
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn node_arg_is_one_based() {
        assert_eq!(node_arg(1).expect("valid"), 0);
        assert!(node_arg(0).is_err());
    }
}

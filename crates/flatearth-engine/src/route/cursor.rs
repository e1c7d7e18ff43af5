//! Navigation over an enumerated set of covering paths.

use serde::Serialize;

use crate::error::{EngineError, Result};
use crate::graph::NodeId;

/// Navigation request from the path browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathCommand {
    First,
    Previous,
    Next,
    Last,
    /// Jump to a 1-based position, clamped into range.
    JumpTo(usize),
}

/// A non-empty result set with a selected entry. Every move clamps, so the
/// selection is always valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathCursor {
    paths: Vec<Vec<NodeId>>,
    index: usize,
}

impl PathCursor {
    /// Cursor positioned on the first path.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoFeasibleRoute`] if `paths` is empty.
    pub fn new(paths: Vec<Vec<NodeId>>, start: Option<NodeId>) -> Result<Self> {
        if paths.is_empty() {
            return Err(EngineError::NoFeasibleRoute { start });
        }
        Ok(Self { paths, index: 0 })
    }

    /// Move to a 0-based index, clamped to `[0, total − 1]`.
    pub fn go_to(&mut self, index: usize) -> &[NodeId] {
        self.index = index.min(self.paths.len() - 1);
        self.current()
    }

    pub fn apply(&mut self, command: PathCommand) -> &[NodeId] {
        let target = match command {
            PathCommand::First => 0,
            PathCommand::Previous => self.index.saturating_sub(1),
            PathCommand::Next => self.index.saturating_add(1),
            PathCommand::Last => self.paths.len() - 1,
            PathCommand::JumpTo(one_based) => one_based.saturating_sub(1),
        };
        self.go_to(target)
    }

    #[must_use]
    pub fn current(&self) -> &[NodeId] {
        &self.paths[self.index]
    }

    /// 0-based index of the selection.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// 1-based index of the selection, as displayed.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.index + 1
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.paths.len()
    }

    #[must_use]
    pub fn paths(&self) -> &[Vec<NodeId>] {
        &self.paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor() -> PathCursor {
        PathCursor::new(vec![vec![0, 1, 2], vec![1, 2, 0], vec![2, 0, 1]], None).expect("paths")
    }

    #[test]
    fn empty_set_is_rejected() {
        assert_eq!(
            PathCursor::new(Vec::new(), Some(2)),
            Err(EngineError::NoFeasibleRoute { start: Some(2) })
        );
    }

    #[test]
    fn navigation_clamps() {
        let mut c = cursor();
        assert_eq!(c.position(), 1);
        assert_eq!(c.apply(PathCommand::Previous), &[0, 1, 2]);
        assert_eq!(c.apply(PathCommand::Next), &[1, 2, 0]);
        assert_eq!(c.apply(PathCommand::Last), &[2, 0, 1]);
        assert_eq!(c.apply(PathCommand::Next), &[2, 0, 1]);
        assert_eq!(c.index(), 2);
        assert_eq!(c.apply(PathCommand::First), &[0, 1, 2]);
    }

    #[test]
    fn jump_is_one_based_and_clamped() {
        let mut c = cursor();
        c.apply(PathCommand::JumpTo(2));
        assert_eq!(c.position(), 2);
        c.apply(PathCommand::JumpTo(99));
        assert_eq!(c.position(), 3);
        c.apply(PathCommand::JumpTo(0));
        assert_eq!(c.position(), 1);
        assert_eq!(c.total(), 3);
    }
}

//! Interactive session over one evolving matrix.
//!
//! # Overview
//!
//! [`GraphSession`] owns the current matrix snapshot and everything derived
//! from it (classification, positions, the path cursor). Every change runs a
//! full recompute; the latest request wins and nothing is patched in place.
//!
//! # Revisions
//!
//! The revision counter goes up on every matrix change. A single-route
//! request captures the revision and the BLAKE3 content hash of the matrix
//! it was issued for:
//!
//! ```text
//! begin_route(start) ──→ RouteRequest { matrix, distances, revision, hash }
//!        │                        │ solve(explorer).await   (no &mut session held)
//!        │                        ↓
//!        └──── finish_route(RouteOutcome) ── hash differs? → StaleRoute
//!                                          └─ otherwise    → path scene
//! ```
//!
//! Only one request may be outstanding per matrix snapshot. A request that
//! outlives a matrix change is implicitly cancelled: its answer is discarded
//! unless the matrix has returned to identical content.

use tracing::{debug, info, instrument};

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::graph::classify::analyze;
use crate::graph::{AdjacencyMatrix, GraphAnalysis, NodeId, ShortestPathTable};
use crate::layout::{Canvas, LayoutMode, Position, compute_layout};
use crate::route::{
    DistanceMatrix, PathCommand, PathCursor, RouteExplorer, all_routes, check_route_request,
    convert_zero_in_node, convert_zero_in_nodes, validate_route,
};
use crate::scene::{ContextAction, EdgeSet, LegendEntry, Scene, build_scene, context_actions, legend};

/// An outstanding single-route request. Owns its snapshot so it can be
/// solved without borrowing the session.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    matrix: AdjacencyMatrix,
    distances: DistanceMatrix,
    start: NodeId,
    revision: u64,
    hash: String,
}

impl RouteRequest {
    #[must_use]
    pub const fn start(&self) -> NodeId {
        self.start
    }

    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub const fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Ask `explorer` for a route and validate it against the snapshot.
    pub async fn solve<E: RouteExplorer + Sync>(self, explorer: &E) -> RouteOutcome {
        let answer = explorer.solve_covering_route(&self.distances, self.start).await;
        let route = answer
            .ok_or(EngineError::NoFeasibleRoute {
                start: Some(self.start),
            })
            .and_then(|route| validate_route(&self.matrix, &route, Some(self.start)).map(|()| route));
        RouteOutcome {
            start: self.start,
            revision: self.revision,
            hash: self.hash,
            route,
        }
    }
}

/// Answer to a [`RouteRequest`], to be handed back to
/// [`GraphSession::finish_route`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteOutcome {
    pub start: NodeId,
    pub revision: u64,
    pub hash: String,
    pub route: Result<Vec<NodeId>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct InFlight {
    revision: u64,
    hash: String,
}

/// Matrix, names, layout choice, and derived state for one front end.
#[derive(Debug, Clone)]
pub struct GraphSession {
    matrix: AdjacencyMatrix,
    names: Vec<String>,
    mode: LayoutMode,
    canvas: Canvas,
    config: EngineConfig,
    revision: u64,
    hash: String,
    analysis: GraphAnalysis,
    positions: Vec<Position>,
    cursor: Option<PathCursor>,
    in_flight: Option<InFlight>,
}

impl GraphSession {
    /// Session on `matrix` with the default layout mode and canvas.
    #[must_use]
    pub fn new(matrix: AdjacencyMatrix, config: EngineConfig) -> Self {
        let mut session = Self {
            hash: matrix.content_hash(),
            analysis: analyze(&matrix),
            matrix,
            names: Vec::new(),
            mode: LayoutMode::default(),
            canvas: Canvas::default(),
            config,
            revision: 0,
            positions: Vec::new(),
            cursor: None,
            in_flight: None,
        };
        session.relayout();
        session
    }

    #[must_use]
    pub fn with_names(mut self, names: Vec<String>) -> Self {
        self.names = names;
        self
    }

    #[must_use]
    pub fn with_layout(mut self, mode: LayoutMode, canvas: Canvas) -> Self {
        self.mode = mode;
        self.canvas = canvas;
        self.relayout();
        self
    }

    #[must_use]
    pub const fn matrix(&self) -> &AdjacencyMatrix {
        &self.matrix
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub const fn analysis(&self) -> &GraphAnalysis {
        &self.analysis
    }

    #[must_use]
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    #[must_use]
    pub const fn layout_mode(&self) -> LayoutMode {
        self.mode
    }

    #[must_use]
    pub const fn canvas(&self) -> Canvas {
        self.canvas
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn content_hash(&self) -> &str {
        &self.hash
    }

    #[must_use]
    pub const fn cursor(&self) -> Option<&PathCursor> {
        self.cursor.as_ref()
    }

    #[must_use]
    pub const fn route_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Hop-count table for the current matrix.
    #[must_use]
    pub fn shortest_paths(&self) -> ShortestPathTable {
        ShortestPathTable::compute(&self.matrix)
    }

    /// Full pass: classify, lay out, and draw every edge.
    pub fn recompute(&mut self) -> Scene {
        self.analysis = analyze(&self.matrix);
        self.relayout();
        self.scene(EdgeSet::All)
    }

    /// Replace the matrix. Bumps the revision and drops the path cursor.
    #[instrument(skip(self, matrix), fields(n = matrix.node_count()))]
    pub fn set_matrix(&mut self, matrix: AdjacencyMatrix) -> Scene {
        self.matrix = matrix;
        self.matrix_changed();
        self.recompute()
    }

    pub fn set_names(&mut self, names: Vec<String>) {
        self.names = names;
    }

    pub fn set_layout_mode(&mut self, mode: LayoutMode) -> Scene {
        self.mode = mode;
        self.recompute()
    }

    pub fn resize(&mut self, canvas: Canvas) -> Scene {
        self.canvas = canvas;
        self.recompute()
    }

    /// Enumerate covering paths and select the first.
    ///
    /// # Errors
    ///
    /// Any failure of [`all_routes`]. The previous cursor is left in place.
    #[instrument(skip(self))]
    pub fn show_all_routes(&mut self, start: Option<NodeId>) -> Result<Scene> {
        let paths = all_routes(&self.matrix, start, &self.config.routes)?;
        let cursor = PathCursor::new(paths, start)?;
        info!(total = cursor.total(), "path cursor installed");
        self.cursor = Some(cursor);
        Ok(self.path_scene())
    }

    /// Move the cursor and draw the selected path.
    ///
    /// # Errors
    ///
    /// [`EngineError::NoActivePaths`] if no route set is loaded.
    pub fn go_to_path(&mut self, command: PathCommand) -> Result<Scene> {
        let cursor = self.cursor.as_mut().ok_or(EngineError::NoActivePaths)?;
        cursor.apply(command);
        Ok(self.path_scene())
    }

    /// Start a single-route request for the current snapshot.
    ///
    /// # Errors
    ///
    /// [`EngineError::RouteInFlight`] if a request for this snapshot is
    /// outstanding, or any [`check_route_request`] failure.
    pub fn begin_route(&mut self, start: NodeId) -> Result<RouteRequest> {
        if self.in_flight.as_ref().is_some_and(|f| f.hash == self.hash) {
            return Err(EngineError::RouteInFlight);
        }
        check_route_request(&self.matrix, Some(start))?;
        self.in_flight = Some(InFlight {
            revision: self.revision,
            hash: self.hash.clone(),
        });
        debug!(start, revision = self.revision, "route request issued");
        Ok(RouteRequest {
            matrix: self.matrix.clone(),
            distances: DistanceMatrix::from_adjacency(&self.matrix),
            start,
            revision: self.revision,
            hash: self.hash.clone(),
        })
    }

    /// Apply an answer, or discard it if the matrix has changed since.
    ///
    /// # Errors
    ///
    /// [`EngineError::StaleRoute`] for an outdated answer, otherwise the
    /// error carried by the outcome.
    pub fn finish_route(&mut self, outcome: RouteOutcome) -> Result<Scene> {
        if self.in_flight.as_ref().is_some_and(|f| f.revision == outcome.revision) {
            self.in_flight = None;
        }
        if outcome.hash != self.hash {
            debug!(requested = outcome.revision, current = self.revision, "stale route discarded");
            return Err(EngineError::StaleRoute {
                requested: outcome.revision,
                current: self.revision,
            });
        }
        let route = outcome.route?;
        Ok(self.scene(EdgeSet::Path(&route)))
    }

    /// Forget the outstanding request, if any.
    pub fn cancel_route(&mut self) {
        self.in_flight = None;
    }

    /// Convert one zero in-degree node.
    ///
    /// # Errors
    ///
    /// [`EngineError::NodeOutOfRange`] for an invalid node.
    pub fn convert_zero_in_node(&mut self, node: NodeId) -> Result<Scene> {
        if convert_zero_in_node(&mut self.matrix, node)? > 0 {
            self.matrix_changed();
        }
        Ok(self.recompute())
    }

    /// Convert every zero in-degree node.
    pub fn convert_zero_in_nodes(&mut self) -> Scene {
        if convert_zero_in_nodes(&mut self.matrix) > 0 {
            self.matrix_changed();
        }
        self.recompute()
    }

    /// Menu entries for a click at `point`.
    #[must_use]
    pub fn context_actions(&self, point: Position) -> Vec<ContextAction> {
        context_actions(&self.scene(EdgeSet::All), &self.analysis, point)
    }

    /// Node-role and edge-style key shown beside the canvas.
    #[must_use]
    pub fn legend() -> Vec<LegendEntry> {
        legend()
    }

    /// Scene for the cursor's selection, or every edge without a cursor.
    #[must_use]
    pub fn path_scene(&self) -> Scene {
        match &self.cursor {
            Some(cursor) => self.scene(EdgeSet::Path(cursor.current())),
            None => self.scene(EdgeSet::All),
        }
    }

    fn scene(&self, edges: EdgeSet<'_>) -> Scene {
        build_scene(
            &self.matrix,
            &self.analysis,
            &self.positions,
            edges,
            &self.names,
            &self.config.scene,
        )
    }

    fn matrix_changed(&mut self) {
        self.revision += 1;
        self.hash = self.matrix.content_hash();
        self.cursor = None;
        debug!(revision = self.revision, hash = %self.hash, "matrix changed");
    }

    fn relayout(&mut self) {
        let distances = self
            .mode
            .needs_distances()
            .then(|| ShortestPathTable::compute(&self.matrix));
        self.positions = compute_layout(
            self.mode,
            &self.matrix,
            distances.as_ref(),
            self.canvas,
            &self.config.layout,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::BacktrackingExplorer;

    fn cycle() -> AdjacencyMatrix {
        AdjacencyMatrix::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).expect("edges")
    }

    #[test]
    fn recompute_draws_every_edge() {
        let mut session = GraphSession::new(cycle(), EngineConfig::default());
        let scene = session.recompute();
        assert_eq!(scene.nodes.len(), 4);
        assert_eq!(scene.edges.len(), 4);
        assert!(scene.active_path.is_none());
    }

    #[test]
    fn matrix_change_bumps_revision_and_clears_cursor() {
        let mut session = GraphSession::new(cycle(), EngineConfig::default());
        session.show_all_routes(None).expect("routes");
        assert_eq!(session.cursor().map(PathCursor::total), Some(4));

        session.set_matrix(AdjacencyMatrix::from_edges(2, &[(0, 1)]).expect("edges"));
        assert_eq!(session.revision(), 1);
        assert!(session.cursor().is_none());
        assert_eq!(session.go_to_path(PathCommand::Next), Err(EngineError::NoActivePaths));
    }

    #[test]
    fn layout_switch_keeps_revision() {
        let mut session = GraphSession::new(cycle(), EngineConfig::default());
        let before = session.content_hash().to_string();
        session.set_layout_mode(LayoutMode::StressMajorization);
        session.resize(Canvas::new(400.0, 300.0));
        assert_eq!(session.revision(), 0);
        assert_eq!(session.content_hash(), before);
        assert_eq!(session.positions().len(), 4);
    }

    #[test]
    fn navigation_draws_selected_path() {
        let mut session = GraphSession::new(cycle(), EngineConfig::default());
        let scene = session.show_all_routes(None).expect("routes");
        assert_eq!(scene.active_path, Some(vec![0, 1, 2, 3]));
        assert_eq!(scene.edges.len(), 3);
        let scene = session.go_to_path(PathCommand::Last).expect("navigate");
        assert_eq!(scene.active_path, Some(vec![3, 0, 1, 2]));
    }

    #[test]
    fn failed_enumeration_keeps_previous_cursor() {
        let mut session = GraphSession::new(cycle(), EngineConfig::default());
        session.show_all_routes(Some(0)).expect("routes");
        assert!(session.show_all_routes(Some(9)).is_err());
        assert_eq!(session.cursor().map(PathCursor::total), Some(1));
    }

    #[test]
    fn conversion_bumps_revision_only_when_edges_change() {
        let star = AdjacencyMatrix::from_edges(4, &[(0, 1), (0, 2), (0, 3)]).expect("edges");
        let mut session = GraphSession::new(star, EngineConfig::default());
        session.convert_zero_in_node(1).expect("convert");
        assert_eq!(session.revision(), 0);
        session.convert_zero_in_node(0).expect("convert");
        assert_eq!(session.revision(), 1);
        assert!(session.matrix().has_edge(2, 0));
        session.convert_zero_in_nodes();
        assert_eq!(session.revision(), 1);
    }

    #[tokio::test]
    async fn second_request_for_same_snapshot_is_rejected() {
        let mut session = GraphSession::new(cycle(), EngineConfig::default());
        let request = session.begin_route(0).expect("request");
        assert_eq!(session.begin_route(1).err(), Some(EngineError::RouteInFlight));

        let outcome = request.solve(&BacktrackingExplorer::default()).await;
        let scene = session.finish_route(outcome).expect("fresh");
        assert_eq!(scene.active_path, Some(vec![0, 1, 2, 3]));
        assert!(!session.route_in_flight());
    }

    #[tokio::test]
    async fn answer_for_changed_matrix_is_stale() {
        let mut session = GraphSession::new(cycle(), EngineConfig::default());
        let request = session.begin_route(0).expect("request");
        session.set_matrix(AdjacencyMatrix::from_edges(3, &[(0, 1), (1, 2), (2, 0)]).expect("edges"));

        let outcome = request.solve(&BacktrackingExplorer::default()).await;
        assert_eq!(
            session.finish_route(outcome),
            Err(EngineError::StaleRoute {
                requested: 0,
                current: 1,
            })
        );
    }
}

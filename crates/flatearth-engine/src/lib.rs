#![forbid(unsafe_code)]
//! flatearth-engine library.
//!
//! Analysis and layout engine for directed graphs of locations: structural
//! classification, all-pairs shortest paths, three layout strategies,
//! covering-route enumeration, and a renderer-agnostic scene model.
//!
//! # Conventions
//!
//! - **Errors**: Use [`error::Result`] (backed by [`EngineError`]) for return types.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).
//!
//! # Pipeline
//!
//! ```text
//! AdjacencyMatrix
//!     ├─ graph::classify::analyze()          → GraphAnalysis (node roles, edge tags)
//!     └─ graph::shortest::ShortestPathTable  → hop-count table
//!             ↓
//! layout::compute_layout(mode, …)            → Vec<Position>
//!             ↓
//! scene::build_scene(…)                      → Scene (consumed by the presentation layer)
//! ```
//!
//! Covering routes (`route`) run independently and feed a restricted edge
//! set back into the scene builder. [`session::GraphSession`] ties the
//! pieces together for an interactive front end.

pub mod config;
pub mod error;
pub mod graph;
pub mod layout;
pub mod route;
pub mod scene;
pub mod session;

pub use config::EngineConfig;
pub use error::{EngineError, Result};
pub use graph::{AdjacencyMatrix, GraphAnalysis, NodeId, ShortestPathTable};
pub use layout::{Canvas, LayoutMode, Position};
pub use route::{PathCursor, RouteExplorer};
pub use scene::Scene;
pub use session::GraphSession;

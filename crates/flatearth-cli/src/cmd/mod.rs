pub mod actions;
pub mod classify;
pub mod completions;
pub mod convert;
pub mod layout;
pub mod legend;
pub mod route;
pub mod routes;
pub mod scene;
pub mod shortest;

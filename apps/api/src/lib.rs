//! CV editor backend: a CV data model, a LaTeX document generator over it,
//! and an HTTP surface for stateless rendering and transient editing sessions.

pub mod config;
pub mod editor;
pub mod errors;
pub mod latex;
pub mod models;
pub mod routes;
pub mod state;

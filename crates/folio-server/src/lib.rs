//! Folio server library - HTTP API for the blog backend.
//!
//! Routes, configuration and application state live here so integration
//! tests can build the same router as `main.rs`.

pub mod config;
pub mod logging;
pub mod routes;
pub mod state;

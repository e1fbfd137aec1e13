//! # readiness
//!
//! Application layer of the Material Readiness dashboard: document loading,
//! configuration, plain-text rendering, the CLI, and the HTTP API.
//!
//! The readiness computation itself lives in `readiness-core`.

pub mod api;
pub mod cli;
pub mod config;
pub mod loader;
pub mod render;

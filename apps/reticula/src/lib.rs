//! # Reticula
//!
//! Library half of the `reticula` binary: CLI definitions, config loading
//! and graph description loading. The graph engine lives in
//! `reticula-core`.

pub mod cli;
pub mod config;
pub mod loader;

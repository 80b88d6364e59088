//! # Reticula CLI Module
//!
//! This module implements the CLI interface for Reticula.
//!
//! ## Available Commands
//!
//! - `info` - Show graph size, components and edge kinds
//! - `cycles` - Enumerate simple cycles
//! - `rank` - Group nodes into topological ranks
//! - `sort` - Print a topological order
//! - `path` - Find a lightest walk between two nodes
//! - `mst` - Compute a minimum spanning tree
//! - `climb` - Hill-climb on node weights
//! - `classify` - Report tree/forest/polytree predicates

mod commands;

use crate::config::{PathAlgorithm, ReticulaConfig};
use crate::loader::LoadedGraph;
use clap::{Parser, Subcommand};
use reticula_core::GraphError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Reticula - graph toolkit
///
/// Loads a graph description (JSON or TOML) and runs one algorithm on it.
#[derive(Parser, Debug)]
#[command(name = "reticula")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the graph description (.json or .toml)
    #[arg(short, long, global = true, default_value = "graph.json")]
    pub graph: PathBuf,

    /// Optional TOML config with algorithm defaults
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show graph size, components and edge kinds
    Info,

    /// Enumerate every simple cycle
    Cycles,

    /// Group nodes into topological ranks
    Rank,

    /// Print one topological order
    Sort,

    /// Find a lightest walk between two nodes
    Path {
        /// Label of the start node
        #[arg(short, long)]
        from: String,

        /// Label of the end node
        #[arg(short, long)]
        to: String,

        /// Path finder (overrides the config file)
        #[arg(short, long, value_enum)]
        algorithm: Option<PathAlgorithm>,
    },

    /// Compute a minimum spanning tree
    Mst,

    /// Hill-climb on node weights
    Climb {
        /// Label of the start node
        #[arg(short, long)]
        start: String,
    },

    /// Report structural predicates
    Classify,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI command.
pub fn execute(cli: Cli) -> Result<(), GraphError> {
    let Some(command) = cli.command else {
        println!("No command specified. Use --help for usage information.");
        return Ok(());
    };

    let config = ReticulaConfig::load(cli.config.as_deref())?;
    let loaded = LoadedGraph::load(&cli.graph)?;

    match command {
        Commands::Info => cmd_info(&loaded, cli.json_mode),
        Commands::Cycles => cmd_cycles(&loaded, cli.json_mode),
        Commands::Rank => cmd_rank(&loaded, cli.json_mode),
        Commands::Sort => cmd_sort(&loaded, cli.json_mode),
        Commands::Path {
            from,
            to,
            algorithm,
        } => cmd_path(&loaded, &config, &from, &to, algorithm, cli.json_mode),
        Commands::Mst => cmd_mst(&loaded, cli.json_mode),
        Commands::Climb { start } => cmd_climb(&loaded, &start, cli.json_mode),
        Commands::Classify => cmd_classify(&loaded, &config, cli.json_mode),
    }
}

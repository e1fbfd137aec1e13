//! # Readiness CLI Module
//!
//! This module implements the CLI interface for the Readiness dashboard.
//!
//! ## Available Commands
//!
//! - `summary` - Executive traffic-light view (default)
//! - `cards` - One card per work package
//! - `timeline` - Schedule rows with per-material indicators
//! - `package` - Readiness and blocking items of one work package
//! - `check` - Validate the document and report unknown statuses
//! - `server` - Start the HTTP server

mod commands;

use crate::config::Config;
use clap::{Parser, Subcommand};
use readiness_core::{ReadinessError, ReadinessStatus};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Readiness - Material Readiness Dashboard
///
/// Shows whether construction work packages have their required
/// materials on site and can start.
#[derive(Parser, Debug)]
#[command(name = "readiness")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the work package document (overrides config)
    #[arg(short = 'D', long, global = true)]
    pub data: Option<PathBuf>,

    /// Path to a TOML config file (default: ./readiness.toml if present)
    #[arg(short = 'C', long, global = true)]
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
    /// Start HTTP server
    Server {
        /// Host to bind to (overrides config)
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show one card per work package
    Cards {
        /// Only packages with this status (ready, partial, blocked)
        #[arg(short, long)]
        status: Option<ReadinessStatus>,
    },

    /// Show the schedule timeline
    Timeline,

    /// Show the executive traffic-light summary
    Summary,

    /// Show one work package by id or name
    Package {
        /// Work package id or name
        key: String,
    },

    /// Validate the document and report unrecognised material statuses
    Check,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), ReadinessError> {
    let mut config = Config::load(cli.config.as_deref()).await?;
    if let Some(data) = cli.data {
        config.data.path = data;
    }
    let json_mode = cli.json_mode;

    match cli.command.unwrap_or(Commands::Summary) {
        Commands::Server { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            cmd_server(&config).await
        }
        Commands::Cards { status } => cmd_cards(&config.data.path, json_mode, status).await,
        Commands::Timeline => cmd_timeline(&config.data.path, json_mode).await,
        Commands::Summary => cmd_summary(&config.data.path, json_mode).await,
        Commands::Package { key } => cmd_package(&config.data.path, json_mode, &key).await,
        Commands::Check => cmd_check(&config.data.path, json_mode).await,
    }
}

// =============================================================================
// TESTS
// =============================================================================

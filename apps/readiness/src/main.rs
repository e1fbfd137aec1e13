//! # Readiness - Material Readiness Dashboard
//!
//! The main binary for the Material Readiness dashboard.
//!
//! This application provides:
//! - CLI views (cards, timeline, executive summary)
//! - HTTP JSON API server (axum-based)
//! - Document validation (`check`)
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                 apps/readiness (THE BINARY)                │
//! │                                                            │
//! │  ┌─────────────┐   ┌─────────────┐   ┌─────────────────┐  │
//! │  │    CLI      │   │  HTTP API   │   │     Loader      │  │
//! │  │   (clap)    │   │   (axum)    │   │ (tokio::fs)     │  │
//! │  └──────┬──────┘   └──────┬──────┘   └────────┬────────┘  │
//! │         │                 │                   │           │
//! │         └─────────────────┼───────────────────┘           │
//! │                           ▼                               │
//! │                  ┌─────────────────┐                      │
//! │                  │ readiness-core  │                      │
//! │                  │  (THE LOGIC)    │                      │
//! │                  └─────────────────┘                      │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Executive summary of the default document
//! readiness
//!
//! # Views
//! readiness cards --status blocked
//! readiness timeline --data site_b.json
//! readiness package "Steel Erection - Level 3"
//!
//! # Start the HTTP server
//! readiness server --host 0.0.0.0 --port 8080
//! ```

use clap::Parser;
use readiness::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // READINESS_LOG_FORMAT=json enables machine-parseable output.
    let log_format =
        std::env::var("READINESS_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "readiness=info,tower_http=debug".into());

    // Logs go to stderr so `--json-mode` output on stdout stays parseable.
    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    let cli = cli::Cli::parse();

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the startup banner.
fn print_banner() {
    println!(
        r#"
  Material Readiness v{}

  On site • In transit • Blocked
"#,
        env!("CARGO_PKG_VERSION")
    );
}

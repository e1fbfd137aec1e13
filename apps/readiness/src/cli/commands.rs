//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.
//!
//! Every view command loads the document once, assesses it, and renders
//! either plain text or pretty JSON (`--json-mode`).

use crate::api::{self, AppState, ServerSettings};
use crate::config::Config;
use crate::loader;
use crate::render;
use readiness_core::{AssessedPackage, CardView, Dashboard, ReadinessError, ReadinessStatus};
use serde::Serialize;
use std::path::Path;

/// Print `value` as pretty JSON.
fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), ReadinessError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| ReadinessError::ParseError(format!("JSON output: {}", e)))?;
    println!("{}", text);
    Ok(())
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_server(config: &Config) -> Result<(), ReadinessError> {
    let dashboard = loader::load_dashboard(&config.data.path).await?;
    let settings = ServerSettings::from_config(&config.server);

    println!("Readiness Dashboard Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:          {}", config.server.host);
    println!("  Port:          {}", config.server.port);
    println!("  Data:          {}", config.data.path.display());
    println!("  Work packages: {}", dashboard.len());
    println!();
    println!("Endpoints:");
    println!("  GET  /health              - Health check");
    println!("  GET  /work-packages       - Work packages with readiness");
    println!("  GET  /work-packages/{{key}} - One work package");
    println!("  GET  /cards               - Card view");
    println!("  GET  /timeline            - Timeline view");
    println!("  GET  /summary             - Executive summary");
    println!("  POST /reload              - Reload the document");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let state = AppState::new(dashboard).with_data_path(config.data.path.clone());
    let addr = format!("{}:{}", config.server.host, config.server.port);
    api::run_server(&addr, state, &settings).await
}

// =============================================================================
// VIEW COMMANDS
// =============================================================================

/// Show one card per work package, optionally only those with `status`.
pub async fn cmd_cards(
    data: &Path,
    json_mode: bool,
    status: Option<ReadinessStatus>,
) -> Result<(), ReadinessError> {
    let dashboard = loader::load_dashboard(data).await?;
    let cards: Vec<CardView> = dashboard
        .filtered(status)
        .into_iter()
        .map(AssessedPackage::card)
        .collect();

    if json_mode {
        return print_json(&cards);
    }

    print!("{}", render::render_cards(&cards));
    Ok(())
}

/// Show the schedule timeline.
pub async fn cmd_timeline(data: &Path, json_mode: bool) -> Result<(), ReadinessError> {
    let dashboard = loader::load_dashboard(data).await?;
    let rows = dashboard.timeline();

    if json_mode {
        return print_json(&rows);
    }

    print!("{}", render::render_timeline(&rows));
    Ok(())
}

/// Show the executive traffic-light summary.
pub async fn cmd_summary(data: &Path, json_mode: bool) -> Result<(), ReadinessError> {
    let dashboard = loader::load_dashboard(data).await?;
    let summary = dashboard.executive_summary();

    if json_mode {
        return print_json(&summary);
    }

    print!("{}", render::render_executive(&summary));
    Ok(())
}

/// Show one work package by id or name.
pub async fn cmd_package(data: &Path, json_mode: bool, key: &str) -> Result<(), ReadinessError> {
    let dashboard = loader::load_dashboard(data).await?;
    let assessed = dashboard.find(key)?;

    if json_mode {
        return print_json(assessed);
    }

    print!("{}", render::render_package(assessed));
    Ok(())
}

// =============================================================================
// CHECK COMMAND
// =============================================================================

/// Validate the document and list materials with unrecognised statuses.
///
/// Validation failures are errors; anomalies are only reported.
pub async fn cmd_check(data: &Path, json_mode: bool) -> Result<(), ReadinessError> {
    let packages = loader::load_work_packages(data).await?;
    let material_count: usize = packages.iter().map(|p| p.required_materials.len()).sum();
    let dashboard = Dashboard::assess(packages);
    let anomalies = loader::find_anomalies(&dashboard);

    if json_mode {
        let output = serde_json::json!({
            "data": data.to_string_lossy(),
            "valid": true,
            "work_packages": dashboard.len(),
            "materials": material_count,
            "counts": dashboard.counts(),
            "anomalies": anomalies,
        });
        return print_json(&output);
    }

    let counts = dashboard.counts();
    println!("Readiness Document Check");
    println!("========================");
    println!("Data: {}", data.display());
    println!();
    println!("Work packages: {}", dashboard.len());
    println!("Materials:     {}", material_count);
    println!(
        "Ready: {}  Partial: {}  Blocked: {}",
        counts.ready, counts.partial, counts.blocked
    );
    println!();

    if anomalies.is_empty() {
        println!("All material statuses recognised.");
    } else {
        println!(
            "{} material(s) with unrecognised status (counted as not ready):",
            anomalies.len()
        );
        for anomaly in &anomalies {
            println!(
                "  {} / {}: {}",
                anomaly.package,
                anomaly.material,
                anomaly.status.as_deref().unwrap_or("<missing>")
            );
        }
    }

    Ok(())
}

//! # Work Package Loader
//!
//! One-shot asynchronous load of the work package document.
//!
//! The document is a JSON object with a `work_packages` array (a bare
//! top-level array is accepted too). It is deserialized into the core
//! types, whose field checks run during deserialization, and a failure
//! names the offending path, e.g. `work_packages[2].required_materials[0].eta`.

use readiness_core::{Dashboard, ReadinessError, WorkPackage, primitives::MAX_WORK_PACKAGES};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Maximum document size (50 MB).
///
/// This prevents memory exhaustion from malicious or accidental large files.
const MAX_DOCUMENT_SIZE: u64 = 50 * 1024 * 1024;

// =============================================================================
// LOADING
// =============================================================================

/// Load the document at `path` and assess every work package.
pub async fn load_dashboard(path: &Path) -> Result<Dashboard, ReadinessError> {
    let packages = load_work_packages(path).await?;
    let dashboard = Dashboard::assess(packages);

    let anomalies = find_anomalies(&dashboard);
    for anomaly in &anomalies {
        tracing::warn!(
            event = "unrecognized_status",
            package = %anomaly.package,
            material = %anomaly.material,
            status = anomaly.status.as_deref().unwrap_or("<missing>"),
            "Unrecognised material status, counted as not ready"
        );
    }

    tracing::info!(
        "Loaded {} work packages from {} ({} status anomalies)",
        dashboard.len(),
        path.display(),
        anomalies.len()
    );
    Ok(dashboard)
}

/// Read and validate the document at `path`.
pub async fn load_work_packages(path: &Path) -> Result<Vec<WorkPackage>, ReadinessError> {
    let metadata = tokio::fs::metadata(path).await.map_err(|e| {
        ReadinessError::IoError(format!("Cannot read '{}': {}", path.display(), e))
    })?;

    if !metadata.is_file() {
        return Err(ReadinessError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    if metadata.len() > MAX_DOCUMENT_SIZE {
        return Err(ReadinessError::IoError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            MAX_DOCUMENT_SIZE
        )));
    }

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ReadinessError::IoError(format!("Read file: {}", e)))?;

    parse_document(&bytes)
}

/// Top-level document shape.
#[derive(Deserialize)]
struct Document {
    work_packages: Vec<WorkPackage>,
}

/// Parse and validate a work package document.
///
/// Syntax errors are `ParseError`. Anything else wrong with the content is
/// `Validation`, with `field` set to the path of the offending value, or
/// to `document` when the problem is at the top level.
pub fn parse_document(bytes: &[u8]) -> Result<Vec<WorkPackage>, ReadinessError> {
    let root: Value =
        serde_json::from_slice(bytes).map_err(|e| ReadinessError::ParseError(e.to_string()))?;

    let root = match root {
        Value::Array(_) => serde_json::json!({ "work_packages": root }),
        other => other,
    };

    let document: Document = serde_path_to_error::deserialize(root).map_err(|e| {
        let field = if e.path().iter().next().is_none() {
            "document".to_string()
        } else {
            e.path().to_string()
        };
        ReadinessError::validation(field, e.inner().to_string())
    })?;

    if document.work_packages.len() > MAX_WORK_PACKAGES {
        return Err(ReadinessError::validation(
            "work_packages",
            format!(
                "{} work packages exceeds maximum {}",
                document.work_packages.len(),
                MAX_WORK_PACKAGES
            ),
        ));
    }

    Ok(document.work_packages)
}

// =============================================================================
// ANOMALIES
// =============================================================================

/// A not-on-site material whose status is missing or unrecognised.
///
/// Such materials are counted as not ready; they usually mean a typo in
/// the source data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusAnomaly {
    pub package: String,
    pub material: String,
    pub status: Option<String>,
}

/// Every status anomaly in the dashboard, in source order.
pub fn find_anomalies(dashboard: &Dashboard) -> Vec<StatusAnomaly> {
    dashboard
        .packages()
        .iter()
        .flat_map(|assessed| {
            assessed
                .readiness
                .unrecognized_statuses()
                .into_iter()
                .map(|item| StatusAnomaly {
                    package: assessed.package.name.clone(),
                    material: item.description.clone(),
                    status: item.status.as_ref().map(|s| s.as_str().to_string()),
                })
        })
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================

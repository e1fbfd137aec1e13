//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.
//!
//! Work packages, cards, timeline rows and the executive summary are
//! serialized straight from the core types, so every endpoint and the CLI
//! share one shape per record. Only envelopes and errors live here.

use readiness_core::{AssessedPackage, ReadinessStatus};
use serde::{Deserialize, Serialize};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// WORK PACKAGES
// =============================================================================

/// Query string of `GET /work-packages`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
}

impl ListQuery {
    /// Parse the optional status filter.
    pub fn status_filter(&self) -> Result<Option<ReadinessStatus>, String> {
        self.status.as_deref().map(str::parse::<ReadinessStatus>).transpose()
    }
}

/// Work package list response.
///
/// Each entry is the package as loaded plus its `readiness`, in the same
/// shape `/work-packages/{key}` and the CLI's `--json-mode` produce.
#[derive(Debug, Clone, Serialize)]
pub struct WorkPackageListResponse<'a> {
    pub count: usize,
    pub work_packages: Vec<&'a AssessedPackage>,
}

impl<'a> WorkPackageListResponse<'a> {
    pub fn new(work_packages: Vec<&'a AssessedPackage>) -> Self {
        Self {
            count: work_packages.len(),
            work_packages,
        }
    }
}

// =============================================================================
// RELOAD / ERROR
// =============================================================================

/// Reload response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReloadResponse {
    pub success: bool,
    pub work_packages: usize,
    pub error: Option<String>,
}

impl ReloadResponse {
    pub fn success(work_packages: usize) -> Self {
        Self {
            success: true,
            work_packages,
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            work_packages: 0,
            error: Some(msg.into()),
        }
    }
}

/// Error body for failed requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: msg.into(),
        }
    }
}

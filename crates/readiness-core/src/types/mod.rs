//! # Core Type Definitions
//!
//! This module contains the input types of the readiness engine:
//! - Material status (`MaterialStatus`)
//! - Materials and work packages (`Material`, `WorkPackage`)
//! - Error types (`ReadinessError`)
//!
//! Work package metadata (discipline, schedule, progress) is opaque
//! pass-through data. Only `required_materials` feeds the calculator.

use crate::intake;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// MATERIAL STATUS
// =============================================================================

/// Shipping status reported for a material that is not yet on site.
///
/// The wire form is the raw vendor string. Recognised values map to
/// dedicated variants; anything else is kept verbatim in `Other` so it
/// survives a round trip and can be reported as an anomaly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MaterialStatus {
    /// `"In Transit"`: shipped, on its way.
    InTransit,
    /// `"RTS"`: ready to ship, vendor confirmed.
    Rts,
    /// `"Not RTS"`: not ready to ship.
    NotRts,
    /// Any unrecognised status string.
    Other(String),
}

impl MaterialStatus {
    pub const IN_TRANSIT: &'static str = "In Transit";
    pub const RTS: &'static str = "RTS";
    pub const NOT_RTS: &'static str = "Not RTS";

    /// Parse a raw status string. Matching is exact.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            Self::IN_TRANSIT => Self::InTransit,
            Self::RTS => Self::Rts,
            Self::NOT_RTS => Self::NotRts,
            other => Self::Other(other.to_string()),
        }
    }

    /// The raw status string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::InTransit => Self::IN_TRANSIT,
            Self::Rts => Self::RTS,
            Self::NotRts => Self::NOT_RTS,
            Self::Other(raw) => raw,
        }
    }

    /// True for statuses that count as "in transit" when the material
    /// is not on site (`In Transit` and `RTS`).
    #[must_use]
    pub fn is_moving(&self) -> bool {
        matches!(self, Self::InTransit | Self::Rts)
    }

    /// False for `Other`.
    #[must_use]
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<String> for MaterialStatus {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<&str> for MaterialStatus {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<MaterialStatus> for String {
    fn from(status: MaterialStatus) -> Self {
        match status {
            MaterialStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for MaterialStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// MATERIAL
// =============================================================================

/// A material required by a work package.
///
/// `is_on_site` is authoritative: when it is true the status string is
/// ignored for classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    /// Human-readable label.
    #[serde(deserialize_with = "intake::required_text")]
    pub description: String,
    /// Shipping status; absent when the source omits it.
    #[serde(
        default,
        deserialize_with = "intake::optional_status",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<MaterialStatus>,
    /// Physically present at the job site.
    pub is_on_site: bool,
    /// Estimated delivery date, kept as the source string.
    #[serde(
        default,
        deserialize_with = "intake::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub eta: Option<String>,
}

impl Material {
    /// Create a new material.
    #[must_use]
    pub fn new(
        description: impl Into<String>,
        status: Option<MaterialStatus>,
        is_on_site: bool,
        eta: Option<String>,
    ) -> Self {
        Self {
            description: description.into(),
            status,
            is_on_site,
            eta,
        }
    }

    /// A material already delivered to site.
    #[must_use]
    pub fn on_site(description: impl Into<String>) -> Self {
        Self::new(description, None, true, None)
    }

    /// A material not yet on site with the given status.
    #[must_use]
    pub fn awaiting(description: impl Into<String>, status: impl Into<MaterialStatus>) -> Self {
        Self::new(description, Some(status.into()), false, None)
    }

    /// Set the delivery estimate.
    #[must_use]
    pub fn with_eta(mut self, eta: impl Into<String>) -> Self {
        self.eta = Some(eta.into());
        self
    }

    /// Raw status string, if any.
    #[must_use]
    pub fn status_str(&self) -> Option<&str> {
        self.status.as_ref().map(MaterialStatus::as_str)
    }
}

// =============================================================================
// WORK PACKAGE
// =============================================================================

/// A unit of construction work with its material requirement and schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkPackage {
    /// Optional stable identifier from the source system.
    #[serde(
        default,
        deserialize_with = "intake::optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(deserialize_with = "intake::required_text")]
    pub name: String,
    #[serde(deserialize_with = "intake::text")]
    pub discipline: String,
    #[serde(deserialize_with = "intake::text")]
    pub scheduled_start: String,
    #[serde(deserialize_with = "intake::text")]
    pub scheduled_finish: String,
    /// Installation progress, 0..=100.
    #[serde(deserialize_with = "intake::progress")]
    pub progress_percent: u8,
    /// On the project's critical path.
    #[serde(default)]
    pub is_critical: bool,
    #[serde(deserialize_with = "intake::materials")]
    pub required_materials: Vec<Material>,
}

impl WorkPackage {
    /// Create a work package with empty schedule metadata.
    #[must_use]
    pub fn new(name: impl Into<String>, required_materials: Vec<Material>) -> Self {
        Self {
            id: None,
            name: name.into(),
            discipline: String::new(),
            scheduled_start: String::new(),
            scheduled_finish: String::new(),
            progress_percent: 0,
            is_critical: false,
            required_materials,
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors surfaced around the readiness engine.
///
/// The calculator itself never fails; these come from document intake,
/// lookups, and the application layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadinessError {
    /// A work package failed validation. `field` is the offending path.
    #[error("Validation failed at `{field}`: {reason}")]
    Validation { field: String, reason: String },

    /// No work package with the given id or name.
    #[error("Work package not found: {0}")]
    WorkPackageNotFound(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),

    /// The input document could not be parsed.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ReadinessError {
    /// Shorthand for a validation error.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_known_strings() {
        assert_eq!(MaterialStatus::parse("In Transit"), MaterialStatus::InTransit);
        assert_eq!(MaterialStatus::parse("RTS"), MaterialStatus::Rts);
        assert_eq!(MaterialStatus::parse("Not RTS"), MaterialStatus::NotRts);
    }

    #[test]
    fn status_matching_is_exact() {
        let status = MaterialStatus::parse("in transit");
        assert_eq!(status, MaterialStatus::Other("in transit".to_string()));
        assert!(!status.is_recognized());
        assert!(!status.is_moving());
    }

    #[test]
    fn status_round_trips_through_json() {
        let json = serde_json::to_string(&MaterialStatus::Other("Backordered".into()))
            .expect("serialize");
        assert_eq!(json, "\"Backordered\"");

        let back: MaterialStatus = serde_json::from_str("\"RTS\"").expect("deserialize");
        assert_eq!(back, MaterialStatus::Rts);
    }

    #[test]
    fn material_optional_fields_default() {
        let json = r#"{"description":"Rebar","is_on_site":false}"#;
        let material: Material = serde_json::from_str(json).expect("deserialize");
        assert_eq!(material.status, None);
        assert_eq!(material.eta, None);
        assert!(!material.is_on_site);
    }

    #[test]
    fn material_null_status_reads_as_missing() {
        let json = r#"{"description":"Rebar","status":null,"is_on_site":false,"eta":null}"#;
        let material: Material = serde_json::from_str(json).expect("deserialize");
        assert_eq!(material.status, None);
        assert_eq!(material.eta, None);
    }

    #[test]
    fn work_package_deserialization_validates_fields() {
        let json = r#"{
            "name": "",
            "discipline": "Concrete",
            "scheduled_start": "2024-03-04",
            "scheduled_finish": "2024-03-15",
            "progress_percent": 20,
            "required_materials": []
        }"#;
        assert!(serde_json::from_str::<WorkPackage>(json).is_err());
        let fixed = json.replace("\"\"", "\"Slab\"");
        assert!(serde_json::from_str::<WorkPackage>(&fixed).is_ok());
    }

    #[test]
    fn validation_error_names_field() {
        let err = ReadinessError::validation("work_packages[0].name", "must not be empty");
        assert_eq!(
            err.to_string(),
            "Validation failed at `work_packages[0].name`: must not be empty"
        );
    }
}

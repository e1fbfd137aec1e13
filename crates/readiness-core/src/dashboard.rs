//! # Dashboard Module
//!
//! An owned collection of work packages with their computed readiness.
//!
//! The dashboard is built once per load and never mutated; a reload
//! builds a new one.

use crate::readiness::{Readiness, ReadinessStatus, compute_readiness};
use crate::views::{CardView, ExecutiveLine, ExecutiveSummary, StatusCounts, TimelineRow};
use crate::{ReadinessError, WorkPackage};
use serde::Serialize;

/// A work package paired with its readiness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssessedPackage {
    pub package: WorkPackage,
    pub readiness: Readiness,
}

impl AssessedPackage {
    /// Compute readiness for `package`.
    #[must_use]
    pub fn assess(package: WorkPackage) -> Self {
        let readiness = compute_readiness(&package.required_materials);
        Self { package, readiness }
    }

    #[must_use]
    pub fn card(&self) -> CardView {
        CardView::new(&self.package, &self.readiness)
    }

    #[must_use]
    pub fn timeline_row(&self) -> TimelineRow {
        TimelineRow::new(&self.package, &self.readiness)
    }

    #[must_use]
    pub fn executive_line(&self) -> ExecutiveLine {
        ExecutiveLine::new(&self.package, &self.readiness)
    }
}

/// All work packages of one load, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    packages: Vec<AssessedPackage>,
}

impl Dashboard {
    /// Create an empty dashboard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assess every work package.
    #[must_use]
    pub fn assess(packages: Vec<WorkPackage>) -> Self {
        Self {
            packages: packages.into_iter().map(AssessedPackage::assess).collect(),
        }
    }

    #[must_use]
    pub fn packages(&self) -> &[AssessedPackage] {
        &self.packages
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Find a package by id, falling back to name.
    pub fn find(&self, key: &str) -> Result<&AssessedPackage, ReadinessError> {
        self.packages
            .iter()
            .find(|p| p.package.id.as_deref() == Some(key))
            .or_else(|| self.packages.iter().find(|p| p.package.name == key))
            .ok_or_else(|| ReadinessError::WorkPackageNotFound(key.to_string()))
    }

    /// Packages matching an optional status filter.
    #[must_use]
    pub fn filtered(&self, status: Option<ReadinessStatus>) -> Vec<&AssessedPackage> {
        self.packages
            .iter()
            .filter(|p| status.is_none_or(|s| p.readiness.status == s))
            .collect()
    }

    /// Number of packages per status.
    #[must_use]
    pub fn counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for assessed in &self.packages {
            counts.record(assessed.readiness.status);
        }
        counts
    }

    #[must_use]
    pub fn cards(&self) -> Vec<CardView> {
        self.packages.iter().map(AssessedPackage::card).collect()
    }

    #[must_use]
    pub fn timeline(&self) -> Vec<TimelineRow> {
        self.packages
            .iter()
            .map(AssessedPackage::timeline_row)
            .collect()
    }

    #[must_use]
    pub fn executive_summary(&self) -> ExecutiveSummary {
        ExecutiveSummary {
            counts: self.counts(),
            lines: self
                .packages
                .iter()
                .map(AssessedPackage::executive_line)
                .collect(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

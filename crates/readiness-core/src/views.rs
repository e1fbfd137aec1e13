//! # View Models
//!
//! Data behind the three dashboard views: work package cards, the
//! readiness timeline, and the executive traffic-light summary.
//!
//! These carry no layout or styling; renderers (text, JSON) decide how
//! they look.

use crate::readiness::{BlockingItem, MaterialClass, Readiness, ReadinessStatus, classify};
use crate::{Material, WorkPackage};
use serde::Serialize;
use std::fmt;

// =============================================================================
// SHARED PIECES
// =============================================================================

/// One material as shown on a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaterialLine {
    pub description: String,
    pub class: MaterialClass,
    pub status: Option<String>,
    pub eta: Option<String>,
}

impl From<&Material> for MaterialLine {
    fn from(material: &Material) -> Self {
        Self {
            description: material.description.clone(),
            class: classify(material),
            status: material.status_str().map(str::to_string),
            eta: material.eta.clone(),
        }
    }
}

/// Scheduled window of a work package, as given by the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schedule {
    pub start: String,
    pub finish: String,
}

impl From<&WorkPackage> for Schedule {
    fn from(package: &WorkPackage) -> Self {
        Self {
            start: package.scheduled_start.clone(),
            finish: package.scheduled_finish.clone(),
        }
    }
}

// =============================================================================
// CARD VIEW
// =============================================================================

/// Primary view: one card per work package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub name: String,
    pub discipline: String,
    pub is_critical: bool,
    pub schedule: Schedule,
    pub readiness_percent: u8,
    pub readiness: Readiness,
    pub materials: Vec<MaterialLine>,
}

impl CardView {
    /// Build a card from a package and its readiness.
    #[must_use]
    pub fn new(package: &WorkPackage, readiness: &Readiness) -> Self {
        Self {
            name: package.name.clone(),
            discipline: package.discipline.clone(),
            is_critical: package.is_critical,
            schedule: Schedule::from(package),
            readiness_percent: readiness.score.percent(),
            readiness: readiness.clone(),
            materials: package
                .required_materials
                .iter()
                .map(MaterialLine::from)
                .collect(),
        }
    }

    /// Materials keeping this package from starting.
    #[must_use]
    pub fn missing(&self) -> &[BlockingItem] {
        &self.readiness.blocking_items
    }
}

// =============================================================================
// TIMELINE VIEW
// =============================================================================

/// Secondary view: schedule progress alongside material readiness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineRow {
    pub name: String,
    pub discipline: String,
    pub is_critical: bool,
    pub schedule: Schedule,
    pub progress_percent: u8,
    pub indicators: Vec<MaterialClass>,
    pub readiness_percent: u8,
    pub status: ReadinessStatus,
}

impl TimelineRow {
    #[must_use]
    pub fn new(package: &WorkPackage, readiness: &Readiness) -> Self {
        Self {
            name: package.name.clone(),
            discipline: package.discipline.clone(),
            is_critical: package.is_critical,
            schedule: Schedule::from(package),
            progress_percent: package.progress_percent,
            indicators: package.required_materials.iter().map(classify).collect(),
            readiness_percent: readiness.score.percent(),
            status: readiness.status,
        }
    }
}

// =============================================================================
// EXECUTIVE VIEW
// =============================================================================

/// Traffic-light colour for a readiness status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrafficLight {
    Green,
    Yellow,
    Red,
}

impl From<ReadinessStatus> for TrafficLight {
    fn from(status: ReadinessStatus) -> Self {
        match status {
            ReadinessStatus::Ready => Self::Green,
            ReadinessStatus::Partial => Self::Yellow,
            ReadinessStatus::Blocked => Self::Red,
        }
    }
}

impl fmt::Display for TrafficLight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Green => "GREEN",
            Self::Yellow => "YELLOW",
            Self::Red => "RED",
        };
        f.write_str(label)
    }
}

/// One work package in the executive view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutiveLine {
    pub name: String,
    pub light: TrafficLight,
    pub headline: String,
    pub scheduled_start: String,
    pub is_critical: bool,
    pub readiness_percent: u8,
}

impl ExecutiveLine {
    #[must_use]
    pub fn new(package: &WorkPackage, readiness: &Readiness) -> Self {
        Self {
            name: package.name.clone(),
            light: TrafficLight::from(readiness.status),
            headline: headline(readiness),
            scheduled_start: package.scheduled_start.clone(),
            is_critical: package.is_critical,
            readiness_percent: readiness.score.percent(),
        }
    }
}

/// Status sentence shown next to the traffic light.
#[must_use]
pub fn headline(readiness: &Readiness) -> String {
    match readiness.status {
        ReadinessStatus::Ready => "Ready - All materials on site".to_string(),
        ReadinessStatus::Partial => format!(
            "Partial - {}/{} materials on site",
            readiness.on_site,
            readiness.total()
        ),
        ReadinessStatus::Blocked => {
            format!("Blocked - {} materials missing", readiness.not_ready)
        }
    }
}

/// Number of work packages per readiness status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatusCounts {
    pub ready: usize,
    pub partial: usize,
    pub blocked: usize,
}

impl StatusCounts {
    /// Count one more package with `status`.
    pub fn record(&mut self, status: ReadinessStatus) {
        match status {
            ReadinessStatus::Ready => self.ready = self.ready.saturating_add(1),
            ReadinessStatus::Partial => self.partial = self.partial.saturating_add(1),
            ReadinessStatus::Blocked => self.blocked = self.blocked.saturating_add(1),
        }
    }

    #[must_use]
    pub fn get(&self, status: ReadinessStatus) -> usize {
        match status {
            ReadinessStatus::Ready => self.ready,
            ReadinessStatus::Partial => self.partial,
            ReadinessStatus::Blocked => self.blocked,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.ready
            .saturating_add(self.partial)
            .saturating_add(self.blocked)
    }
}

/// Executive traffic-light dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ExecutiveSummary {
    pub counts: StatusCounts,
    pub lines: Vec<ExecutiveLine>,
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute_readiness;

    fn package(materials: Vec<Material>) -> WorkPackage {
        let mut pkg = WorkPackage::new("Electrical Rough-In", materials);
        pkg.discipline = "Electrical".to_string();
        pkg.scheduled_start = "2024-04-01".to_string();
        pkg.scheduled_finish = "2024-04-19".to_string();
        pkg.progress_percent = 25;
        pkg.is_critical = true;
        pkg
    }

    #[test]
    fn headline_for_each_status() {
        let ready = compute_readiness(&[Material::on_site("Wire")]);
        let partial = compute_readiness(&[
            Material::on_site("Wire"),
            Material::awaiting("Panels", "In Transit"),
        ]);
        let blocked = compute_readiness(&[
            Material::awaiting("Panels", "Not RTS"),
            Material::awaiting("Breakers", "Not RTS"),
        ]);

        assert_eq!(headline(&ready), "Ready - All materials on site");
        assert_eq!(headline(&partial), "Partial - 1/2 materials on site");
        assert_eq!(headline(&blocked), "Blocked - 2 materials missing");
    }

    #[test]
    fn card_lists_materials_in_order() {
        let pkg = package(vec![
            Material::on_site("Wire"),
            Material::awaiting("Panels", "RTS").with_eta("2024-03-28"),
            Material::awaiting("Breakers", "Not RTS"),
        ]);
        let readiness = compute_readiness(&pkg.required_materials);
        let card = CardView::new(&pkg, &readiness);

        let classes: Vec<MaterialClass> = card.materials.iter().map(|m| m.class).collect();
        assert_eq!(
            classes,
            vec![
                MaterialClass::OnSite,
                MaterialClass::InTransit,
                MaterialClass::NotReady
            ]
        );
        assert_eq!(card.readiness_percent, 33);
        assert_eq!(card.missing().len(), 2);
        assert_eq!(card.schedule.finish, "2024-04-19");
    }

    #[test]
    fn timeline_row_carries_progress_and_indicators() {
        let pkg = package(vec![
            Material::on_site("Wire"),
            Material::awaiting("Panels", "In Transit"),
        ]);
        let readiness = compute_readiness(&pkg.required_materials);
        let row = TimelineRow::new(&pkg, &readiness);

        assert_eq!(row.progress_percent, 25);
        assert_eq!(row.indicators.len(), 2);
        assert_eq!(row.status, ReadinessStatus::Partial);
        assert_eq!(row.readiness_percent, 50);
    }

    #[test]
    fn executive_line_maps_light() {
        let pkg = package(vec![Material::awaiting("Panels", "Not RTS")]);
        let readiness = compute_readiness(&pkg.required_materials);
        let line = ExecutiveLine::new(&pkg, &readiness);

        assert_eq!(line.light, TrafficLight::Red);
        assert!(line.is_critical);
        assert_eq!(line.readiness_percent, 0);
    }

    #[test]
    fn status_counts_record() {
        let mut counts = StatusCounts::default();
        counts.record(ReadinessStatus::Ready);
        counts.record(ReadinessStatus::Blocked);
        counts.record(ReadinessStatus::Blocked);

        assert_eq!(counts.get(ReadinessStatus::Blocked), 2);
        assert_eq!(counts.total(), 3);
    }
}

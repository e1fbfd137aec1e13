//! # Readiness Module
//!
//! Material readiness scoring for a single work package.
//!
//! - Score = materials on site / total materials
//! - A package with no required materials is vacuously ready
//! - Every material not on site is a blocking item, in input order
//!
//! Bucketing compares integers only. The fractional score exists for
//! output and is never used to decide a status.

use crate::primitives::PARTIAL_THRESHOLD_PERCENT;
use crate::{Material, MaterialStatus};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// SCORE
// =============================================================================

/// Exact readiness ratio: materials on site over total materials.
///
/// Serialized as the fraction in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    on_site: usize,
    total: usize,
}

impl Score {
    /// Create a score. `on_site` is clamped to `total`.
    #[must_use]
    pub fn new(on_site: usize, total: usize) -> Self {
        Self {
            on_site: on_site.min(total),
            total,
        }
    }

    #[must_use]
    pub fn on_site(&self) -> usize {
        self.on_site
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Score is exactly 1.0. Holds vacuously when there are no materials.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.on_site == self.total
    }

    /// Score is at least the partial threshold (0.5).
    #[must_use]
    pub fn meets_partial_threshold(&self) -> bool {
        self.on_site.saturating_mul(100)
            >= self.total.saturating_mul(PARTIAL_THRESHOLD_PERCENT as usize)
    }

    /// The score as a fraction in `[0, 1]`. `1.0` when there are no materials.
    #[must_use]
    #[allow(clippy::float_arithmetic)]
    pub fn as_fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.on_site as f64 / self.total as f64
        }
    }

    /// Whole percent, rounded half up.
    #[must_use]
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        let numerator = self
            .on_site
            .saturating_mul(200)
            .saturating_add(self.total);
        let denominator = self.total.saturating_mul(2);
        (numerator / denominator).min(100) as u8
    }
}

impl Serialize for Score {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_fraction())
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

// =============================================================================
// STATUS
// =============================================================================

/// Readiness bucket of a work package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadinessStatus {
    /// Every material is on site.
    Ready,
    /// At least half of the materials are on site.
    Partial,
    /// Less than half of the materials are on site.
    Blocked,
}

impl ReadinessStatus {
    /// Bucket a score. First match wins: complete, then partial, then blocked.
    #[must_use]
    pub fn from_score(score: Score) -> Self {
        if score.is_complete() {
            Self::Ready
        } else if score.meets_partial_threshold() {
            Self::Partial
        } else {
            Self::Blocked
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Partial => "partial",
            Self::Blocked => "blocked",
        }
    }
}

impl fmt::Display for ReadinessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReadinessStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ready" => Ok(Self::Ready),
            "partial" => Ok(Self::Partial),
            "blocked" => Ok(Self::Blocked),
            other => Err(format!(
                "Unknown readiness status: {}. Use: ready, partial, blocked",
                other
            )),
        }
    }
}

// =============================================================================
// MATERIAL CLASSIFICATION
// =============================================================================

/// Where a single material stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialClass {
    OnSite,
    InTransit,
    NotReady,
}

/// Classify one material.
///
/// On site always wins, whatever the status string says. Otherwise
/// `In Transit`/`RTS` count as in transit and everything else (including
/// `Not RTS`, a missing status, or an unrecognised one) as not ready.
#[must_use]
pub fn classify(material: &Material) -> MaterialClass {
    if material.is_on_site {
        MaterialClass::OnSite
    } else if material.status.as_ref().is_some_and(MaterialStatus::is_moving) {
        MaterialClass::InTransit
    } else {
        MaterialClass::NotReady
    }
}

// =============================================================================
// BLOCKING ITEM
// =============================================================================

/// A material that keeps a work package from starting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockingItem {
    pub description: String,
    pub status: Option<MaterialStatus>,
    pub eta: Option<String>,
}

impl BlockingItem {
    /// Status is missing or not one of the recognised strings.
    #[must_use]
    pub fn has_unrecognized_status(&self) -> bool {
        !self
            .status
            .as_ref()
            .is_some_and(MaterialStatus::is_recognized)
    }
}

impl From<&Material> for BlockingItem {
    fn from(material: &Material) -> Self {
        Self {
            description: material.description.clone(),
            status: material.status.clone(),
            eta: material.eta.clone(),
        }
    }
}

// =============================================================================
// READINESS
// =============================================================================

/// Readiness summary of one work package.
///
/// Derived data: recomputed on every load, never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readiness {
    pub score: Score,
    pub on_site: usize,
    pub in_transit: usize,
    pub not_ready: usize,
    pub status: ReadinessStatus,
    pub can_start: bool,
    pub blocking_items: Vec<BlockingItem>,
}

impl Readiness {
    /// Readiness of a package with no required materials.
    #[must_use]
    pub fn vacuous() -> Self {
        Self {
            score: Score::new(0, 0),
            on_site: 0,
            in_transit: 0,
            not_ready: 0,
            status: ReadinessStatus::Ready,
            can_start: true,
            blocking_items: Vec::new(),
        }
    }

    /// Total number of materials the summary was computed from.
    #[must_use]
    pub fn total(&self) -> usize {
        self.score.total()
    }

    /// Blocking items whose status is missing or unrecognised.
    #[must_use]
    pub fn unrecognized_statuses(&self) -> Vec<&BlockingItem> {
        self.blocking_items
            .iter()
            .filter(|item| item.has_unrecognized_status())
            .collect()
    }
}

/// Wire form shared by every JSON output: the score as a fraction plus
/// its whole percent and the material total.
impl Serialize for Readiness {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Readiness", 9)?;
        state.serialize_field("score", &self.score)?;
        state.serialize_field("percent", &self.score.percent())?;
        state.serialize_field("on_site", &self.on_site)?;
        state.serialize_field("in_transit", &self.in_transit)?;
        state.serialize_field("not_ready", &self.not_ready)?;
        state.serialize_field("total", &self.total())?;
        state.serialize_field("status", &self.status)?;
        state.serialize_field("can_start", &self.can_start)?;
        state.serialize_field("blocking_items", &self.blocking_items)?;
        state.end()
    }
}

/// Compute the readiness of a material list.
///
/// Total over any input: never fails, never panics.
#[must_use]
pub fn compute_readiness(materials: &[Material]) -> Readiness {
    if materials.is_empty() {
        return Readiness::vacuous();
    }

    let mut on_site: usize = 0;
    let mut in_transit: usize = 0;
    let mut not_ready: usize = 0;

    for material in materials {
        match classify(material) {
            MaterialClass::OnSite => on_site = on_site.saturating_add(1),
            MaterialClass::InTransit => in_transit = in_transit.saturating_add(1),
            MaterialClass::NotReady => not_ready = not_ready.saturating_add(1),
        }
    }

    let blocking_items: Vec<BlockingItem> = materials
        .iter()
        .filter(|m| !m.is_on_site)
        .map(BlockingItem::from)
        .collect();

    let score = Score::new(on_site, materials.len());
    let status = ReadinessStatus::from_score(score);

    Readiness {
        score,
        on_site,
        in_transit,
        not_ready,
        status,
        can_start: score.is_complete(),
        blocking_items,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_score_is_complete() {
        let score = Score::new(0, 0);
        assert!(score.is_complete());
        assert_eq!(score.as_fraction(), 1.0);
        assert_eq!(score.percent(), 100);
    }

    #[test]
    fn score_clamps_on_site() {
        let score = Score::new(5, 3);
        assert_eq!(score.on_site(), 3);
        assert!(score.is_complete());
    }

    #[test]
    fn partial_threshold_boundary() {
        assert!(!Score::new(1, 3).meets_partial_threshold());
        assert!(Score::new(1, 2).meets_partial_threshold());
        assert!(Score::new(2, 3).meets_partial_threshold());
        assert!(!Score::new(4, 9).meets_partial_threshold());
        assert!(Score::new(5, 10).meets_partial_threshold());
    }

    #[test]
    fn percent_rounds_half_up() {
        assert_eq!(Score::new(1, 8).percent(), 13); // 12.5
        assert_eq!(Score::new(1, 3).percent(), 33);
        assert_eq!(Score::new(2, 3).percent(), 67);
        assert_eq!(Score::new(0, 4).percent(), 0);
    }

    #[test]
    fn status_mapping() {
        assert_eq!(ReadinessStatus::from_score(Score::new(4, 4)), ReadinessStatus::Ready);
        assert_eq!(ReadinessStatus::from_score(Score::new(3, 4)), ReadinessStatus::Partial);
        assert_eq!(ReadinessStatus::from_score(Score::new(2, 4)), ReadinessStatus::Partial);
        assert_eq!(ReadinessStatus::from_score(Score::new(1, 4)), ReadinessStatus::Blocked);
        assert_eq!(ReadinessStatus::from_score(Score::new(0, 4)), ReadinessStatus::Blocked);
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("Blocked".parse::<ReadinessStatus>(), Ok(ReadinessStatus::Blocked));
        assert!("stalled".parse::<ReadinessStatus>().is_err());
    }

    #[test]
    fn on_site_wins_over_status() {
        let material = Material::new("Anchor bolts", Some(MaterialStatus::NotRts), true, None);
        assert_eq!(classify(&material), MaterialClass::OnSite);

        let readiness = compute_readiness(&[material]);
        assert_eq!(readiness.on_site, 1);
        assert_eq!(readiness.not_ready, 0);
        assert_eq!(readiness.status, ReadinessStatus::Ready);
    }

    #[test]
    fn rts_counts_as_in_transit() {
        assert_eq!(classify(&Material::awaiting("Duct", "RTS")), MaterialClass::InTransit);
        assert_eq!(
            classify(&Material::awaiting("Duct", "In Transit")),
            MaterialClass::InTransit
        );
    }

    #[test]
    fn missing_and_unknown_status_count_as_not_ready() {
        let missing = Material::new("Conduit", None, false, None);
        let unknown = Material::awaiting("Cable tray", "Backordered");

        assert_eq!(classify(&missing), MaterialClass::NotReady);
        assert_eq!(classify(&unknown), MaterialClass::NotReady);

        let readiness = compute_readiness(&[missing, unknown]);
        assert_eq!(readiness.not_ready, 2);
        assert_eq!(readiness.unrecognized_statuses().len(), 2);
    }

    #[test]
    fn blocking_items_include_in_transit_materials() {
        let materials = vec![
            Material::on_site("Formwork"),
            Material::awaiting("Rebar", "In Transit").with_eta("2024-03-02"),
            Material::awaiting("Embeds", "Not RTS"),
        ];

        let readiness = compute_readiness(&materials);
        let descriptions: Vec<&str> = readiness
            .blocking_items
            .iter()
            .map(|b| b.description.as_str())
            .collect();

        assert_eq!(descriptions, vec!["Rebar", "Embeds"]);
        assert_eq!(readiness.blocking_items[0].eta.as_deref(), Some("2024-03-02"));
        assert_eq!(readiness.blocking_items[1].eta, None);
        assert!(readiness.unrecognized_statuses().is_empty());
    }

    #[test]
    fn readiness_serializes_fraction() {
        let readiness = compute_readiness(&[
            Material::on_site("Pipe"),
            Material::awaiting("Valves", "RTS"),
        ]);
        let json = serde_json::to_value(&readiness).expect("serialize");

        assert_eq!(json["score"], serde_json::json!(0.5));
        assert_eq!(json["percent"], 50);
        assert_eq!(json["total"], 2);
        assert_eq!(json["in_transit"], 1);
        assert_eq!(json["status"], "partial");
        assert_eq!(json["can_start"], false);
        assert_eq!(json["blocking_items"][0]["status"], "RTS");
    }
}

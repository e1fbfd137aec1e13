//! # readiness-core
//!
//! The deterministic Readiness Engine - THE LOGIC.
//!
//! Given the required materials of a construction work package and their
//! shipping status, this crate computes how ready the package is to start:
//! the share of materials on site, a `ready`/`partial`/`blocked` bucket, and
//! the list of materials still blocking it.
//!
//! ## Architectural Constraints
//!
//! The engine:
//! - Is a pure transform: every result depends only on its input
//! - Never fails: the calculator is total over any material list
//! - Holds no state: callers own the [`Dashboard`] and rebuild it on reload
//! - Has NO async, NO I/O, NO network dependencies (pure Rust)
//!
//! Loading, rendering and serving live in the `readiness` application crate.

// =============================================================================
// MODULES
// =============================================================================

pub mod dashboard;
mod intake;
pub mod primitives;
pub mod readiness;
pub mod types;
pub mod views;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Material, MaterialStatus, ReadinessError, WorkPackage};

// =============================================================================
// RE-EXPORTS: Readiness Engine
// =============================================================================

pub use dashboard::{AssessedPackage, Dashboard};
pub use readiness::{
    BlockingItem, MaterialClass, Readiness, ReadinessStatus, Score, classify, compute_readiness,
};

// =============================================================================
// RE-EXPORTS: Views
// =============================================================================

pub use views::{
    CardView, ExecutiveLine, ExecutiveSummary, MaterialLine, Schedule, StatusCounts,
    TimelineRow, TrafficLight,
};

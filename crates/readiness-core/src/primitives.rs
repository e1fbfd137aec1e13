//! # Readiness Primitives
//!
//! Hardcoded thresholds and input limits for the readiness engine.
//!
//! These are compiled into the binary and immutable at runtime.

/// Minimum score, in percent, for a work package to be `partial`
/// rather than `blocked`.
///
/// - `score == 100%` is `ready` regardless of this value.
/// - `score >= PARTIAL_THRESHOLD_PERCENT` is `partial`.
/// - Anything lower is `blocked`.
pub const PARTIAL_THRESHOLD_PERCENT: u8 = 50;

/// Upper bound for `progress_percent`.
pub const MAX_PROGRESS_PERCENT: u8 = 100;

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum number of work packages in a single document.
///
/// Larger documents are rejected by the loader.
pub const MAX_WORK_PACKAGES: usize = 10_000;

/// Maximum number of required materials per work package.
pub const MAX_MATERIALS_PER_PACKAGE: usize = 1_000;

/// Maximum length for any text field (names, descriptions, dates).
///
/// Longer values are rejected by the intake validator.
pub const MAX_TEXT_LENGTH: usize = 512;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_threshold_is_half() {
        assert_eq!(PARTIAL_THRESHOLD_PERCENT, 50);
    }
}

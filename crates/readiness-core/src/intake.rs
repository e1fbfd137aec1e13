//! # Intake Module
//!
//! Field validation applied while work packages are deserialized.
//!
//! Every public way of building a [`WorkPackage`] or [`Material`] from
//! serialized data goes through these checks, so the calculator never
//! sees a package the loader would reject.
//!
//! - Reject malformed input with a reason; the deserializer supplies the path
//! - No enrichment or correction of data
//!
//! [`WorkPackage`]: crate::WorkPackage
//! [`Material`]: crate::Material

use crate::primitives::{MAX_MATERIALS_PER_PACKAGE, MAX_PROGRESS_PERCENT, MAX_TEXT_LENGTH};
use crate::{Material, MaterialStatus};
use serde::de::Error;
use serde::{Deserialize, Deserializer};

fn check_text(value: &str, required: bool) -> Result<(), String> {
    if required && value.trim().is_empty() {
        return Err("must not be empty".to_string());
    }
    if value.len() > MAX_TEXT_LENGTH {
        return Err(format!(
            "length {} exceeds maximum {}",
            value.len(),
            MAX_TEXT_LENGTH
        ));
    }
    Ok(())
}

fn check_progress(value: u8) -> Result<(), String> {
    if value > MAX_PROGRESS_PERCENT {
        return Err(format!("{} exceeds maximum {}", value, MAX_PROGRESS_PERCENT));
    }
    Ok(())
}

fn check_material_count(count: usize) -> Result<(), String> {
    if count > MAX_MATERIALS_PER_PACKAGE {
        return Err(format!(
            "{} materials exceeds maximum {}",
            count, MAX_MATERIALS_PER_PACKAGE
        ));
    }
    Ok(())
}

// =============================================================================
// FIELD DESERIALIZERS
// =============================================================================

/// Non-empty text within `MAX_TEXT_LENGTH` (names, descriptions).
pub(crate) fn required_text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let value = String::deserialize(d)?;
    check_text(&value, true).map_err(D::Error::custom)?;
    Ok(value)
}

/// Text within `MAX_TEXT_LENGTH`; may be empty.
pub(crate) fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let value = String::deserialize(d)?;
    check_text(&value, false).map_err(D::Error::custom)?;
    Ok(value)
}

/// Optional identifier: absent or `null` is fine, an empty string is not.
pub(crate) fn optional_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(d)?;
    if let Some(id) = &value {
        check_text(id, true).map_err(D::Error::custom)?;
    }
    Ok(value)
}

pub(crate) fn optional_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(d)?;
    if let Some(text) = &value {
        check_text(text, false).map_err(D::Error::custom)?;
    }
    Ok(value)
}

/// Raw status string, length-checked, then mapped to [`MaterialStatus`].
/// Unknown strings are kept, not rejected.
pub(crate) fn optional_status<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<Option<MaterialStatus>, D::Error> {
    let value = Option::<String>::deserialize(d)?;
    if let Some(raw) = &value {
        check_text(raw, false).map_err(D::Error::custom)?;
    }
    Ok(value.map(MaterialStatus::from))
}

/// Whole percent, 0..=100.
pub(crate) fn progress<'de, D: Deserializer<'de>>(d: D) -> Result<u8, D::Error> {
    let value = u8::deserialize(d)?;
    check_progress(value).map_err(D::Error::custom)?;
    Ok(value)
}

/// At most `MAX_MATERIALS_PER_PACKAGE` materials.
pub(crate) fn materials<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Material>, D::Error> {
    let value = Vec::<Material>::deserialize(d)?;
    check_material_count(value.len()).map_err(D::Error::custom)?;
    Ok(value)
}

// =============================================================================
// TESTS
// =============================================================================

//! Field validation for partners, projects and apartments.

use crate::error::CoreError;

/* --------------------------------------------------------------------------
   Status constants
   -------------------------------------------------------------------------- */

pub const PROJECT_STATUS_PLANNED: &str = "planned";
pub const PROJECT_STATUS_UNDER_CONSTRUCTION: &str = "under_construction";
pub const PROJECT_STATUS_COMPLETED: &str = "completed";

/// All valid project status values.
pub const VALID_PROJECT_STATUSES: &[&str] = &[
    PROJECT_STATUS_PLANNED,
    PROJECT_STATUS_UNDER_CONSTRUCTION,
    PROJECT_STATUS_COMPLETED,
];

pub const APARTMENT_STATUS_AVAILABLE: &str = "available";
pub const APARTMENT_STATUS_RESERVED: &str = "reserved";
pub const APARTMENT_STATUS_SOLD: &str = "sold";

/// All valid apartment status values.
pub const VALID_APARTMENT_STATUSES: &[&str] = &[
    APARTMENT_STATUS_AVAILABLE,
    APARTMENT_STATUS_RESERVED,
    APARTMENT_STATUS_SOLD,
];

/* --------------------------------------------------------------------------
   Validation limits
   -------------------------------------------------------------------------- */

/// Maximum length for partner and project names.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length for localized descriptions.
pub const MAX_DESCRIPTION_LEN: usize = 5000;

/* --------------------------------------------------------------------------
   Validation functions
   -------------------------------------------------------------------------- */

/// Names must be non-blank and at most [`MAX_NAME_LEN`] characters.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Name must not be empty".to_string()));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

pub fn validate_description(description: &str) -> Result<(), CoreError> {
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(CoreError::Validation(format!(
            "Description must be at most {MAX_DESCRIPTION_LEN} characters"
        )));
    }
    Ok(())
}

pub fn validate_project_status(status: &str) -> Result<(), CoreError> {
    validate_one_of("project status", status, VALID_PROJECT_STATUSES)
}

pub fn validate_apartment_status(status: &str) -> Result<(), CoreError> {
    validate_one_of("apartment status", status, VALID_APARTMENT_STATUSES)
}

/// Rooms >= 1, area > 0, price >= 0. `None` means "not being changed".
pub fn validate_apartment_numbers(
    rooms: Option<i32>,
    area_sqm: Option<f64>,
    price: Option<i64>,
) -> Result<(), CoreError> {
    if matches!(rooms, Some(r) if r < 1) {
        return Err(CoreError::Validation(
            "Rooms must be at least 1".to_string(),
        ));
    }
    if matches!(area_sqm, Some(a) if !(a > 0.0)) {
        return Err(CoreError::Validation(
            "Area must be greater than 0".to_string(),
        ));
    }
    if matches!(price, Some(p) if p < 0) {
        return Err(CoreError::Validation(
            "Price must not be negative".to_string(),
        ));
    }
    Ok(())
}

fn validate_one_of(label: &str, value: &str, allowed: &[&str]) -> Result<(), CoreError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid {label} '{value}'. Must be one of: {}",
            allowed.join(", ")
        )))
    }
}

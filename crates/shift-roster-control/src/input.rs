//! Validation of raw request fields.

use shift_roster_core::{SlotId, UserId, Week};

use crate::error::{Result, RosterError};

/// Take a required text field, rejecting absent or blank values.
pub(crate) fn required(value: Option<String>, field: &str) -> Result<String> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(RosterError::missing(field)),
    }
}

/// Parse a required week field.
pub(crate) fn week(value: Option<String>) -> Result<Week> {
    Ok(Week::parse(&required(value, "week")?)?)
}

/// Parse a week from a path segment.
pub(crate) fn week_str(value: &str) -> Result<Week> {
    Ok(Week::parse(value)?)
}

/// Parse a slot id.
pub(crate) fn slot(value: &str) -> Result<SlotId> {
    Ok(value.trim().parse()?)
}

/// Parse a user id.
pub(crate) fn user_id(value: &str) -> Result<UserId> {
    Ok(UserId::new(value)?)
}

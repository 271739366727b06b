//! Error types for the roster service.
//!
//! This module defines all errors that can occur while editing the schedule,
//! collecting availability and running auto-assignment.

use shift_roster_core::{IdError, SlotError, UserId, Week, WeekError};
use shift_roster_store::StoreError;
use thiserror::Error;

/// A result type using `RosterError`.
pub type Result<T> = std::result::Result<T, RosterError>;

/// Errors that can occur in roster operations.
#[derive(Debug, Error)]
pub enum RosterError {
    /// A required field is missing or empty.
    #[error("{0}")]
    Validation(String),

    /// The week is not a valid date.
    #[error("invalid week: {0}")]
    InvalidWeek(#[from] WeekError),

    /// The slot id does not name a slot.
    #[error("invalid slot: {0}")]
    InvalidSlot(#[from] SlotError),

    /// The user id is malformed.
    #[error("invalid user id: {0}")]
    InvalidUserId(#[from] IdError),

    /// Auto-assignment was requested but the directory holds no soldiers.
    #[error("no soldiers available to assign")]
    NoSoldiers,

    /// The requested user was not found.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// No user is registered with the given phone number.
    #[error("no user registered with phone {0}")]
    PhoneNotRegistered(String),

    /// The soldier has not submitted availability for the week.
    #[error("no availability from {user_id} for week {week}")]
    AvailabilityNotFound {
        /// The soldier.
        user_id: UserId,
        /// The week.
        week: Week,
    },

    /// Storage layer error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl RosterError {
    /// Shorthand for a missing required field.
    #[must_use]
    pub fn missing(field: &str) -> Self {
        Self::Validation(format!("{field} is required"))
    }

    /// Returns the appropriate HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::Validation(_)
            | Self::InvalidWeek(_)
            | Self::InvalidSlot(_)
            | Self::InvalidUserId(_)
            | Self::NoSoldiers => 400,
            Self::UserNotFound(_)
            | Self::PhoneNotRegistered(_)
            | Self::AvailabilityNotFound { .. } => 404,
            Self::Store(StoreError::Database(_)) => 503,
            Self::Store(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns true if the backing store could not serve the request.
    #[must_use]
    pub const fn is_store_failure(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_status_codes() {
        let user_id = UserId::from_millis(1);
        let week = Week::parse("2024-01-01").unwrap();

        assert_eq!(RosterError::missing("week").http_status_code(), 400);
        assert_eq!(RosterError::NoSoldiers.http_status_code(), 400);
        assert_eq!(
            RosterError::from(Week::parse("soon").unwrap_err()).http_status_code(),
            400
        );
        assert_eq!(RosterError::UserNotFound(user_id.clone()).http_status_code(), 404);
        assert_eq!(
            RosterError::AvailabilityNotFound { user_id, week }.http_status_code(),
            404
        );
        assert_eq!(
            RosterError::Store(StoreError::Database("io".into())).http_status_code(),
            503
        );
        assert_eq!(
            RosterError::Store(StoreError::Serialization("cbor".into())).http_status_code(),
            500
        );
    }

    #[test]
    fn missing_field_message() {
        assert_eq!(RosterError::missing("phone").to_string(), "phone is required");
    }
}

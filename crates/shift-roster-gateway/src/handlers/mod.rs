//! HTTP request handlers.
//!
//! This module contains all the endpoint handlers for the gateway API.

pub mod auth;
pub mod availability;
pub mod health;
pub mod shifts;
pub mod users;

use serde::Serialize;
use shift_roster_control::RosterError;

use crate::error::ApiError;

/// Confirmation message plus a payload, flattened into one JSON object.
#[derive(Debug, Serialize)]
pub struct MessageResponse<T> {
    /// Human-readable outcome.
    pub message: &'static str,
    /// Operation-specific fields.
    #[serde(flatten)]
    pub body: T,
}

impl<T> MessageResponse<T> {
    /// Wrap `body` with a message.
    #[must_use]
    pub const fn new(message: &'static str, body: T) -> Self {
        Self { message, body }
    }
}

/// Turn a store failure on a collection read into an empty collection.
///
/// Validation errors still propagate.
pub(crate) fn or_empty<T: Default>(
    result: Result<T, RosterError>,
    collection: &'static str,
) -> Result<T, ApiError> {
    match result {
        Err(err) if err.is_store_failure() => {
            tracing::warn!(collection, error = %err, "Store read failed, returning empty result");
            Ok(T::default())
        }
        other => Ok(other?),
    }
}

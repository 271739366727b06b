//! Availability endpoints.
//!
//! This module provides handlers for submitting a soldier's weekly
//! preferences and for the manager views over them.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use shift_roster_control::{
    AvailabilityRecord, AvailabilityStatus, Roster, RosterError, StatusSummary,
    SubmitAvailabilityRequest, Week,
};

use crate::error::ApiError;
use crate::handlers::{or_empty, MessageResponse};
use crate::state::GatewayState;

/// Body of a submission response.
#[derive(Debug, Serialize)]
pub struct AvailabilityBody {
    /// The stored record.
    pub availability: AvailabilityRecord,
}

/// List every record submitted for a week.
///
/// # Errors
///
/// Returns 400 if the week is not a date. Store failures degrade to an empty list.
pub async fn list_availability<R>(
    State(state): State<Arc<GatewayState<R>>>,
    Path(week): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    R: Roster + 'static,
{
    let records = or_empty(state.roster.list_availability(&week).await, "availability")?;

    Ok(Json(records))
}

/// Store a soldier's availability for a week, replacing any earlier one.
///
/// # Errors
///
/// Returns 400 if a field is missing or malformed and 404 for an unknown user.
pub async fn submit_availability<R>(
    State(state): State<Arc<GatewayState<R>>>,
    payload: Result<Json<SubmitAvailabilityRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    R: Roster + 'static,
{
    let Json(request) = payload?;
    let availability = state.roster.submit_availability(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(
            "Availability saved",
            AvailabilityBody { availability },
        )),
    ))
}

/// Who has and has not submitted for a week.
///
/// # Errors
///
/// Returns 400 if the week is not a date. Store failures degrade to an
/// empty report.
pub async fn availability_status<R>(
    State(state): State<Arc<GatewayState<R>>>,
    Path(week): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    R: Roster + 'static,
{
    let status = match state.roster.availability_status(&week).await {
        Err(err) if err.is_store_failure() => {
            tracing::warn!(error = %err, "Store read failed, returning empty status");
            AvailabilityStatus {
                week: Week::parse(&week).map_err(RosterError::from)?,
                soldiers: Vec::new(),
                summary: StatusSummary::new(0, 0),
            }
        }
        other => other?,
    };

    Ok(Json(status))
}

/// One soldier's record for a week.
///
/// # Errors
///
/// Returns 404 if the soldier has not submitted for the week.
pub async fn get_availability<R>(
    State(state): State<Arc<GatewayState<R>>>,
    Path((user_id, week)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError>
where
    R: Roster + 'static,
{
    let record = state.roster.get_availability(&user_id, &week).await?;

    Ok(Json(record))
}

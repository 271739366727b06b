//! Schedule endpoints.
//!
//! This module provides handlers for reading a week's schedule, editing single
//! slots, replacing a whole week and running auto-assignment.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use shift_roster_control::{
    AutoAssignRequest, Roster, SaveAllShiftsRequest, ShiftAssignment, UpdateShiftRequest,
};

use crate::error::ApiError;
use crate::handlers::{or_empty, MessageResponse};
use crate::state::GatewayState;

// =============================================================================
// Request/Response Types
// =============================================================================

/// Body of a single-slot update response.
#[derive(Debug, Serialize)]
pub struct ShiftBody {
    /// The stored assignment, or `null` when the slot was cleared.
    pub shift: Option<ShiftAssignment>,
}

/// Body of a whole-week save response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveAllBody {
    /// Number of stored assignments.
    pub shifts_count: usize,
}

// =============================================================================
// Handlers
// =============================================================================

/// List a week's assignments in slot order.
///
/// # Errors
///
/// Returns 400 if the week is not a date. Store failures degrade to an empty list.
pub async fn list_shifts<R>(
    State(state): State<Arc<GatewayState<R>>>,
    Path(week): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    R: Roster + 'static,
{
    let shifts = or_empty(state.roster.list_shifts(&week).await, "shifts")?;

    Ok(Json(shifts))
}

/// Assign a soldier to one slot, or clear the slot when `soldierName` is empty.
///
/// # Errors
///
/// Returns 400 if the slot id or week is invalid.
pub async fn update_shift<R>(
    State(state): State<Arc<GatewayState<R>>>,
    Path(slot_id): Path<String>,
    payload: Result<Json<UpdateShiftRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    R: Roster + 'static,
{
    let Json(request) = payload?;
    let shift = state.roster.update_shift(&slot_id, request).await?;

    let message = if shift.is_some() {
        "Shift updated"
    } else {
        "Shift cleared"
    };

    Ok(Json(MessageResponse::new(message, ShiftBody { shift })))
}

/// Replace a week's schedule.
///
/// # Errors
///
/// Returns 400 if the week or assignments are missing or a slot id is invalid.
pub async fn save_all_shifts<R>(
    State(state): State<Arc<GatewayState<R>>>,
    payload: Result<Json<SaveAllShiftsRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    R: Roster + 'static,
{
    let Json(request) = payload?;
    let shifts_count = state.roster.save_all_shifts(request).await?;

    Ok(Json(MessageResponse::new(
        "All shifts saved",
        SaveAllBody { shifts_count },
    )))
}

/// Run auto-assignment for a week and store the result.
///
/// # Errors
///
/// Returns 400 if the week is missing or there are no soldiers.
pub async fn auto_assign<R>(
    State(state): State<Arc<GatewayState<R>>>,
    payload: Result<Json<AutoAssignRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    R: Roster + 'static,
{
    let Json(request) = payload?;
    let outcome = state.roster.auto_assign(request).await?;

    Ok(Json(MessageResponse::new(
        "Auto assignment completed",
        outcome,
    )))
}

//! Phone-number login.
//!
//! There are no sessions or tokens: the client keeps the returned user and
//! sends ids with later requests.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use shift_roster_control::{LoginRequest, Roster, User};

use crate::error::ApiError;
use crate::state::GatewayState;

/// Response for a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// The user registered with the phone number.
    pub user: User,
}

/// Look up the user registered with a phone number.
///
/// # Errors
///
/// Returns 400 if the phone is missing and 404 if nobody has that number.
pub async fn login<R>(
    State(state): State<Arc<GatewayState<R>>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    R: Roster + 'static,
{
    let Json(request) = payload?;
    let user = state.roster.login(request).await?;

    Ok(Json(LoginResponse { user }))
}

//! User directory endpoints.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use shift_roster_control::{CreateUserRequest, Roster};

use crate::error::ApiError;
use crate::handlers::or_empty;
use crate::state::GatewayState;

/// List every user in directory order.
///
/// # Errors
///
/// Store failures degrade to an empty list, so this only fails on bugs.
pub async fn list_users<R>(
    State(state): State<Arc<GatewayState<R>>>,
) -> Result<impl IntoResponse, ApiError>
where
    R: Roster + 'static,
{
    let users = or_empty(state.roster.list_users().await, "users")?;

    Ok(Json(users))
}

/// Add a user. The role defaults to soldier.
///
/// # Errors
///
/// Returns 400 if the name or phone is missing.
pub async fn create_user<R>(
    State(state): State<Arc<GatewayState<R>>>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    R: Roster + 'static,
{
    let Json(request) = payload?;
    let user = state.roster.create_user(request).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

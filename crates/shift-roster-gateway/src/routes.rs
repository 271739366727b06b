//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use shift_roster_control::Roster;

use crate::handlers::{auth, availability, health, shifts, users};
use crate::state::GatewayState;

/// Create the gateway router with all routes and middleware.
///
/// # Routes
///
/// - `GET /health` - Health check
/// - `POST /auth/login` - Look up a user by phone
/// - `GET /users` - List users
/// - `POST /users` - Create user
/// - `GET /shifts/{week}` - A week's schedule
/// - `PUT /shifts/{slot_id}` - Set or clear one slot
/// - `POST /shifts/save-all` - Replace a week's schedule
/// - `POST /shifts/auto-assign` - Auto-assign a week
/// - `POST /availability` - Submit availability
/// - `GET /availability/{week}` - All records for a week
/// - `GET /availability/status/{week}` - Submission status for a week
/// - `GET /availability/{user_id}/{week}` - One soldier's record
///
/// Routes sharing a prefix share the parameter name `{key}` in the route
/// table; what it holds depends on the method and the segments after it.
pub fn create_router<R>(state: GatewayState<R>) -> Router
where
    R: Roster + 'static,
{
    // Extract config values before moving state
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout = state.config.request_timeout();

    // Build CORS layer
    let cors = build_cors_layer(&cors_origins);

    // Build the router
    let state = Arc::new(state);

    Router::new()
        // Health (public)
        .route("/health", get(health::health))
        // Directory
        .route("/auth/login", post(auth::login::<R>))
        .route(
            "/users",
            get(users::list_users::<R>).post(users::create_user::<R>),
        )
        // Schedule
        .route("/shifts/save-all", post(shifts::save_all_shifts::<R>))
        .route("/shifts/auto-assign", post(shifts::auto_assign::<R>))
        .route(
            "/shifts/{key}",
            get(shifts::list_shifts::<R>).put(shifts::update_shift::<R>),
        )
        // Availability
        .route("/availability", post(availability::submit_availability::<R>))
        .route(
            "/availability/status/{week}",
            get(availability::availability_status::<R>),
        )
        .route(
            "/availability/{key}",
            get(availability::list_availability::<R>),
        )
        .route(
            "/availability/{key}/{week}",
            get(availability::get_availability::<R>),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // For specific origins, parse them
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_any_origin() {
        let origins = vec!["*".to_string()];
        let _layer = build_cors_layer(&origins);
    }

    #[test]
    fn cors_specific_origins() {
        let origins = vec![
            "http://localhost:3000".to_string(),
            "https://roster.example.com".to_string(),
        ];
        let _layer = build_cors_layer(&origins);
    }
}

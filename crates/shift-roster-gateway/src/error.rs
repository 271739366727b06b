//! API error types and responses.
//!
//! This module defines the standard error format for all API responses:
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "week is required" } }
//! ```

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use shift_roster_control::RosterError;

/// API error type that implements `IntoResponse`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Invalid request body or parameters.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The backing store could not serve the request.
    #[error("store unavailable")]
    StoreUnavailable,

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

/// Error details.
#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl ApiError {
    /// Get the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code string for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::BadRequest(_) => "bad_request",
            Self::StoreUnavailable => "store_unavailable",
            Self::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();
        let message = self.to_string();

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<RosterError> for ApiError {
    fn from(err: RosterError) -> Self {
        match err.http_status_code() {
            400 => Self::BadRequest(err.to_string()),
            404 => Self::NotFound(err.to_string()),
            503 => {
                tracing::error!(error = %err, "Store unavailable");
                Self::StoreUnavailable
            }
            _ => {
                tracing::error!(error = %err, "Internal error");
                Self::Internal(err.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shift_roster_control::{UserId, Week};
    use shift_roster_store::StoreError;

    #[test]
    fn error_status_codes() {
        assert_eq!(
            ApiError::NotFound("test".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::BadRequest("test".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::StoreUnavailable.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::Internal("test".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn error_codes() {
        assert_eq!(ApiError::NotFound("test".into()).code(), "not_found");
        assert_eq!(ApiError::BadRequest("test".into()).code(), "bad_request");
        assert_eq!(ApiError::StoreUnavailable.code(), "store_unavailable");
        assert_eq!(ApiError::Internal("test".into()).code(), "internal_error");
    }

    #[test]
    fn roster_errors_map_by_kind() {
        let week = Week::parse("2024-01-01").unwrap();
        let not_found = RosterError::AvailabilityNotFound {
            user_id: UserId::from_millis(1),
            week,
        };

        assert!(matches!(
            ApiError::from(RosterError::NoSoldiers),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(ApiError::from(not_found), ApiError::NotFound(_)));
        assert!(matches!(
            ApiError::from(RosterError::Store(StoreError::Database("closed".into()))),
            ApiError::StoreUnavailable
        ));
        assert!(matches!(
            ApiError::from(RosterError::Internal("boom".into())),
            ApiError::Internal(_)
        ));
    }
}

//! HTTP error types for the masterclass server.
//!
//! Every error variant produces a JSON body with a machine-readable `error`
//! field and a human-readable `message`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Application-level error returned from HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Missing or wrong bearer credential.
    Unauthorized(String),
    /// Client sent invalid input.
    BadRequest(String),
    /// Internal server error.
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg),
        };

        let body = ErrorBody {
            error: error_type,
            message,
        };

        (status, axum::Json(body)).into_response()
    }
}

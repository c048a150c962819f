//! Bearer authentication for the content API.
//!
//! Compares the `Authorization: Bearer <key>` header against the configured
//! API key in constant time. When no key is configured every request passes.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use subtle::ConstantTimeEq;

use crate::error::AppError;
use crate::state::AppState;

/// Middleware that validates the bearer credential.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    let Some(expected) = state.api_key.as_deref() else {
        return next.run(req).await;
    };

    let presented = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim);

    let Some(presented) = presented else {
        return AppError::Unauthorized("missing bearer token".to_owned()).into_response();
    };

    if bool::from(presented.as_bytes().ct_eq(expected.as_bytes())) {
        next.run(req).await
    } else {
        tracing::warn!(path = %req.uri().path(), "rejected request with invalid bearer token");
        AppError::Unauthorized("invalid bearer token".to_owned()).into_response()
    }
}

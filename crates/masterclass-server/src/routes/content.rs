//! Content API: `<prefix>/masterclass-data`
//!
//! - `GET`:  the stored document, or the default document if none is stored
//! - `POST`: replace the document wholesale; last write wins

use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::{MethodRouter, get};
use axum::Json;
use serde::Serialize;

use masterclass_core::document::ContentDocument;
use masterclass_core::source::ContentSource;

use crate::error::AppError;
use crate::state::AppState;

/// Methods served at the content path.
pub fn method_router() -> MethodRouter<Arc<AppState>> {
    get(fetch_document).post(save_document)
}

/// Response body for a successful save.
#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub success: bool,
}

async fn fetch_document(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ContentDocument>, AppError> {
    state.store.fetch_document().await.map(Json).map_err(|e| {
        tracing::error!(error = %e, "failed to fetch masterclass data");
        AppError::Internal("Failed to fetch data".to_owned())
    })
}

async fn save_document(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ContentDocument>, JsonRejection>,
) -> Result<Json<SaveResponse>, AppError> {
    let Json(document) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "rejected content document");
        AppError::BadRequest(rejection.body_text())
    })?;

    state.store.save_document(&document).await.map_err(|e| {
        tracing::error!(error = %e, "failed to save masterclass data");
        AppError::Internal("Failed to save data".to_owned())
    })?;

    Ok(Json(SaveResponse { success: true }))
}

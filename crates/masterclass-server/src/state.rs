//! Shared application state.
//!
//! A single [`AppState`] is constructed at startup and shared across all
//! Axum handlers via `Arc`.

use std::sync::Arc;

use masterclass_core::store::ContentStore;
use masterclass_storage::StorageBackend;

/// Shared application state passed to all HTTP handlers.
pub struct AppState {
    /// The content document store.
    pub store: ContentStore,
    /// Bearer credential the content API requires, if any.
    pub api_key: Option<String>,
    /// Mount point of the content API.
    pub api_prefix: String,
}

impl AppState {
    /// Build state over a storage backend.
    pub fn new(
        backend: Arc<dyn StorageBackend>,
        api_key: Option<String>,
        api_prefix: impl Into<String>,
    ) -> Self {
        Self {
            store: ContentStore::new(backend),
            api_key,
            api_prefix: api_prefix.into(),
        }
    }

    /// Path of the content document endpoint.
    #[must_use]
    pub fn content_path(&self) -> String {
        format!("{}/masterclass-data", self.api_prefix)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("api_prefix", &self.api_prefix)
            .finish_non_exhaustive()
    }
}

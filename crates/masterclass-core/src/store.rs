//! Content store: the content document persisted under one fixed key.
//!
//! The store owns no state of its own. Every fetch reads the backend and
//! every save overwrites it, so two concurrent saves resolve as last write
//! wins with no merging.

use std::sync::Arc;

use masterclass_storage::StorageBackend;

use crate::document::ContentDocument;
use crate::error::ContentError;
use crate::source::ContentSource;

/// Storage key the content document lives under.
pub const CONTENT_KEY: &str = "masterclass_data";

/// Reads and writes the content document through an injected backend.
#[derive(Clone)]
pub struct ContentStore {
    backend: Arc<dyn StorageBackend>,
}

impl std::fmt::Debug for ContentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentStore")
            .field("key", &CONTENT_KEY)
            .finish_non_exhaustive()
    }
}

impl ContentStore {
    /// Create a store over the given backend.
    #[must_use]
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait::async_trait]
impl ContentSource for ContentStore {
    async fn fetch_document(&self) -> Result<ContentDocument, ContentError> {
        let Some(bytes) = self.backend.get(CONTENT_KEY).await? else {
            tracing::debug!(key = CONTENT_KEY, "no content stored, serving defaults");
            return Ok(ContentDocument::default());
        };

        serde_json::from_slice(&bytes).map_err(|e| ContentError::Decode {
            reason: e.to_string(),
        })
    }

    async fn save_document(&self, document: &ContentDocument) -> Result<(), ContentError> {
        let bytes = serde_json::to_vec(document).map_err(|e| ContentError::Encode {
            reason: e.to_string(),
        })?;
        self.backend.put(CONTENT_KEY, &bytes).await?;
        tracing::info!(key = CONTENT_KEY, bytes = bytes.len(), "content document saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use masterclass_storage::MemoryBackend;

    use super::*;
    use crate::testing::FailingBackend;

    fn sample() -> ContentDocument {
        ContentDocument {
            title: "Yangi masterclass".to_owned(),
            points: ["a".to_owned(), "b".to_owned(), "c".to_owned()],
            countdown_minutes: 5,
            ..ContentDocument::default()
        }
    }

    #[tokio::test]
    async fn empty_store_serves_defaults() {
        let backend = MemoryBackend::new();
        let store = ContentStore::new(Arc::new(backend.clone()));

        let doc = store.fetch_document().await.unwrap();
        assert_eq!(doc, ContentDocument::default());
        // Reading defaults must not persist them.
        assert!(backend.is_empty().await);
    }

    #[tokio::test]
    async fn save_then_fetch_returns_saved_document() {
        let store = ContentStore::new(Arc::new(MemoryBackend::new()));
        store.save_document(&sample()).await.unwrap();
        assert_eq!(store.fetch_document().await.unwrap(), sample());
    }

    #[tokio::test]
    async fn last_write_wins() {
        let store = ContentStore::new(Arc::new(MemoryBackend::new()));
        store.save_document(&sample()).await.unwrap();

        let second = ContentDocument {
            subtitle: "ikkinchi".to_owned(),
            ..ContentDocument::default()
        };
        store.save_document(&second).await.unwrap();

        assert_eq!(store.fetch_document().await.unwrap(), second);
    }

    #[tokio::test]
    async fn document_is_stored_as_json_under_fixed_key() {
        let backend = MemoryBackend::new();
        let store = ContentStore::new(Arc::new(backend.clone()));
        store.save_document(&sample()).await.unwrap();

        let raw = backend.get(CONTENT_KEY).await.unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_slice(&raw).unwrap();
        assert_eq!(json["title"], "Yangi masterclass");
        assert_eq!(json["countdownMinutes"], 5);
    }

    #[tokio::test]
    async fn corrupt_bytes_are_a_decode_error() {
        let backend = MemoryBackend::new();
        backend.put(CONTENT_KEY, b"not json").await.unwrap();
        let store = ContentStore::new(Arc::new(backend));

        let err = store.fetch_document().await.unwrap_err();
        assert!(matches!(err, ContentError::Decode { .. }));
    }

    #[tokio::test]
    async fn storage_failures_surface_as_storage_errors() {
        let store = ContentStore::new(Arc::new(FailingBackend));

        let err = store.fetch_document().await.unwrap_err();
        assert!(matches!(err, ContentError::Storage(_)));

        let err = store.save_document(&sample()).await.unwrap_err();
        assert!(matches!(err, ContentError::Storage(_)));
    }
}

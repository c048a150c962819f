//! Test doubles shared by the unit tests in this crate.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use masterclass_storage::{StorageBackend, StorageError};

use crate::document::ContentDocument;
use crate::error::ContentError;
use crate::source::ContentSource;

/// A backend whose every call fails.
pub struct FailingBackend;

#[async_trait::async_trait]
impl StorageBackend for FailingBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Err(StorageError::Read {
            key: key.to_owned(),
            reason: "backend offline".to_owned(),
        })
    }

    async fn put(&self, key: &str, _value: &[u8]) -> Result<(), StorageError> {
        Err(StorageError::Write {
            key: key.to_owned(),
            reason: "backend offline".to_owned(),
        })
    }
}

/// A content source that records saves and can be told to fail.
#[derive(Default)]
pub struct StubSource {
    pub document: Mutex<Option<ContentDocument>>,
    pub fail_fetch: bool,
    pub fail_save: bool,
    pub saves: AtomicUsize,
}

impl StubSource {
    pub fn with_document(document: ContentDocument) -> Self {
        Self {
            document: Mutex::new(Some(document)),
            ..Self::default()
        }
    }

    pub fn unreachable() -> Self {
        Self {
            fail_fetch: true,
            fail_save: true,
            ..Self::default()
        }
    }

    pub fn saved(&self) -> Option<ContentDocument> {
        self.document.lock().ok().and_then(|d| d.clone())
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ContentSource for StubSource {
    async fn fetch_document(&self) -> Result<ContentDocument, ContentError> {
        if self.fail_fetch {
            return Err(ContentError::Transport {
                reason: "connection refused".to_owned(),
            });
        }
        Ok(self.saved().unwrap_or_default())
    }

    async fn save_document(&self, document: &ContentDocument) -> Result<(), ContentError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.fail_save {
            return Err(ContentError::Status {
                status: 500,
                message: "Failed to save data".to_owned(),
            });
        }
        if let Ok(mut slot) = self.document.lock() {
            *slot = Some(document.clone());
        }
        Ok(())
    }
}

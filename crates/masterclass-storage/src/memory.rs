//! In-memory storage backend.
//!
//! Nothing survives a restart. Used when `MASTERCLASS_STORAGE=memory` and
//! throughout the test suites.

use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{StorageBackend, StorageError};

/// An in-memory storage backend backed by a `BTreeMap`.
///
/// Clones share the same map, so a test can keep a handle to the backend it
/// injected and inspect what was written.
///
/// # Examples
///
/// ```
/// # use masterclass_storage::{MemoryBackend, StorageBackend};
/// # #[tokio::main]
/// # async fn main() {
/// let backend = MemoryBackend::new();
/// backend.put("masterclass_data", b"{}").await.unwrap();
/// let val = backend.get("masterclass_data").await.unwrap();
/// assert_eq!(val, Some(b"{}".to_vec()));
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MemoryBackend {
    data: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
}

impl MemoryBackend {
    /// Create a new empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Number of keys currently stored.
    pub async fn len(&self) -> usize {
        self.data.read().await.len()
    }

    /// Whether no key has been written yet.
    pub async fn is_empty(&self) -> bool {
        self.data.read().await.is_empty()
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl StorageBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let data = self.data.read().await;
        Ok(data.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        let mut data = self.data.write().await;
        data.insert(key.to_owned(), value.to_vec());
        Ok(())
    }
}

//! `RocksDB` storage backend.
//!
//! Wraps the `rocksdb` crate behind the [`StorageBackend`] trait. `RocksDB`
//! is a synchronous C++ library, so every call is dispatched to the Tokio
//! blocking pool.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rocksdb::{DBWithThreadMode, MultiThreaded, Options};

use crate::{StorageBackend, StorageError};

type Db = DBWithThreadMode<MultiThreaded>;

/// A storage backend backed by `RocksDB`.
///
/// # Examples
///
/// ```no_run
/// # use masterclass_storage::RocksDbBackend;
/// let backend = RocksDbBackend::open("/var/lib/masterclass/data").unwrap();
/// ```
#[derive(Clone)]
pub struct RocksDbBackend {
    db: Arc<Db>,
    path: PathBuf,
}

impl std::fmt::Debug for RocksDbBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RocksDbBackend")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl RocksDbBackend {
    /// Open a `RocksDB` database at the given path, creating it if missing.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] if `RocksDB` fails to open or create the
    /// database at the specified path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let mut opts = Options::default();
        opts.create_if_missing(true);

        let db = Db::open(&opts, path).map_err(|e| StorageError::Open {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        tracing::debug!(path = %path.display(), "opened RocksDB storage");

        Ok(Self {
            db: Arc::new(db),
            path: path.to_path_buf(),
        })
    }

    /// Return the filesystem path of this database.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl StorageBackend for RocksDbBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let db = Arc::clone(&self.db);
        let key = key.to_owned();
        tokio::task::spawn_blocking(move || {
            db.get(key.as_bytes()).map_err(|e| StorageError::Read {
                key,
                reason: e.to_string(),
            })
        })
        .await
        .map_err(|e| StorageError::Read {
            key: String::new(),
            reason: format!("blocking task panicked: {e}"),
        })?
    }

    async fn put(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        let db = Arc::clone(&self.db);
        let key = key.to_owned();
        let value = value.to_vec();
        tokio::task::spawn_blocking(move || {
            db.put(key.as_bytes(), &value)
                .map_err(|e| StorageError::Write {
                    key,
                    reason: e.to_string(),
                })
        })
        .await
        .map_err(|e| StorageError::Write {
            key: String::new(),
            reason: format!("blocking task panicked: {e}"),
        })?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let backend = RocksDbBackend::open(dir.path()).unwrap();
        assert_eq!(backend.get("masterclass_data").await.unwrap(), None);
        assert_eq!(backend.path(), dir.path());
    }

    #[tokio::test]
    async fn value_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let backend = RocksDbBackend::open(dir.path()).unwrap();
            backend.put("masterclass_data", b"v1").await.unwrap();
            backend.put("masterclass_data", b"v2").await.unwrap();
        }

        let reopened = RocksDbBackend::open(dir.path()).unwrap();
        let val = reopened.get("masterclass_data").await.unwrap();
        assert_eq!(val, Some(b"v2".to_vec()));
    }

    #[test]
    fn open_on_a_file_fails() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = RocksDbBackend::open(file.path()).unwrap_err();
        assert!(matches!(err, StorageError::Open { .. }));
    }
}

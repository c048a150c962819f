//! Storage backend abstraction for the masterclass service.
//!
//! This crate defines the [`StorageBackend`] trait, a plain key-value
//! interface that knows nothing about landing-page content. The content
//! store in `masterclass-core` serializes documents to JSON and hands the
//! bytes to whichever backend was injected at startup.
//!
//! Two implementations are provided:
//!
//! - [`RocksDbBackend`]: persistent, backed by `RocksDB` (feature `rocksdb-backend`)
//! - [`MemoryBackend`]: in-memory, for development and tests

mod error;
mod memory;
#[cfg(feature = "rocksdb-backend")]
mod rocksdb_backend;

pub use error::StorageError;
pub use memory::MemoryBackend;
#[cfg(feature = "rocksdb-backend")]
pub use rocksdb_backend::RocksDbBackend;

/// A pluggable key-value storage backend.
///
/// Keys are UTF-8 strings; values are opaque byte arrays. The service only
/// ever touches a single key, but backends make no assumption about that.
///
/// Implementations must be safe to share across async tasks (`Send + Sync`).
#[async_trait::async_trait]
pub trait StorageBackend: Send + Sync + 'static {
    /// Retrieve a value by key.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Read`] if the underlying backend fails.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Store a key-value pair, overwriting any existing value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Write`] if the underlying backend fails.
    async fn put(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;
}

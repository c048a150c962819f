//! Storage error types.

/// Errors that can occur during storage operations.
///
/// Every variant names the key or path involved so a log line is enough to
/// locate the failure.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Failed to open the storage backend at the given path.
    #[error("failed to open storage at '{path}': {reason}")]
    Open { path: String, reason: String },

    /// Failed to read a value from storage.
    #[error("failed to read key '{key}': {reason}")]
    Read { key: String, reason: String },

    /// Failed to write a value to storage.
    #[error("failed to write key '{key}': {reason}")]
    Write { key: String, reason: String },
}

//! Error types for `masterclass-core`.
//!
//! A single enum covers the three ways a content request can fail: the
//! transport never reached the API, the API answered with a non-success
//! status, or the storage behind the API failed. Views treat them all the
//! same way, but logs keep them apart.

use masterclass_storage::StorageError;

/// Errors from fetching or saving the content document.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// The request never reached the content API (connect, timeout, TLS).
    #[error("content API unreachable: {reason}")]
    Transport { reason: String },

    /// The content API answered with a non-success status.
    #[error("content API returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The storage backend behind the content store failed.
    #[error("content storage error: {0}")]
    Storage(#[from] StorageError),

    /// Stored or received bytes were not a content document.
    #[error("failed to decode content document: {reason}")]
    Decode { reason: String },

    /// The document could not be serialized.
    #[error("failed to encode content document: {reason}")]
    Encode { reason: String },
}

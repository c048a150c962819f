//! The seam between views and wherever the content document lives.

use crate::document::ContentDocument;
use crate::error::ContentError;

/// Something that can fetch and replace the content document.
///
/// [`ContentStore`](crate::store::ContentStore) implements this over a
/// storage backend; the CLI implements it over HTTP. Views only ever see
/// this trait.
#[async_trait::async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch the current document, or the default document if none has been
    /// saved.
    ///
    /// # Errors
    ///
    /// Returns a [`ContentError`] if the document cannot be retrieved.
    async fn fetch_document(&self) -> Result<ContentDocument, ContentError>;

    /// Replace the stored document wholesale. Last write wins.
    ///
    /// # Errors
    ///
    /// Returns a [`ContentError`] if the document cannot be stored.
    async fn save_document(&self, document: &ContentDocument) -> Result<(), ContentError>;
}

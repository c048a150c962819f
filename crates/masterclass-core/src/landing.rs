//! Landing view model.

use crate::countdown::Countdown;
use crate::document::ContentDocument;
use crate::source::ContentSource;

/// Where the landing view got its document from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentOrigin {
    /// Fetched from the content source.
    Source,
    /// The source failed; built-in defaults are shown instead.
    Fallback,
}

/// State behind the public landing page: the document being shown and the
/// countdown visitors start by clicking the main card.
#[derive(Debug, Clone)]
pub struct LandingView {
    document: ContentDocument,
    countdown: Countdown,
    origin: DocumentOrigin,
}

impl LandingView {
    /// Fetch the document and build the view. Never fails: any error from
    /// the source is logged and the default document is used.
    pub async fn load(source: &dyn ContentSource) -> Self {
        match source.fetch_document().await {
            Ok(document) => Self::with_origin(document, DocumentOrigin::Source),
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch content, using defaults");
                Self::with_origin(ContentDocument::default(), DocumentOrigin::Fallback)
            }
        }
    }

    /// Build the view around an already-fetched document.
    #[must_use]
    pub fn from_document(document: ContentDocument) -> Self {
        Self::with_origin(document, DocumentOrigin::Source)
    }

    fn with_origin(document: ContentDocument, origin: DocumentOrigin) -> Self {
        let countdown = Countdown::new(document.countdown_seconds());
        Self {
            document,
            countdown,
            origin,
        }
    }

    #[must_use]
    pub fn document(&self) -> &ContentDocument {
        &self.document
    }

    #[must_use]
    pub fn origin(&self) -> DocumentOrigin {
        self.origin
    }

    #[must_use]
    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    /// The visitor clicked the main card.
    pub fn activate(&mut self) -> bool {
        self.countdown.activate()
    }

    /// One second passed.
    pub fn tick(&mut self) {
        self.countdown.tick();
    }

    /// Remaining countdown time as `MM:SS`.
    #[must_use]
    pub fn countdown_display(&self) -> String {
        self.countdown.display()
    }

    /// Link the join button opens, if one is configured.
    #[must_use]
    pub fn join_link(&self) -> Option<&str> {
        let link = self.document.telegram_link.trim();
        (!link.is_empty()).then_some(link)
    }

    /// Points paired with their two-digit ordinal (`01`, `02`, `03`).
    pub fn numbered_points(&self) -> impl Iterator<Item = (String, &str)> {
        self.document
            .points
            .iter()
            .enumerate()
            .map(|(i, point)| (format!("{:02}", i + 1), point.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubSource;

    #[tokio::test]
    async fn loads_document_from_source() {
        let doc = ContentDocument {
            title: "Saved".to_owned(),
            countdown_minutes: 5,
            ..ContentDocument::default()
        };
        let view = LandingView::load(&StubSource::with_document(doc.clone())).await;

        assert_eq!(view.document(), &doc);
        assert_eq!(view.origin(), DocumentOrigin::Source);
        assert_eq!(view.countdown_display(), "05:00");
    }

    #[tokio::test]
    async fn falls_back_to_defaults_when_source_fails() {
        let view = LandingView::load(&StubSource::unreachable()).await;

        assert_eq!(view.document(), &ContentDocument::default());
        assert_eq!(view.origin(), DocumentOrigin::Fallback);
        assert_eq!(view.countdown_display(), "02:00");
    }

    #[test]
    fn countdown_runs_only_after_activation() {
        let mut view = LandingView::from_document(ContentDocument::default());
        view.tick();
        assert_eq!(view.countdown_display(), "02:00");

        assert!(view.activate());
        for _ in 0..119 {
            view.tick();
        }
        assert_eq!(view.countdown_display(), "00:01");
        view.tick();
        assert_eq!(view.countdown_display(), "00:00");
        view.tick();
        assert_eq!(view.countdown_display(), "00:00");
    }

    #[test]
    fn empty_link_is_not_offered() {
        let mut doc = ContentDocument::default();
        assert_eq!(
            LandingView::from_document(doc.clone()).join_link(),
            Some("https://t.me/")
        );

        doc.telegram_link = "  ".to_owned();
        assert_eq!(LandingView::from_document(doc).join_link(), None);
    }

    #[test]
    fn points_are_numbered_in_order() {
        let doc = ContentDocument {
            points: ["a".to_owned(), "b".to_owned(), "c".to_owned()],
            ..ContentDocument::default()
        };
        let view = LandingView::from_document(doc);
        let numbered: Vec<_> = view.numbered_points().collect();
        assert_eq!(
            numbered,
            vec![
                ("01".to_owned(), "a"),
                ("02".to_owned(), "b"),
                ("03".to_owned(), "c")
            ]
        );
    }
}

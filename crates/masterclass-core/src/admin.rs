//! Admin form and view model.
//!
//! The form mirrors the content document field by field, except that the
//! three points are edited as three independent inputs and the countdown
//! length is kept as a number coerced from free text.

use std::time::{Duration, Instant};

use crate::document::{ContentDocument, DEFAULT_COUNTDOWN_MINUTES};
use crate::source::ContentSource;

/// How long a success notice stays visible.
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

/// Shown after a successful save.
pub const SAVED_MESSAGE: &str = "Ma'lumotlar muvaffaqiyatli saqlandi!";
/// Shown when a save fails.
pub const SAVE_FAILED_MESSAGE: &str = "Xatolik yuz berdi";
/// Shown when the form could not be loaded.
pub const LOAD_FAILED_MESSAGE: &str = "Ma'lumotlarni yuklashda xatolik";

/// Parse the countdown input. Anything that is not a positive integer
/// becomes [`DEFAULT_COUNTDOWN_MINUTES`].
#[must_use]
pub fn parse_countdown_minutes(raw: &str) -> u32 {
    match raw.trim().parse::<u32>() {
        Ok(0) | Err(_) => DEFAULT_COUNTDOWN_MINUTES,
        Ok(minutes) => minutes,
    }
}

/// Editable copy of the content document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminForm {
    pub title: String,
    pub subtitle: String,
    pub date: String,
    pub time: String,
    pub description: String,
    pub point1: String,
    pub point2: String,
    pub point3: String,
    pub button_text: String,
    pub telegram_link: String,
    pub gift_title: String,
    pub gift_description: String,
    pub countdown_minutes: u32,
}

impl Default for AdminForm {
    /// A blank form, as shown before anything has loaded.
    fn default() -> Self {
        Self {
            title: String::new(),
            subtitle: String::new(),
            date: String::new(),
            time: String::new(),
            description: String::new(),
            point1: String::new(),
            point2: String::new(),
            point3: String::new(),
            button_text: String::new(),
            telegram_link: String::new(),
            gift_title: String::new(),
            gift_description: String::new(),
            countdown_minutes: DEFAULT_COUNTDOWN_MINUTES,
        }
    }
}

impl AdminForm {
    /// Split a document into form fields.
    #[must_use]
    pub fn from_document(document: &ContentDocument) -> Self {
        let [point1, point2, point3] = document.points.clone();
        Self {
            title: document.title.clone(),
            subtitle: document.subtitle.clone(),
            date: document.date.clone(),
            time: document.time.clone(),
            description: document.description.clone(),
            point1,
            point2,
            point3,
            button_text: document.button_text.clone(),
            telegram_link: document.telegram_link.clone(),
            gift_title: document.gift_title.clone(),
            gift_description: document.gift_description.clone(),
            countdown_minutes: if document.countdown_minutes == 0 {
                DEFAULT_COUNTDOWN_MINUTES
            } else {
                document.countdown_minutes
            },
        }
    }

    /// Rejoin the fields into a full replacement document.
    #[must_use]
    pub fn to_document(&self) -> ContentDocument {
        ContentDocument {
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            date: self.date.clone(),
            time: self.time.clone(),
            description: self.description.clone(),
            points: [
                self.point1.clone(),
                self.point2.clone(),
                self.point3.clone(),
            ],
            button_text: self.button_text.clone(),
            telegram_link: self.telegram_link.clone(),
            gift_title: self.gift_title.clone(),
            gift_description: self.gift_description.clone(),
            countdown_minutes: self.countdown_minutes,
        }
    }

    /// Update the countdown from raw user input.
    pub fn set_countdown_input(&mut self, raw: &str) {
        self.countdown_minutes = parse_countdown_minutes(raw);
    }

    /// Set a field by its wire name (`title`, `point2`, `countdownMinutes`,
    /// ...). Returns `false` for an unknown field.
    pub fn set_field(&mut self, name: &str, value: &str) -> bool {
        let slot = match name {
            "title" => &mut self.title,
            "subtitle" => &mut self.subtitle,
            "date" => &mut self.date,
            "time" => &mut self.time,
            "description" => &mut self.description,
            "point1" => &mut self.point1,
            "point2" => &mut self.point2,
            "point3" => &mut self.point3,
            "buttonText" => &mut self.button_text,
            "telegramLink" => &mut self.telegram_link,
            "giftTitle" => &mut self.gift_title,
            "giftDescription" => &mut self.gift_description,
            "countdownMinutes" => {
                self.set_countdown_input(value);
                return true;
            }
            _ => return false,
        };
        value.clone_into(slot);
        true
    }
}

/// Kind of feedback shown above the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A message shown above the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: &'static str,
    shown_at: Instant,
}

impl Notice {
    fn new(kind: NoticeKind, text: &'static str, now: Instant) -> Self {
        Self {
            kind,
            text,
            shown_at: now,
        }
    }

    /// Success notices disappear after [`NOTICE_TTL`]; errors stay until
    /// replaced.
    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        self.kind == NoticeKind::Success && now.saturating_duration_since(self.shown_at) >= NOTICE_TTL
    }
}

/// State behind the admin page.
#[derive(Debug, Clone, Default)]
pub struct AdminView {
    pub form: AdminForm,
    notice: Option<Notice>,
}

impl AdminView {
    /// Fetch the document into the form. On failure the form stays blank
    /// and an error notice is shown.
    pub async fn load(source: &dyn ContentSource) -> Self {
        match source.fetch_document().await {
            Ok(document) => Self {
                form: AdminForm::from_document(&document),
                notice: None,
            },
            Err(e) => {
                tracing::warn!(error = %e, "failed to load content into admin form");
                Self {
                    form: AdminForm::default(),
                    notice: Some(Notice::new(
                        NoticeKind::Error,
                        LOAD_FAILED_MESSAGE,
                        Instant::now(),
                    )),
                }
            }
        }
    }

    /// Wrap an already-populated form.
    #[must_use]
    pub fn with_form(form: AdminForm) -> Self {
        Self { form, notice: None }
    }

    /// Send the whole form as a replacement document. Returns whether the
    /// save succeeded; the outcome is also left as a notice.
    pub async fn submit(&mut self, source: &dyn ContentSource) -> bool {
        self.notice = None;
        let document = self.form.to_document();

        let saved = match source.save_document(&document).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "failed to save content from admin form");
                false
            }
        };

        let (kind, text) = if saved {
            (NoticeKind::Success, SAVED_MESSAGE)
        } else {
            (NoticeKind::Error, SAVE_FAILED_MESSAGE)
        };
        self.notice = Some(Notice::new(kind, text, Instant::now()));
        saved
    }

    /// The notice to display at `now`, if any.
    #[must_use]
    pub fn notice(&self, now: Instant) -> Option<&Notice> {
        self.notice.as_ref().filter(|n| !n.is_expired(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubSource;

    #[test]
    fn countdown_input_coercion() {
        assert_eq!(parse_countdown_minutes("15"), 15);
        assert_eq!(parse_countdown_minutes(" 7 "), 7);
        assert_eq!(parse_countdown_minutes("abc"), 2);
        assert_eq!(parse_countdown_minutes(""), 2);
        assert_eq!(parse_countdown_minutes("0"), 2);
        assert_eq!(parse_countdown_minutes("-5"), 2);
    }

    #[test]
    fn blank_form_defaults_countdown_to_two() {
        let form = AdminForm::default();
        assert!(form.title.is_empty());
        assert_eq!(form.countdown_minutes, 2);
    }

    #[test]
    fn points_split_and_rejoin_in_order() {
        let doc = ContentDocument {
            points: ["x".to_owned(), "y".to_owned(), "z".to_owned()],
            ..ContentDocument::default()
        };
        let mut form = AdminForm::from_document(&doc);
        assert_eq!((form.point1.as_str(), form.point2.as_str(), form.point3.as_str()), ("x", "y", "z"));

        form.point1 = "a".to_owned();
        form.point2 = "b".to_owned();
        form.point3 = "c".to_owned();
        assert_eq!(
            form.to_document().points,
            ["a".to_owned(), "b".to_owned(), "c".to_owned()]
        );
    }

    #[test]
    fn form_roundtrips_the_document() {
        let doc = ContentDocument::default();
        assert_eq!(AdminForm::from_document(&doc).to_document(), doc);
    }

    #[test]
    fn set_field_by_wire_name() {
        let mut form = AdminForm::default();
        assert!(form.set_field("buttonText", "Qo'shilish"));
        assert!(form.set_field("point3", "uchinchi"));
        assert!(form.set_field("countdownMinutes", "nope"));
        assert!(!form.set_field("unknown", "value"));

        assert_eq!(form.button_text, "Qo'shilish");
        assert_eq!(form.point3, "uchinchi");
        assert_eq!(form.countdown_minutes, 2);
    }

    #[tokio::test]
    async fn submit_saves_points_in_order() {
        let source = StubSource::default();
        let mut view = AdminView::load(&source).await;
        view.form.point1 = "a".to_owned();
        view.form.point2 = "b".to_owned();
        view.form.point3 = "c".to_owned();

        assert!(view.submit(&source).await);

        let saved = source.saved().unwrap();
        assert_eq!(saved.points, ["a".to_owned(), "b".to_owned(), "c".to_owned()]);
        assert_eq!(source.save_count(), 1);
    }

    #[tokio::test]
    async fn success_notice_expires_after_three_seconds() {
        let source = StubSource::default();
        let mut view = AdminView::with_form(AdminForm::default());
        assert!(view.submit(&source).await);

        let now = Instant::now();
        let notice = view.notice(now).unwrap();
        assert_eq!(notice.kind, NoticeKind::Success);
        assert_eq!(notice.text, SAVED_MESSAGE);

        assert!(view.notice(now + NOTICE_TTL).is_none());
    }

    #[tokio::test]
    async fn failed_save_shows_error_notice() {
        let source = StubSource::unreachable();
        let mut view = AdminView::with_form(AdminForm::default());

        assert!(!view.submit(&source).await);

        let later = Instant::now() + Duration::from_secs(60);
        let notice = view.notice(later).unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.text, SAVE_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn failed_load_keeps_blank_form() {
        let view = AdminView::load(&StubSource::unreachable()).await;

        assert_eq!(view.form, AdminForm::default());
        assert_eq!(
            view.notice(Instant::now()).map(|n| n.text),
            Some(LOAD_FAILED_MESSAGE)
        );
    }

    #[tokio::test]
    async fn load_populates_from_source() {
        let view = AdminView::load(&StubSource::default()).await;
        assert_eq!(view.form, AdminForm::from_document(&ContentDocument::default()));
        assert!(view.notice(Instant::now()).is_none());
    }
}

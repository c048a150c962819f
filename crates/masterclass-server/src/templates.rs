//! Askama templates for the landing and admin pages.

use askama::Template;
use askama_web::WebTemplate;

use masterclass_core::admin::AdminForm;
use masterclass_core::landing::LandingView;

/// Landing page template.
#[derive(Template, WebTemplate)]
#[template(path = "landing.html")]
pub struct LandingTemplate {
    pub title: String,
    pub subtitle: String,
    pub date: String,
    pub time: String,
    pub description: String,
    /// `(ordinal, text)` pairs.
    pub points: Vec<(String, String)>,
    pub button_text: String,
    pub join_link: Option<String>,
    pub gift_title: String,
    pub gift_description: String,
    pub countdown_seconds: u32,
    pub countdown_display: String,
    pub admin_href: String,
}

impl LandingTemplate {
    pub fn from_view(view: &LandingView, admin_href: &str) -> Self {
        let doc = view.document();
        Self {
            title: doc.title.clone(),
            subtitle: doc.subtitle.clone(),
            date: doc.date.clone(),
            time: doc.time.clone(),
            description: doc.description.clone(),
            points: view
                .numbered_points()
                .map(|(n, p)| (n, p.to_owned()))
                .collect(),
            button_text: doc.button_text.clone(),
            join_link: view.join_link().map(str::to_owned),
            gift_title: doc.gift_title.clone(),
            gift_description: doc.gift_description.clone(),
            countdown_seconds: view.countdown().duration(),
            countdown_display: view.countdown_display(),
            admin_href: admin_href.to_owned(),
        }
    }
}

/// Feedback banner above the admin form.
pub struct NoticeBlock {
    /// CSS modifier, `success` or `error`.
    pub class: &'static str,
    pub text: &'static str,
    /// Milliseconds before the banner hides itself; `0` keeps it.
    pub ttl_ms: u64,
}

/// Admin page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin.html")]
pub struct AdminTemplate {
    pub form: AdminForm,
    pub notice: Option<NoticeBlock>,
    pub back_href: String,
    pub action: String,
}

//! Landing page and admin page.
//!
//! `GET /` renders the landing page, or the admin page when the query
//! carries `admin=true`. The admin form posts back to `/`; the handler saves
//! the document and renders the admin page again with a notice.
//!
//! Both pages read the store directly rather than going through the
//! bearer-protected JSON API. The admin page is reachable by anyone who
//! knows the flag.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{RawQuery, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Form, Router};
use serde::Deserialize;

use masterclass_core::admin::{AdminForm, AdminView, NOTICE_TTL, NoticeKind};
use masterclass_core::landing::{DocumentOrigin, LandingView};
use masterclass_core::view::View;

use crate::state::AppState;
use crate::templates::{AdminTemplate, LandingTemplate, NoticeBlock};

/// Build the UI router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(page).post(submit_admin_form))
}

async fn page(State(state): State<Arc<AppState>>, RawQuery(query): RawQuery) -> Response {
    match View::from_query(query.as_deref().unwrap_or_default()) {
        View::Landing => {
            let view = LandingView::load(&state.store).await;
            if view.origin() == DocumentOrigin::Fallback {
                tracing::warn!("rendering landing page from built-in defaults");
            }
            LandingTemplate::from_view(&view, &View::Admin.href("/")).into_response()
        }
        View::Admin => {
            let view = AdminView::load(&state.store).await;
            render_admin(&view)
        }
    }
}

/// Fields posted by the admin form. Everything arrives as text; missing
/// fields are blank.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AdminFormInput {
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
    pub countdown_minutes: String,
}

impl AdminFormInput {
    fn into_form(self) -> AdminForm {
        let mut form = AdminForm {
            title: self.title,
            subtitle: self.subtitle,
            date: self.date,
            time: self.time,
            description: self.description,
            point1: self.point1,
            point2: self.point2,
            point3: self.point3,
            button_text: self.button_text,
            telegram_link: self.telegram_link,
            gift_title: self.gift_title,
            gift_description: self.gift_description,
            ..AdminForm::default()
        };
        form.set_countdown_input(&self.countdown_minutes);
        form
    }
}

async fn submit_admin_form(
    State(state): State<Arc<AppState>>,
    Form(input): Form<AdminFormInput>,
) -> Response {
    let mut view = AdminView::with_form(input.into_form());
    view.submit(&state.store).await;
    render_admin(&view)
}

fn render_admin(view: &AdminView) -> Response {
    let notice = view.notice(Instant::now()).map(|n| NoticeBlock {
        class: match n.kind {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
        },
        text: n.text,
        ttl_ms: if n.kind == NoticeKind::Success {
            u64::try_from(NOTICE_TTL.as_millis()).unwrap_or(u64::MAX)
        } else {
            0
        },
    });

    AdminTemplate {
        form: view.form.clone(),
        notice,
        back_href: View::Landing.href("/"),
        action: View::Admin.href("/"),
    }
    .into_response()
}

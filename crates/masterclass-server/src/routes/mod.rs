//! HTTP route handlers.
//!
//! Routes are organized by surface:
//! - `content`: the JSON content API under the configured prefix
//! - `ui`: the server-rendered landing and admin pages
//! - `health`: liveness probe

pub mod content;
pub mod health;
pub mod ui;

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use axum::middleware as axum_mw;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::auth_middleware;
use crate::state::AppState;

/// In-flight requests the content API serves at once.
const CONTENT_CONCURRENCY: usize = 32;

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    // Only the content API requires the bearer credential.
    let api_routes = Router::new()
        .route(&state.content_path(), content::method_router())
        .route_layer(axum_mw::from_fn_with_state(
            Arc::clone(&state),
            auth_middleware,
        ))
        .layer(tower::limit::ConcurrencyLimitLayer::new(CONTENT_CONCURRENCY));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
        ]);

    Router::new()
        .merge(api_routes)
        .merge(ui::router())
        .merge(health::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .with_state(state)
}

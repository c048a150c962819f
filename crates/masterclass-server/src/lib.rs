//! Masterclass HTTP server.
//!
//! Wires the content store, storage backend and HTTP routes into a running
//! Axum server. Serves the JSON content API under the configured prefix and
//! the landing and admin pages at `/`.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod templates;

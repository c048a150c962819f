//! Core library for the masterclass landing service.
//!
//! Holds the content document and its defaults, the [`ContentSource`] seam
//! both the server-side store and the HTTP client implement, and the state
//! models behind the two pages: the landing view with its countdown, the
//! admin form, and the view switcher that picks between them.
//!
//! [`ContentSource`]: source::ContentSource

pub mod admin;
pub mod countdown;
pub mod document;
pub mod error;
pub mod landing;
pub mod source;
pub mod store;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

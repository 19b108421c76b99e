//! Application core for a blog-style post browser.
//!
//! The crate models the whole client-side flow of the app: an injectable
//! mock session, declarative form validation, a cached paginated feed over a
//! remote demo JSON API, and a platform-independent infinite-scroll state
//! machine. A host UI embeds [`app::App`] and forwards user events to it.

pub mod app;
pub mod config;
pub mod domain;
pub mod outbound;

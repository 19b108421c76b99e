//! Route-driven view layer.
//!
//! Purpose: compose the session, feed service, and scroll controller into
//! per-route screen state a host UI can render. The shell consumes user
//! events (navigation, keystrokes, submissions, sentinel visibility) and
//! exposes the resulting screen plus a notice queue for transient toasts.

pub mod router;
pub mod screens;
pub mod shell;

pub use router::{Route, RouteParseError};
pub use screens::{
    Comment, CreatePostScreen, DetailScreen, DetailStatus, FeedStatus, LoginScreen,
    PostsScreen, RegisterScreen, Screen,
};
pub use shell::{App, FetchTicket, Notice, NoticeLevel};

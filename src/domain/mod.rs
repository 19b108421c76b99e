//! Domain primitives and services.
//!
//! Purpose: define the strongly typed entities and behaviour contracts the
//! app shell and outbound adapters share. Types stay transport agnostic;
//! invariants are documented on each type's Rustdoc.
//!
//! Public surface:
//! - [`DomainError`] / [`ErrorCode`] — transport-agnostic failure payload.
//! - [`Post`], [`PostPage`], [`PostDraft`] — feed entities.
//! - [`SessionContext`] — injectable mock authentication state.
//! - [`FormSchema`] / [`FormState`] — declarative form validation.
//! - [`PostFeedService`] — cached pagination over the gateway port.
//! - [`ScrollController`] — infinite-scroll state machine.

pub mod error;
pub mod feed;
pub mod form;
pub mod ports;
pub mod post;
pub mod scroll;
pub mod session;
pub mod validation;

pub use self::error::{DomainError, ErrorCode};
pub use self::feed::{FeedSnapshot, PostFeedService};
pub use self::form::FormState;
pub use self::post::{PageNumber, Post, PostDraft, PostDraftValidationError, PostId, PostPage};
pub use self::scroll::{FetchDecision, ScrollController, ScrollPhase, SentinelId, VisibilityEdge};
pub use self::session::{AuthenticatedUser, SessionContext};
pub use self::validation::{FormSchema, ValidationOutcome};

//! Post feed entities.
//!
//! Posts are owned by the remote collection; the client only ever holds
//! cached read-through copies keyed by page number and by id.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum body length accepted for a new post.
pub const POST_BODY_MIN: usize = 10;

/// Identifier assigned to a post by the remote collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(u64);

impl PostId {
    /// Wrap a raw remote identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric value as issued by the remote collection.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One-based feed page cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageNumber(u32);

impl PageNumber {
    /// The first feed page.
    pub const FIRST: Self = Self(1);

    /// Construct a page number; zero is clamped to the first page.
    pub const fn new(raw: u32) -> Self {
        if raw == 0 { Self(1) } else { Self(raw) }
    }

    /// The page following this one.
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Raw one-based value.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A post as served by the remote collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Remote identifier.
    pub id: PostId,
    /// Post headline.
    pub title: String,
    /// Post content.
    pub body: String,
}

/// One fetched feed page together with its continuation cursor.
///
/// ## Invariants
/// - `posts` preserves the remote ordering of the fetched batch.
/// - Once `next_page` is `None`, no further pages are requested for this
///   feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostPage {
    /// Cursor this page was fetched with.
    pub number: PageNumber,
    /// Posts in remote order.
    pub posts: Vec<Post>,
    /// Continuation cursor, when more data likely exists.
    pub next_page: Option<PageNumber>,
}

impl PostPage {
    /// Assemble a page from a fetched batch, deriving the continuation
    /// cursor from the batch size.
    ///
    /// The cursor is a heuristic "more data likely exists" signal, not an
    /// authoritative count: a collection whose size is an exact multiple of
    /// `page_size` yields one trailing empty fetch. The remote offers no
    /// total, so this behaviour is kept as-is.
    ///
    /// # Examples
    /// ```
    /// use postboard::domain::{PageNumber, PostPage};
    ///
    /// let page = PostPage::from_fetch(PageNumber::FIRST, Vec::new(), 20);
    /// assert!(page.next_page.is_none());
    /// ```
    pub fn from_fetch(number: PageNumber, posts: Vec<Post>, page_size: u32) -> Self {
        let next_page = (posts.len() == page_size as usize).then(|| number.next());
        Self {
            number,
            posts,
            next_page,
        }
    }
}

/// Validation errors returned by [`PostDraft::try_new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostDraftValidationError {
    /// Title was missing or blank once trimmed.
    #[error("title is required")]
    EmptyTitle,
    /// Body fell short of the minimum length.
    #[error("content must be at least {min} characters")]
    BodyTooShort { min: usize },
}

/// A validated new post awaiting submission.
///
/// ## Invariants
/// - `title` is non-empty once trimmed.
/// - `body` holds at least [`POST_BODY_MIN`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    title: String,
    body: String,
}

impl PostDraft {
    /// Validate and construct a draft from raw form input.
    pub fn try_new(
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Self, PostDraftValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(PostDraftValidationError::EmptyTitle);
        }
        let body = body.into();
        if body.chars().count() < POST_BODY_MIN {
            return Err(PostDraftValidationError::BodyTooShort { min: POST_BODY_MIN });
        }
        Ok(Self { title, body })
    }

    /// Draft headline.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Draft content.
    pub fn body(&self) -> &str {
        self.body.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn posts(count: usize) -> Vec<Post> {
        (1..=count as u64)
            .map(|id| Post {
                id: PostId::new(id),
                title: format!("Post {id}"),
                body: format!("Body of post {id}"),
            })
            .collect()
    }

    #[rstest]
    #[case(20, Some(PageNumber::new(2)))]
    #[case(19, None)]
    #[case(0, None)]
    fn continuation_cursor_requires_exactly_full_page(
        #[case] count: usize,
        #[case] expected: Option<PageNumber>,
    ) {
        let page = PostPage::from_fetch(PageNumber::FIRST, posts(count), 20);
        assert_eq!(page.next_page, expected);
    }

    #[test]
    fn continuation_cursor_advances_from_requested_page() {
        let page = PostPage::from_fetch(PageNumber::new(3), posts(20), 20);
        assert_eq!(page.next_page, Some(PageNumber::new(4)));
    }

    #[rstest]
    #[case("", "long enough body", PostDraftValidationError::EmptyTitle)]
    #[case("   ", "long enough body", PostDraftValidationError::EmptyTitle)]
    #[case("title", "too short", PostDraftValidationError::BodyTooShort { min: POST_BODY_MIN })]
    fn invalid_drafts_are_rejected(
        #[case] title: &str,
        #[case] body: &str,
        #[case] expected: PostDraftValidationError,
    ) {
        let err = PostDraft::try_new(title, body).expect_err("invalid drafts must fail");
        assert_eq!(err, expected);
    }

    #[test]
    fn valid_draft_preserves_input() {
        let draft = PostDraft::try_new("Hello", "A body of ten.").expect("valid draft");
        assert_eq!(draft.title(), "Hello");
        assert_eq!(draft.body(), "A body of ten.");
    }

    #[test]
    fn zero_page_numbers_clamp_to_first() {
        assert_eq!(PageNumber::new(0), PageNumber::FIRST);
    }
}

//! Port for the remote post collection.
//!
//! The [`PostGateway`] trait defines the contract against the remote JSON
//! API: paginated listing, fetch by id, and creation. The remote is a demo
//! mock — created posts are echoed back but never durably stored, so a
//! subsequent listing will not include them.

use async_trait::async_trait;

use crate::domain::{PageNumber, Post, PostDraft, PostId, PostPage};

use super::define_port_error;

define_port_error! {
    /// Errors raised by post gateway adapters.
    pub enum PostGatewayError {
        /// The remote could not be reached.
        Transport { message: String } =>
            "post gateway transport failed: {message}",
        /// The remote answered with a non-success status.
        Status { status: u16 } =>
            "post gateway returned status {status}",
        /// The requested post does not exist.
        NotFound { id: u64 } =>
            "post {id} was not found",
        /// The response payload could not be decoded.
        Decode { message: String } =>
            "post gateway payload decode failed: {message}",
    }
}

/// Port for reading and creating posts on the remote collection.
///
/// # Pagination Semantics
///
/// `list_page` returns a fixed-size batch; the page's continuation cursor is
/// present iff the batch was exactly full. The signal is heuristic — see
/// [`PostPage::from_fetch`] for the caveat.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostGateway: Send + Sync {
    /// Fetch one feed page.
    async fn list_page(&self, page: PageNumber) -> Result<PostPage, PostGatewayError>;

    /// Fetch a single post by id.
    ///
    /// Returns [`PostGatewayError::NotFound`] when the remote answers
    /// non-success for the id.
    async fn fetch_post(&self, id: PostId) -> Result<Post, PostGatewayError>;

    /// Submit a new post.
    ///
    /// The remote mock accepts the write without durable storage; callers
    /// must not assume a later listing includes the post.
    async fn create_post(&self, draft: &PostDraft) -> Result<(), PostGatewayError>;
}

/// Fixture gateway serving a deterministic in-memory collection.
///
/// Used in tests and doctests where real HTTP is not under test. It mirrors
/// the remote mock's non-durability: `create_post` accepts and discards.
#[derive(Debug, Clone, Copy)]
pub struct FixturePostGateway {
    total: u64,
    page_size: u32,
}

impl FixturePostGateway {
    /// Build a fixture holding `total` posts, paged 20 at a time.
    pub fn with_total(total: u64) -> Self {
        Self {
            total,
            page_size: 20,
        }
    }

    fn post(id: u64) -> Post {
        Post {
            id: PostId::new(id),
            title: format!("Post {id}"),
            body: format!("Body of fixture post {id}"),
        }
    }
}

#[async_trait]
impl PostGateway for FixturePostGateway {
    async fn list_page(&self, page: PageNumber) -> Result<PostPage, PostGatewayError> {
        let size = u64::from(self.page_size);
        let start = u64::from(page.get() - 1) * size + 1;
        let end = (start + size - 1).min(self.total);
        let posts = if start > self.total {
            Vec::new()
        } else {
            (start..=end).map(Self::post).collect()
        };
        Ok(PostPage::from_fetch(page, posts, self.page_size))
    }

    async fn fetch_post(&self, id: PostId) -> Result<Post, PostGatewayError> {
        if id.get() == 0 || id.get() > self.total {
            return Err(PostGatewayError::not_found(id.get()));
        }
        Ok(Self::post(id.get()))
    }

    async fn create_post(&self, _draft: &PostDraft) -> Result<(), PostGatewayError> {
        // Accepted and discarded, like the real demo API.
        Ok(())
    }
}

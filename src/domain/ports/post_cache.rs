//! Port for the client-side response cache.
//!
//! Feed pages live under one shared feed key, appended in fetch order;
//! details are keyed per post id. Creating a post invalidates the feed key
//! so the next visit refetches instead of splicing locally — consistent
//! with the remote mock's non-durable create semantics.

use async_trait::async_trait;

use crate::domain::{Post, PostId, PostPage};

use super::define_port_error;

define_port_error! {
    /// Errors raised by post cache adapters.
    pub enum PostCacheError {
        /// The cache backend failed to serve the request.
        Backend { message: String } =>
            "post cache backend failed: {message}",
    }
}

/// Port for cached feed pages and post details.
///
/// # Feed Key Semantics
///
/// - Pages append in fetch order under the single feed key.
/// - A page whose number is already cached is dropped, keeping the merged
///   list free of duplicates.
/// - `invalidate_feed` clears the feed key only; details stay cached.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostCache: Send + Sync {
    /// Pages currently cached under the feed key, in fetch order.
    async fn feed_pages(&self) -> Result<Vec<PostPage>, PostCacheError>;

    /// Append a fetched page under the feed key.
    async fn append_feed_page(&self, page: &PostPage) -> Result<(), PostCacheError>;

    /// Drop every page under the feed key.
    async fn invalidate_feed(&self) -> Result<(), PostCacheError>;

    /// Cached detail for a post, if present.
    async fn detail(&self, id: PostId) -> Result<Option<Post>, PostCacheError>;

    /// Cache a fetched post detail.
    async fn store_detail(&self, post: &Post) -> Result<(), PostCacheError>;
}

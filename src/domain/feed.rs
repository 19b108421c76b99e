//! Cached pagination over the post gateway.
//!
//! [`PostFeedService`] composes the gateway and cache ports: read-through
//! page fetches merged in order under the shared feed key, per-id detail
//! read-through, and create-then-invalidate. The service owns no mutable
//! state of its own; all shared state sits behind the cache port and is
//! mutated within single event-loop turns.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::ports::{PostCache, PostCacheError, PostGateway, PostGatewayError};
use crate::domain::{DomainError, PageNumber, Post, PostDraft, PostId, PostPage};

/// Merged view of every cached feed page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSnapshot {
    /// Posts from all cached pages, in fetch order.
    pub posts: Vec<Post>,
    /// Continuation cursor from the most recently fetched page.
    pub next_page: Option<PageNumber>,
}

impl FeedSnapshot {
    fn from_pages(pages: &[PostPage]) -> Self {
        let next_page = pages.last().and_then(|page| page.next_page);
        let posts = pages
            .iter()
            .flat_map(|page| page.posts.iter().cloned())
            .collect();
        Self { posts, next_page }
    }
}

/// Feed orchestration over the gateway and cache ports.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use postboard::domain::ports::FixturePostGateway;
/// use postboard::domain::PostFeedService;
/// use postboard::outbound::cache::MemoryPostCache;
///
/// # async fn demo() -> Result<(), postboard::domain::DomainError> {
/// let service = PostFeedService::new(
///     Arc::new(FixturePostGateway::with_total(45)),
///     Arc::new(MemoryPostCache::default()),
/// );
/// let snapshot = service.load_feed().await?;
/// assert_eq!(snapshot.posts.len(), 20);
/// # Ok(())
/// # }
/// ```
pub struct PostFeedService<G, C> {
    gateway: Arc<G>,
    cache: Arc<C>,
}

impl<G, C> Clone for PostFeedService<G, C> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<G, C> PostFeedService<G, C> {
    /// Create a new service over the given adapters.
    pub fn new(gateway: Arc<G>, cache: Arc<C>) -> Self {
        Self { gateway, cache }
    }
}

impl<G, C> PostFeedService<G, C>
where
    G: PostGateway,
    C: PostCache,
{
    fn map_list_error(error: PostGatewayError) -> DomainError {
        warn!(%error, "feed page fetch failed");
        DomainError::unavailable(format!("Failed to fetch posts: {error}"))
    }

    fn map_detail_error(id: PostId, error: PostGatewayError) -> DomainError {
        match error {
            PostGatewayError::NotFound { .. } => {
                DomainError::not_found(format!("Post {id} was not found"))
            }
            other => {
                warn!(%id, error = %other, "post detail fetch failed");
                DomainError::unavailable(format!("Failed to fetch post: {other}"))
            }
        }
    }

    fn map_create_error(error: PostGatewayError) -> DomainError {
        warn!(%error, "post creation failed");
        DomainError::unavailable(format!("Failed to create post: {error}"))
    }

    fn map_cache_error(error: PostCacheError) -> DomainError {
        DomainError::internal(format!("post cache error: {error}"))
    }

    async fn cached_snapshot(&self) -> Result<Option<FeedSnapshot>, DomainError> {
        let pages = self
            .cache
            .feed_pages()
            .await
            .map_err(Self::map_cache_error)?;
        if pages.is_empty() {
            return Ok(None);
        }
        Ok(Some(FeedSnapshot::from_pages(&pages)))
    }

    /// Serve the merged feed, fetching the first page on a cold cache.
    pub async fn load_feed(&self) -> Result<FeedSnapshot, DomainError> {
        if let Some(snapshot) = self.cached_snapshot().await? {
            debug!(posts = snapshot.posts.len(), "feed served from cache");
            return Ok(snapshot);
        }
        self.fetch_page(PageNumber::FIRST).await
    }

    /// Fetch one page, append it under the feed key, and return the merged
    /// view. A page already cached under its number is dropped, keeping the
    /// merged list duplicate free.
    pub async fn fetch_page(&self, number: PageNumber) -> Result<FeedSnapshot, DomainError> {
        let page = self
            .gateway
            .list_page(number)
            .await
            .map_err(Self::map_list_error)?;
        debug!(page = %number, posts = page.posts.len(), "feed page fetched");
        self.cache
            .append_feed_page(&page)
            .await
            .map_err(Self::map_cache_error)?;
        let pages = self
            .cache
            .feed_pages()
            .await
            .map_err(Self::map_cache_error)?;
        Ok(FeedSnapshot::from_pages(&pages))
    }

    /// Read-through fetch of one post by id.
    pub async fn post_detail(&self, id: PostId) -> Result<Post, DomainError> {
        if let Some(post) = self.cache.detail(id).await.map_err(Self::map_cache_error)? {
            debug!(%id, "post detail served from cache");
            return Ok(post);
        }
        let post = self
            .gateway
            .fetch_post(id)
            .await
            .map_err(|error| Self::map_detail_error(id, error))?;
        self.cache
            .store_detail(&post)
            .await
            .map_err(Self::map_cache_error)?;
        Ok(post)
    }

    /// Submit a draft and invalidate the feed key.
    ///
    /// Invalidation forces a refetch on the next feed visit instead of
    /// splicing the new post in locally; the remote mock would not return
    /// it anyway.
    pub async fn create_post(&self, draft: &PostDraft) -> Result<(), DomainError> {
        self.gateway
            .create_post(draft)
            .await
            .map_err(Self::map_create_error)?;
        self.cache
            .invalidate_feed()
            .await
            .map_err(Self::map_cache_error)?;
        debug!("post created, feed cache invalidated");
        Ok(())
    }
}

#[cfg(test)]
#[path = "feed_tests.rs"]
mod tests;

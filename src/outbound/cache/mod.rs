//! In-memory post cache adapter.
//!
//! Backs the [`PostCache`] port with process-local maps, matching the app's
//! lifetime: nothing survives a reload. Feed pages live under one shared
//! key in fetch order; details are keyed per id.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{PostCache, PostCacheError};
use crate::domain::{Post, PostId, PostPage};

#[derive(Debug, Default)]
struct CacheInner {
    feed: Vec<PostPage>,
    details: HashMap<PostId, Post>,
}

/// Process-local implementation of the [`PostCache`] port.
///
/// # Examples
/// ```
/// use postboard::outbound::cache::MemoryPostCache;
/// use postboard::domain::ports::PostCache;
///
/// # async fn demo() -> Result<(), postboard::domain::ports::PostCacheError> {
/// let cache = MemoryPostCache::default();
/// assert!(cache.feed_pages().await?.is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MemoryPostCache {
    inner: Mutex<CacheInner>,
}

impl MemoryPostCache {
    fn lock(&self) -> std::sync::MutexGuard<'_, CacheInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl PostCache for MemoryPostCache {
    async fn feed_pages(&self) -> Result<Vec<PostPage>, PostCacheError> {
        Ok(self.lock().feed.clone())
    }

    async fn append_feed_page(&self, page: &PostPage) -> Result<(), PostCacheError> {
        let mut inner = self.lock();
        // Duplicate page numbers are dropped to keep the merged list clean.
        if inner.feed.iter().any(|cached| cached.number == page.number) {
            return Ok(());
        }
        inner.feed.push(page.clone());
        Ok(())
    }

    async fn invalidate_feed(&self) -> Result<(), PostCacheError> {
        self.lock().feed.clear();
        Ok(())
    }

    async fn detail(&self, id: PostId) -> Result<Option<Post>, PostCacheError> {
        Ok(self.lock().details.get(&id).cloned())
    }

    async fn store_detail(&self, post: &Post) -> Result<(), PostCacheError> {
        self.lock().details.insert(post.id, post.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::PageNumber;

    fn page(number: u32, ids: std::ops::RangeInclusive<u64>) -> PostPage {
        let posts = ids
            .map(|id| Post {
                id: PostId::new(id),
                title: format!("Post {id}"),
                body: format!("Body of post {id}"),
            })
            .collect::<Vec<_>>();
        PostPage::from_fetch(PageNumber::new(number), posts, 20)
    }

    #[tokio::test]
    async fn pages_keep_fetch_order_and_drop_duplicates() {
        let cache = MemoryPostCache::default();
        cache.append_feed_page(&page(1, 1..=20)).await.expect("p1");
        cache.append_feed_page(&page(2, 21..=40)).await.expect("p2");
        cache
            .append_feed_page(&page(1, 1..=20))
            .await
            .expect("duplicate dropped");

        let pages = cache.feed_pages().await.expect("read");
        let numbers: Vec<u32> = pages.iter().map(|p| p.number.get()).collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[tokio::test]
    async fn invalidation_clears_feed_but_keeps_details() {
        let cache = MemoryPostCache::default();
        cache.append_feed_page(&page(1, 1..=20)).await.expect("p1");
        let post = Post {
            id: PostId::new(5),
            title: "Post 5".to_owned(),
            body: "Body of post 5".to_owned(),
        };
        cache.store_detail(&post).await.expect("store");

        cache.invalidate_feed().await.expect("invalidate");
        assert!(cache.feed_pages().await.expect("read").is_empty());
        assert_eq!(
            cache.detail(PostId::new(5)).await.expect("detail"),
            Some(post)
        );
    }

    #[tokio::test]
    async fn missing_detail_is_a_miss() {
        let cache = MemoryPostCache::default();
        assert!(cache.detail(PostId::new(9)).await.expect("miss").is_none());
    }
}

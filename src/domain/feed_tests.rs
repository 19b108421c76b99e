//! Tests for the post feed service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{FixturePostGateway, MockPostCache, MockPostGateway};
use crate::domain::ErrorCode;
use crate::outbound::cache::MemoryPostCache;

fn service_with_fixture(
    total: u64,
) -> PostFeedService<FixturePostGateway, MemoryPostCache> {
    PostFeedService::new(
        Arc::new(FixturePostGateway::with_total(total)),
        Arc::new(MemoryPostCache::default()),
    )
}

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
async fn cold_cache_fetches_the_first_page() {
    let service = service_with_fixture(45);
    let snapshot = service.load_feed().await.expect("load succeeds");
    assert_eq!(snapshot.posts.len(), 20);
    assert_eq!(snapshot.next_page, Some(PageNumber::new(2)));
}

#[tokio::test]
async fn warm_cache_skips_the_gateway() {
    let mut gateway = MockPostGateway::new();
    gateway.expect_list_page().never();

    let cache = MemoryPostCache::default();
    cache
        .append_feed_page(&page(1, 1..=20))
        .await
        .expect("seed cache");

    let service = PostFeedService::new(Arc::new(gateway), Arc::new(cache));
    let snapshot = service.load_feed().await.expect("load succeeds");
    assert_eq!(snapshot.posts.len(), 20);
}

#[tokio::test]
async fn pages_append_in_order_without_duplicates() {
    let service = service_with_fixture(45);
    service.load_feed().await.expect("page 1");

    let snapshot = service
        .fetch_page(PageNumber::new(2))
        .await
        .expect("page 2");
    let ids: Vec<u64> = snapshot.posts.iter().map(|post| post.id.get()).collect();
    assert_eq!(ids, (1..=40).collect::<Vec<_>>());

    // Refetching a cached page must not duplicate its posts.
    let snapshot = service
        .fetch_page(PageNumber::new(2))
        .await
        .expect("page 2 again");
    assert_eq!(snapshot.posts.len(), 40);
    assert_eq!(snapshot.next_page, Some(PageNumber::new(3)));
}

#[tokio::test]
async fn final_partial_page_clears_the_cursor() {
    let service = service_with_fixture(45);
    service.load_feed().await.expect("page 1");
    service.fetch_page(PageNumber::new(2)).await.expect("page 2");
    let snapshot = service
        .fetch_page(PageNumber::new(3))
        .await
        .expect("page 3");
    assert_eq!(snapshot.posts.len(), 45);
    assert!(snapshot.next_page.is_none());
}

#[tokio::test]
async fn detail_is_fetched_once_then_served_from_cache() {
    let mut gateway = MockPostGateway::new();
    gateway
        .expect_fetch_post()
        .times(1)
        .return_once(|id| {
            Ok(Post {
                id,
                title: "Cached".to_owned(),
                body: "Cached body text".to_owned(),
            })
        });

    let service = PostFeedService::new(Arc::new(gateway), Arc::new(MemoryPostCache::default()));
    let first = service.post_detail(PostId::new(7)).await.expect("fetch");
    let second = service.post_detail(PostId::new(7)).await.expect("cached");
    assert_eq!(first, second);
}

#[tokio::test]
async fn missing_detail_maps_to_not_found() {
    let service = service_with_fixture(3);
    let error = service
        .post_detail(PostId::new(9))
        .await
        .expect_err("out of range");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn transport_failures_map_to_unavailable() {
    let mut gateway = MockPostGateway::new();
    gateway
        .expect_list_page()
        .times(1)
        .return_once(|_| Err(PostGatewayError::transport("connection refused")));

    let service = PostFeedService::new(Arc::new(gateway), Arc::new(MemoryPostCache::default()));
    let error = service.load_feed().await.expect_err("transport error");
    assert_eq!(error.code(), ErrorCode::Unavailable);
    assert!(error.message().starts_with("Failed to fetch posts"));
}

#[tokio::test]
async fn create_invalidates_the_feed_and_stays_non_durable() {
    let service = service_with_fixture(20);
    service.load_feed().await.expect("warm the cache");

    let draft = PostDraft::try_new("Fresh", "A fresh body text").expect("valid draft");
    service.create_post(&draft).await.expect("create succeeds");

    // The next visit refetches from the remote, which never stored the post.
    let snapshot = service.load_feed().await.expect("reload");
    assert_eq!(snapshot.posts.len(), 20);
    assert!(snapshot.posts.iter().all(|post| post.title != "Fresh"));
}

#[tokio::test]
async fn create_propagates_cache_failures_as_internal() {
    let mut cache = MockPostCache::new();
    cache
        .expect_invalidate_feed()
        .times(1)
        .return_once(|| Err(PostCacheError::backend("poisoned")));

    let service = PostFeedService::new(
        Arc::new(FixturePostGateway::with_total(20)),
        Arc::new(cache),
    );
    let draft = PostDraft::try_new("Fresh", "A fresh body text").expect("valid draft");
    let error = service.create_post(&draft).await.expect_err("cache failure");
    assert_eq!(error.code(), ErrorCode::Internal);
}

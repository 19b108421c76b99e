//! End-to-end flows through the public crate surface.
//!
//! These scenarios drive the shell the way a host UI would: navigation,
//! keystrokes, submissions, and sentinel visibility events, backed by the
//! fixture gateway and the in-memory cache.

use std::sync::Arc;

use postboard::app::{App, NoticeLevel, Route, Screen};
use postboard::domain::ports::FixturePostGateway;
use postboard::domain::validation::{BODY, CONFIRM_PASSWORD, EMAIL, PASSWORD, TITLE};
use postboard::domain::{PostFeedService, SessionContext, VisibilityEdge};
use postboard::outbound::cache::MemoryPostCache;
use rstest::rstest;

fn app_with_total(total: u64) -> App<FixturePostGateway, MemoryPostCache> {
    App::new(PostFeedService::new(
        Arc::new(FixturePostGateway::with_total(total)),
        Arc::new(MemoryPostCache::default()),
    ))
}

#[rstest]
#[case("1234567", true)]
#[case("123456", false)]
#[case("", false)]
fn mock_login_boundary(#[case] password: &str, #[case] expected: bool) {
    let mut session = SessionContext::default();
    assert_eq!(session.login("a@b.com", password), expected);
    assert_eq!(session.is_authenticated(), expected);
}

#[rstest]
#[case("short", false)]
#[case("1234567890123", true)]
fn mock_signup_boundary(#[case] password: &str, #[case] expected: bool) {
    let mut session = SessionContext::default();
    assert_eq!(session.signup("a@b.com", password), expected);
    assert_eq!(session.user().is_some(), expected);
}

#[tokio::test]
async fn browse_login_and_scroll_to_the_end() {
    let mut app = app_with_total(45);

    app.open("/login").await;
    app.set_field(EMAIL, "a@b.com");
    app.set_field(PASSWORD, "Secret123!");
    app.submit_login().await;
    assert!(matches!(app.screen(), Screen::Posts(_)));

    // Scroll through every page: 20 + 20 + 5.
    let mut rounds = 0;
    loop {
        let Some(sentinel) = app.attach_sentinel() else {
            break;
        };
        let Some(ticket) = app.sentinel_visible(sentinel, VisibilityEdge::Enter) else {
            break;
        };
        app.resolve_fetch(ticket).await;
        rounds += 1;
        assert!(rounds <= 3, "scroll must terminate");
    }

    match app.screen() {
        Screen::Posts(screen) => {
            assert_eq!(screen.posts().len(), 45);
            assert!(screen.exhausted);
        }
        other => panic!("expected posts screen, got {other:?}"),
    }
}

#[tokio::test]
async fn created_posts_never_appear_in_the_feed() {
    let mut app = app_with_total(20);

    app.navigate(Route::Posts).await;
    app.navigate(Route::CreatePost).await;
    app.set_field(TITLE, "My new post");
    app.set_field(BODY, "Some content long enough");
    app.submit_post().await;

    let notices = app.drain_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Success);

    match app.screen() {
        Screen::Posts(screen) => {
            assert!(screen.posts().iter().all(|post| post.title != "My new post"));
        }
        other => panic!("expected posts screen, got {other:?}"),
    }
}

#[tokio::test]
async fn signup_then_login_round_trip() {
    let mut app = app_with_total(20);

    app.open("/register").await;
    app.set_field(EMAIL, "new@user.dev");
    app.set_field(PASSWORD, "VeryLongSecret1!");
    app.set_field(CONFIRM_PASSWORD, "VeryLongSecret1!");
    app.submit_signup().await;
    assert!(matches!(app.screen(), Screen::Login(_)));

    app.set_field(EMAIL, "new@user.dev");
    app.set_field(PASSWORD, "VeryLongSecret1!");
    app.submit_login().await;
    assert!(matches!(app.screen(), Screen::Posts(_)));
    assert_eq!(
        app.session().user().map(|user| user.email()),
        Some("new@user.dev")
    );
}

#[tokio::test]
async fn search_filters_the_loaded_feed() {
    let mut app = app_with_total(20);
    app.navigate(Route::Posts).await;

    if let Screen::Posts(screen) = app.screen_mut() {
        screen.set_search_query("post 7");
        let visible = screen.visible_posts();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "Post 7");
    } else {
        panic!("expected posts screen");
    }
}

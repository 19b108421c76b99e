//! Application shell.
//!
//! Owns the session, feed service, scroll controller, and current screen,
//! and consumes user events from the host. All state changes happen within
//! single event-loop turns; the only pending work is a network future, and
//! its application is guarded by a view epoch so results never land on a
//! view that has since unmounted.

use std::collections::VecDeque;

use tracing::debug;

use crate::domain::ports::{PostCache, PostGateway};
use crate::domain::validation::{BODY, EMAIL, FieldName, PASSWORD, TITLE};
use crate::domain::{
    DomainError, FeedSnapshot, FetchDecision, PageNumber, PostDraft, PostFeedService,
    ScrollController, SentinelId, SessionContext, VisibilityEdge,
};

use super::router::Route;
use super::screens::{
    CreatePostScreen, DetailScreen, DetailStatus, FeedStatus, LoginScreen, PostsScreen,
    RegisterScreen, Screen,
};

/// Severity of a transient notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Confirmation toast.
    Success,
    /// Failure toast.
    Error,
}

/// Transient message for the host's toast area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity for styling.
    pub level: NoticeLevel,
    /// Text to display.
    pub message: String,
}

impl Notice {
    fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Authorisation to run one next-page fetch.
///
/// Issued by [`App::sentinel_visible`] and redeemed by
/// [`App::resolve_fetch`]. The embedded epoch ties the result to the posts
/// view that requested it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    page: PageNumber,
    epoch: u64,
}

/// The composed application: session, feed, scroll, and screen state.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use postboard::app::{App, Screen};
/// use postboard::domain::ports::FixturePostGateway;
/// use postboard::domain::PostFeedService;
/// use postboard::outbound::cache::MemoryPostCache;
///
/// # async fn demo() {
/// let feed = PostFeedService::new(
///     Arc::new(FixturePostGateway::with_total(45)),
///     Arc::new(MemoryPostCache::default()),
/// );
/// let mut app = App::new(feed);
/// app.open("/posts").await;
/// assert!(matches!(app.screen(), Screen::Posts(_)));
/// # }
/// ```
pub struct App<G, C> {
    session: SessionContext,
    feed: PostFeedService<G, C>,
    scroll: ScrollController,
    screen: Screen,
    notices: VecDeque<Notice>,
    epoch: u64,
    next_page: Option<PageNumber>,
    sentinel_seq: u64,
}

impl<G, C> App<G, C>
where
    G: PostGateway,
    C: PostCache,
{
    /// Start on the home screen with a signed-out session.
    pub fn new(feed: PostFeedService<G, C>) -> Self {
        Self {
            session: SessionContext::default(),
            feed,
            scroll: ScrollController::new(),
            screen: Screen::Home,
            notices: VecDeque::new(),
            epoch: 0,
            next_page: None,
            sentinel_seq: 0,
        }
    }

    /// Current screen.
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Mutable screen access for host-driven edits (search box, forms).
    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    /// Read-only session state.
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Continuation cursor for the mounted posts view, if any.
    pub fn next_page(&self) -> Option<PageNumber> {
        self.next_page
    }

    /// Take every queued notice, oldest first.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    /// Sign the user out unconditionally.
    pub fn logout(&mut self) {
        self.session.logout();
    }

    /// Parse a path and navigate; unknown paths land on the NotFound screen.
    pub async fn open(&mut self, path: &str) {
        match Route::parse(path) {
            Ok(route) => self.navigate(route).await,
            Err(error) => {
                debug!(%error, "unknown path");
                self.leave_current_view();
                self.screen = Screen::NotFound {
                    path: path.to_owned(),
                };
            }
        }
    }

    /// Navigate to a route, loading whatever data it needs.
    pub async fn navigate(&mut self, route: Route) {
        self.leave_current_view();
        self.screen = match route {
            Route::Home => Screen::Home,
            Route::Login => Screen::Login(LoginScreen::new()),
            Route::Register => Screen::Register(RegisterScreen::new()),
            Route::CreatePost => Screen::CreatePost(CreatePostScreen::new()),
            Route::Posts => match self.feed.load_feed().await {
                Ok(snapshot) => {
                    self.next_page = snapshot.next_page;
                    Screen::Posts(PostsScreen::ready(
                        snapshot.posts,
                        snapshot.next_page.is_none(),
                    ))
                }
                Err(error) => Screen::Posts(PostsScreen::failed(error.message().to_owned())),
            },
            Route::PostDetail(id) => match self.feed.post_detail(id).await {
                Ok(post) => Screen::PostDetail(DetailScreen::new(DetailStatus::Ready(post))),
                Err(error) => Screen::PostDetail(DetailScreen::new(DetailStatus::Failed(
                    error.message().to_owned(),
                ))),
            },
        };
    }

    /// Tearing down the mounted view: pending fetch results become stale and
    /// the scroll controller forgets its sentinel.
    fn leave_current_view(&mut self) {
        self.epoch += 1;
        self.scroll.detach();
        self.next_page = None;
    }

    /// Record a keystroke in whichever form screen is mounted.
    pub fn set_field(&mut self, field: FieldName, value: impl Into<String>) {
        match &mut self.screen {
            Screen::Login(screen) => screen.form.set_value(field, value),
            Screen::Register(screen) => screen.form.set_value(field, value),
            Screen::CreatePost(screen) => screen.form.set_value(field, value),
            _ => {}
        }
    }

    /// Submit the login form.
    ///
    /// A rejected mock login is a no-op: the form stays mounted and no
    /// notice is raised.
    pub async fn submit_login(&mut self) {
        let Some(values) = Self::take_submission(&mut self.screen, |screen| match screen {
            Screen::Login(login) => Some(&mut login.form),
            _ => None,
        }) else {
            return;
        };

        let email = values.get(EMAIL).cloned().unwrap_or_default();
        let password = values.get(PASSWORD).cloned().unwrap_or_default();
        let accepted = self.session.login(&email, &password);

        if let Screen::Login(screen) = &mut self.screen {
            screen.form.finish_submission();
        }
        if accepted {
            self.navigate(Route::Posts).await;
        } else {
            debug!("login rejected; staying on the form");
        }
    }

    /// Submit the signup form.
    ///
    /// Success routes to the login screen; rejection raises an error notice.
    pub async fn submit_signup(&mut self) {
        let Some(values) = Self::take_submission(&mut self.screen, |screen| match screen {
            Screen::Register(register) => Some(&mut register.form),
            _ => None,
        }) else {
            return;
        };

        let email = values.get(EMAIL).cloned().unwrap_or_default();
        let password = values.get(PASSWORD).cloned().unwrap_or_default();
        let accepted = self.session.signup(&email, &password);

        if let Screen::Register(screen) = &mut self.screen {
            screen.form.finish_submission();
        }
        if accepted {
            self.navigate(Route::Login).await;
        } else {
            self.notices.push_back(Notice::error("Sign Up failed"));
        }
    }

    /// Submit the create-post form.
    pub async fn submit_post(&mut self) {
        let Some(values) = Self::take_submission(&mut self.screen, |screen| match screen {
            Screen::CreatePost(create) => Some(&mut create.form),
            _ => None,
        }) else {
            return;
        };

        let title = values.get(TITLE).cloned().unwrap_or_default();
        let body = values.get(BODY).cloned().unwrap_or_default();
        let outcome = match PostDraft::try_new(title, body) {
            Ok(draft) => self.feed.create_post(&draft).await,
            Err(error) => Err(DomainError::invalid_request(error.to_string())),
        };

        if let Screen::CreatePost(screen) = &mut self.screen {
            screen.form.finish_submission();
        }
        match outcome {
            Ok(()) => {
                self.notices
                    .push_back(Notice::success("Post created successfully!"));
                self.navigate(Route::Posts).await;
            }
            Err(error) => {
                debug!(%error, "post creation failed");
                self.notices.push_back(Notice::error("Failed to create post"));
            }
        }
    }

    fn take_submission(
        screen: &mut Screen,
        form_of: impl FnOnce(&mut Screen) -> Option<&mut crate::domain::FormState>,
    ) -> Option<std::collections::BTreeMap<FieldName, String>> {
        let form = form_of(screen)?;
        if !form.begin_submission() {
            return None;
        }
        Some(form.submission_values())
    }

    /// Register a new sentinel on the mounted posts view.
    ///
    /// Call after every render that moves the last item; the previous
    /// sentinel is torn down so its late events cannot fire. A feed whose
    /// initial load failed gets no sentinel: the errored screen must not
    /// report itself exhausted.
    pub fn attach_sentinel(&mut self) -> Option<SentinelId> {
        match &self.screen {
            Screen::Posts(screen) if screen.status == FeedStatus::Ready => {}
            _ => return None,
        }
        self.sentinel_seq += 1;
        let sentinel = SentinelId::new(self.sentinel_seq);
        self.scroll.observe(sentinel);
        Some(sentinel)
    }

    /// Handle a sentinel boundary-crossing event.
    ///
    /// Returns a ticket iff a next-page fetch should start; duplicates,
    /// stale sentinels, and exhausted feeds yield `None`.
    pub fn sentinel_visible(
        &mut self,
        sentinel: SentinelId,
        edge: VisibilityEdge,
    ) -> Option<FetchTicket> {
        let has_next = self.next_page.is_some();
        match self.scroll.on_visibility(sentinel, edge, has_next) {
            FetchDecision::StartFetch => {
                let page = self.next_page?;
                if let Screen::Posts(screen) = &mut self.screen {
                    screen.fetching_next = true;
                }
                Some(FetchTicket {
                    page,
                    epoch: self.epoch,
                })
            }
            FetchDecision::Exhausted => {
                if let Screen::Posts(screen) = &mut self.screen {
                    screen.exhausted = true;
                }
                None
            }
            decision => {
                debug!(?decision, "sentinel event ignored");
                None
            }
        }
    }

    /// Run the fetch a ticket authorised and apply the result.
    ///
    /// The fetch itself always completes (and may warm the cache), but the
    /// view is only updated when the ticket's epoch still matches — a result
    /// arriving after navigation is discarded.
    pub async fn resolve_fetch(&mut self, ticket: FetchTicket) {
        let outcome = self.feed.fetch_page(ticket.page).await;
        self.apply_fetch(ticket, outcome);
    }

    fn apply_fetch(&mut self, ticket: FetchTicket, outcome: Result<FeedSnapshot, DomainError>) {
        if ticket.epoch != self.epoch {
            debug!(page = %ticket.page, "discarding fetch result for unmounted view");
            return;
        }
        match outcome {
            Ok(snapshot) => {
                self.next_page = snapshot.next_page;
                self.scroll.fetch_settled(snapshot.next_page.is_some());
                if let Screen::Posts(screen) = &mut self.screen {
                    screen.set_posts(snapshot.posts);
                    screen.fetching_next = false;
                    screen.exhausted = snapshot.next_page.is_none();
                    screen.last_error = None;
                }
            }
            Err(error) => {
                self.scroll.fetch_settled(self.next_page.is_some());
                if let Screen::Posts(screen) = &mut self.screen {
                    screen.fetching_next = false;
                    screen.last_error = Some(error.message().to_owned());
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "shell_tests.rs"]
mod tests;

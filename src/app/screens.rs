//! Per-route screen state.
//!
//! Screens are plain data the host renders. The shell constructs them after
//! the backing fetch settles, so a screen is always either ready or carries
//! its inline error message; transient spinners are the host's concern.

use crate::domain::{FormState, Post};
use crate::domain::validation::{login_schema, post_schema, signup_schema};

/// Outcome of the fetch backing a data screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedStatus {
    /// Data loaded; render it.
    Ready,
    /// The fetch failed; render the message inline. No auto-retry.
    Failed(String),
}

/// Placeholder comment shown on the detail screen.
///
/// The remote collection serves no comments for this UI; the set is static
/// client data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comment {
    /// Display name of the commenter.
    pub author: &'static str,
    /// Comment text.
    pub body: &'static str,
}

/// Fixed comments rendered under every post.
pub fn placeholder_comments() -> Vec<Comment> {
    vec![
        Comment {
            author: "User 1",
            body: "This is a great post!",
        },
        Comment {
            author: "User 2",
            body: "Thanks for sharing!",
        },
        Comment {
            author: "User 3",
            body: "Really insightful content.",
        },
    ]
}

/// Sign-in screen state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginScreen {
    /// Email/password form.
    pub form: FormState,
}

impl LoginScreen {
    pub(crate) fn new() -> Self {
        Self {
            form: FormState::new(login_schema()),
        }
    }
}

/// Sign-up screen state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterScreen {
    /// Email/password/confirm form.
    pub form: FormState,
}

impl RegisterScreen {
    pub(crate) fn new() -> Self {
        Self {
            form: FormState::new(signup_schema()),
        }
    }
}

/// New-post screen state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePostScreen {
    /// Title/body form.
    pub form: FormState,
}

impl CreatePostScreen {
    pub(crate) fn new() -> Self {
        Self {
            form: FormState::new(post_schema()),
        }
    }
}

/// Infinite-scroll feed screen state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostsScreen {
    /// Outcome of the initial feed load.
    pub status: FeedStatus,
    /// A next-page fetch is in flight.
    pub fetching_next: bool,
    /// No further pages exist; render the "no more posts" affordance.
    pub exhausted: bool,
    /// Inline message from the most recent failed next-page fetch.
    pub last_error: Option<String>,
    posts: Vec<Post>,
    search_query: String,
}

impl PostsScreen {
    pub(crate) fn ready(posts: Vec<Post>, exhausted: bool) -> Self {
        Self {
            status: FeedStatus::Ready,
            fetching_next: false,
            exhausted,
            last_error: None,
            posts,
            search_query: String::new(),
        }
    }

    pub(crate) fn failed(message: String) -> Self {
        Self {
            status: FeedStatus::Failed(message),
            fetching_next: false,
            exhausted: false,
            last_error: None,
            posts: Vec::new(),
            search_query: String::new(),
        }
    }

    pub(crate) fn set_posts(&mut self, posts: Vec<Post>) {
        self.posts = posts;
    }

    /// Every loaded post, in feed order.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Current search filter text.
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Update the search filter; matching is case-insensitive.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// Posts whose title or body contains the search query.
    pub fn visible_posts(&self) -> Vec<&Post> {
        let needle = self.search_query.to_lowercase();
        self.posts
            .iter()
            .filter(|post| {
                needle.is_empty()
                    || post.title.to_lowercase().contains(&needle)
                    || post.body.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

/// Status of the detail screen's backing fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailStatus {
    /// The post loaded.
    Ready(Post),
    /// The fetch failed; render the message inline.
    Failed(String),
}

/// Single-post screen state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailScreen {
    /// Fetched post or its inline error.
    pub status: DetailStatus,
    /// Static placeholder comments.
    pub comments: Vec<Comment>,
}

impl DetailScreen {
    pub(crate) fn new(status: DetailStatus) -> Self {
        Self {
            status,
            comments: placeholder_comments(),
        }
    }
}

/// The screen currently presented by the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Landing page.
    Home,
    /// Sign-in form.
    Login(LoginScreen),
    /// Sign-up form.
    Register(RegisterScreen),
    /// Infinite-scroll feed.
    Posts(PostsScreen),
    /// New-post form.
    CreatePost(CreatePostScreen),
    /// Single post with comments.
    PostDetail(DetailScreen),
    /// Unknown path fallback.
    NotFound {
        /// The path that failed to parse.
        path: String,
    },
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::PostId;

    fn posts() -> Vec<Post> {
        vec![
            Post {
                id: PostId::new(1),
                title: "Rust ownership".to_owned(),
                body: "Borrowing explained".to_owned(),
            },
            Post {
                id: PostId::new(2),
                title: "Cooking".to_owned(),
                body: "A recipe about rust-coloured paprika".to_owned(),
            },
            Post {
                id: PostId::new(3),
                title: "Gardening".to_owned(),
                body: "Tomatoes".to_owned(),
            },
        ]
    }

    #[test]
    fn empty_query_shows_everything() {
        let screen = PostsScreen::ready(posts(), false);
        assert_eq!(screen.visible_posts().len(), 3);
    }

    #[test]
    fn search_matches_title_and_body_case_insensitively() {
        let mut screen = PostsScreen::ready(posts(), false);
        screen.set_search_query("RUST");
        let visible: Vec<u64> = screen
            .visible_posts()
            .iter()
            .map(|post| post.id.get())
            .collect();
        assert_eq!(visible, vec![1, 2]);
    }

    #[test]
    fn detail_screen_carries_placeholder_comments() {
        let screen = DetailScreen::new(DetailStatus::Failed("nope".to_owned()));
        assert_eq!(screen.comments.len(), 3);
    }
}

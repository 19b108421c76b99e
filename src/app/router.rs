//! Route table and path parsing.
//!
//! Mirrors the app's public routes: `/`, `/login`, `/register`, `/posts`,
//! `/posts/create`, `/posts/:id`. The static `create` segment is matched
//! before the numeric id, so `/posts/create` never parses as a detail
//! route.

use std::fmt;

use thiserror::Error;

use crate::domain::PostId;

/// Parse failures for user-supplied paths.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteParseError {
    /// The path matches no known route.
    #[error("no route matches {path}")]
    UnknownPath { path: String },
    /// The post id segment is not a positive integer.
    #[error("invalid post id: {segment}")]
    InvalidPostId { segment: String },
}

/// One navigable location in the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Landing screen.
    Home,
    /// Sign-in form.
    Login,
    /// Sign-up form.
    Register,
    /// Infinite-scroll post feed.
    Posts,
    /// New-post form.
    CreatePost,
    /// Single post with placeholder comments.
    PostDetail(PostId),
}

impl Route {
    /// Parse a path into a route.
    ///
    /// # Examples
    /// ```
    /// use postboard::app::Route;
    /// use postboard::domain::PostId;
    ///
    /// assert_eq!(Route::parse("/posts/7"), Ok(Route::PostDetail(PostId::new(7))));
    /// assert_eq!(Route::parse("/posts/create"), Ok(Route::CreatePost));
    /// assert!(Route::parse("/nope").is_err());
    /// ```
    pub fn parse(path: &str) -> Result<Self, RouteParseError> {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Ok(Self::Home),
            "/login" => Ok(Self::Login),
            "/register" => Ok(Self::Register),
            "/posts" => Ok(Self::Posts),
            "/posts/create" => Ok(Self::CreatePost),
            other => match other.strip_prefix("/posts/") {
                // u64::parse accepts a leading '+'; only canonical digit
                // strings round-trip through `path()`.
                Some(segment) if !segment.contains('/') => segment
                    .bytes()
                    .all(|b| b.is_ascii_digit())
                    .then(|| segment.parse::<u64>().ok())
                    .flatten()
                    .filter(|id| *id > 0)
                    .map(|id| Self::PostDetail(PostId::new(id)))
                    .ok_or_else(|| RouteParseError::InvalidPostId {
                        segment: segment.to_owned(),
                    }),
                _ => Err(RouteParseError::UnknownPath {
                    path: path.to_owned(),
                }),
            },
        }
    }

    /// Canonical path for this route.
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_owned(),
            Self::Login => "/login".to_owned(),
            Self::Register => "/register".to_owned(),
            Self::Posts => "/posts".to_owned(),
            Self::CreatePost => "/posts/create".to_owned(),
            Self::PostDetail(id) => format!("/posts/{id}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/", Route::Home)]
    #[case("", Route::Home)]
    #[case("/login", Route::Login)]
    #[case("/register", Route::Register)]
    #[case("/posts", Route::Posts)]
    #[case("/posts/", Route::Posts)]
    #[case("/posts/create", Route::CreatePost)]
    #[case("/posts/42", Route::PostDetail(PostId::new(42)))]
    fn known_paths_parse(#[case] path: &str, #[case] expected: Route) {
        assert_eq!(Route::parse(path), Ok(expected));
    }

    #[rstest]
    #[case(Route::Home, "/")]
    #[case(Route::CreatePost, "/posts/create")]
    #[case(Route::PostDetail(PostId::new(42)), "/posts/42")]
    fn routes_round_trip_through_their_path(#[case] route: Route, #[case] path: &str) {
        assert_eq!(route.path(), path);
        assert_eq!(Route::parse(path), Ok(route));
    }

    #[rstest]
    #[case("/nope")]
    #[case("/posts/7/comments")]
    fn unknown_paths_are_rejected(#[case] path: &str) {
        assert!(matches!(
            Route::parse(path),
            Err(RouteParseError::UnknownPath { .. })
        ));
    }

    #[rstest]
    #[case("/posts/abc")]
    #[case("/posts/0")]
    #[case("/posts/-3")]
    #[case("/posts/+7")]
    #[case("/posts/ 7")]
    fn bad_post_ids_are_rejected(#[case] path: &str) {
        assert!(matches!(
            Route::parse(path),
            Err(RouteParseError::InvalidPostId { .. })
        ));
    }
}

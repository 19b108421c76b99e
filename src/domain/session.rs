//! Mock authentication session.
//!
//! There is no credential verification, token issuance, or persistence here:
//! the session is a demonstration stand-in that lives for the lifetime of
//! the running app instance. Rather than a process-wide singleton, the state
//! is an explicit [`SessionContext`] owned by the app shell and passed to
//! views, so tests and hosts can inject their own.

use tracing::debug;

/// Minimum password length (exclusive) accepted by [`SessionContext::login`].
pub const LOGIN_PASSWORD_FLOOR: usize = 6;

/// Minimum password length (exclusive) accepted by [`SessionContext::signup`].
pub const SIGNUP_PASSWORD_FLOOR: usize = 12;

/// The signed-in user record.
///
/// Only the email survives the mock check; nothing else is known about the
/// user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    email: String,
}

impl AuthenticatedUser {
    /// Email address supplied at login or signup.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }
}

/// In-memory session state with mock login and signup checks.
///
/// ## Invariants
/// - `user` is `Some` only after a successful `login` or `signup` and until
///   the next `logout`.
/// - Failed operations leave the state untouched.
///
/// # Examples
/// ```
/// use postboard::domain::SessionContext;
///
/// let mut session = SessionContext::default();
/// assert!(session.login("a@b.com", "1234567"));
/// assert_eq!(session.user().map(|u| u.email()), Some("a@b.com"));
/// session.logout();
/// assert!(session.user().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    user: Option<AuthenticatedUser>,
}

impl SessionContext {
    /// Attempt a mock login.
    ///
    /// Succeeds iff the email is non-empty and the password is longer than
    /// [`LOGIN_PASSWORD_FLOOR`] characters. No error detail beyond the
    /// boolean is surfaced.
    pub fn login(&mut self, email: &str, password: &str) -> bool {
        if email.is_empty() || password.chars().count() <= LOGIN_PASSWORD_FLOOR {
            debug!(%email, "mock login rejected");
            return false;
        }
        self.user = Some(AuthenticatedUser {
            email: email.to_owned(),
        });
        debug!(%email, "mock login accepted");
        true
    }

    /// Attempt a mock signup.
    ///
    /// Succeeds iff the email is non-empty and the password is longer than
    /// [`SIGNUP_PASSWORD_FLOOR`] characters.
    pub fn signup(&mut self, email: &str, password: &str) -> bool {
        if email.is_empty() || password.chars().count() <= SIGNUP_PASSWORD_FLOOR {
            debug!(%email, "mock signup rejected");
            return false;
        }
        self.user = Some(AuthenticatedUser {
            email: email.to_owned(),
        });
        debug!(%email, "mock signup accepted");
        true
    }

    /// Clear the session unconditionally.
    pub fn logout(&mut self) {
        self.user = None;
    }

    /// The signed-in user, if any.
    pub fn user(&self) -> Option<&AuthenticatedUser> {
        self.user.as_ref()
    }

    /// Whether a user is currently signed in.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

//! Remote API configuration.
//!
//! The only externally configurable value is the API base URL; page size and
//! request timeout carry fixed defaults matching the remote collection's
//! paging contract.

use std::env;
use std::time::Duration;

use tracing::warn;
use url::Url;

/// Default remote collection endpoint.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Environment variable overriding the API base URL.
pub const BASE_URL_ENV: &str = "POSTBOARD_API_BASE_URL";

/// Fixed page size used for feed requests.
pub const PAGE_SIZE: u32 = 20;

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Settings for the outbound post gateway.
///
/// # Examples
/// ```
/// use postboard::config::{ApiConfig, PAGE_SIZE};
///
/// let config = ApiConfig::default();
/// assert_eq!(config.page_size, PAGE_SIZE);
/// assert_eq!(config.base_url.host_str(), Some("jsonplaceholder.typicode.com"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL of the remote JSON API.
    pub base_url: Url,
    /// Number of posts requested per feed page.
    pub page_size: u32,
    /// Request timeout applied to the HTTP client.
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        let base_url = Url::parse(DEFAULT_BASE_URL)
            .unwrap_or_else(|error| panic!("default base URL failed to parse: {error}"));
        Self {
            base_url,
            page_size: PAGE_SIZE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        }
    }
}

impl ApiConfig {
    /// Build a configuration, honouring the base URL environment override.
    ///
    /// An unset variable yields the default endpoint. A value that fails to
    /// parse is rejected with a warning rather than taking down the app.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(raw) = env::var(BASE_URL_ENV) {
            match Url::parse(&raw) {
                Ok(url) => config.base_url = url,
                Err(error) => {
                    warn!(%raw, %error, "ignoring invalid base URL override");
                }
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn default_points_at_demo_api() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url.as_str(), "https://jsonplaceholder.typicode.com/");
        assert_eq!(config.page_size, 20);
    }
}

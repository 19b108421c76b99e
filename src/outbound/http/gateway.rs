//! Reqwest-backed post gateway adapter.
//!
//! This adapter owns transport details only: URL construction, timeout and
//! HTTP error mapping, and JSON decoding into domain posts. Pagination
//! semantics (the full-page continuation heuristic) live in the domain.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::dto::{CreatePostDto, PostDto};
use crate::config::ApiConfig;
use crate::domain::ports::{PostGateway, PostGatewayError};
use crate::domain::{PageNumber, Post, PostDraft, PostId, PostPage};

/// Gateway adapter issuing requests against the remote collection.
pub struct HttpPostGateway {
    client: Client,
    base_url: Url,
    page_size: u32,
}

impl HttpPostGateway {
    /// Build an adapter using a reqwest client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(config: &ApiConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            page_size: config.page_size,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, PostGatewayError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| PostGatewayError::transport("base URL cannot hold path segments"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

fn map_transport_error(error: reqwest::Error) -> PostGatewayError {
    PostGatewayError::transport(error.to_string())
}

#[async_trait]
impl PostGateway for HttpPostGateway {
    async fn list_page(&self, page: PageNumber) -> Result<PostPage, PostGatewayError> {
        let url = self.endpoint(&["posts"])?;
        debug!(%page, "listing posts");
        let response = self
            .client
            .get(url)
            .query(&[("_page", page.get()), ("_limit", self.page_size)])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(PostGatewayError::status(status.as_u16()));
        }

        let posts: Vec<PostDto> = response
            .json()
            .await
            .map_err(|error| PostGatewayError::decode(error.to_string()))?;
        let posts = posts.into_iter().map(Post::from).collect();
        Ok(PostPage::from_fetch(page, posts, self.page_size))
    }

    async fn fetch_post(&self, id: PostId) -> Result<Post, PostGatewayError> {
        let url = self.endpoint(&["posts", &id.to_string()])?;
        debug!(%id, "fetching post");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(PostGatewayError::not_found(id.get()));
        }
        if !status.is_success() {
            return Err(PostGatewayError::status(status.as_u16()));
        }

        let dto: PostDto = response
            .json()
            .await
            .map_err(|error| PostGatewayError::decode(error.to_string()))?;
        Ok(Post::from(dto))
    }

    async fn create_post(&self, draft: &PostDraft) -> Result<(), PostGatewayError> {
        let url = self.endpoint(&["posts"])?;
        debug!("creating post");
        let response = self
            .client
            .post(url)
            .json(&CreatePostDto::from(draft))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(PostGatewayError::status(status.as_u16()));
        }
        // The echoed "created" object is discarded: the remote mock never
        // stores it, so there is nothing trustworthy to keep.
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    fn gateway() -> HttpPostGateway {
        HttpPostGateway::new(&ApiConfig::default()).expect("client builds")
    }

    #[test]
    fn endpoints_join_against_the_base_url() {
        let gateway = gateway();
        let url = gateway.endpoint(&["posts"]).expect("joins");
        assert_eq!(url.as_str(), "https://jsonplaceholder.typicode.com/posts");

        let url = gateway.endpoint(&["posts", "7"]).expect("joins");
        assert_eq!(url.as_str(), "https://jsonplaceholder.typicode.com/posts/7");
    }

    #[test]
    fn endpoints_respect_base_paths() {
        let mut config = ApiConfig::default();
        config.base_url = Url::parse("https://example.test/api/v1").expect("parses");
        let gateway = HttpPostGateway::new(&config).expect("client builds");
        let url = gateway.endpoint(&["posts"]).expect("joins");
        assert_eq!(url.as_str(), "https://example.test/api/v1/posts");
    }
}

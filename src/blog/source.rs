use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;

use crate::config::BlogConfig;
use crate::events::{dispatch, SiteEvent};
use crate::NolyxError;

use super::{extract_posts, Post};

/// Where posts come from.
#[async_trait]
pub trait PostSource: Send + Sync {
    async fn fetch_posts(&self) -> Result<Vec<Post>, NolyxError>;
}

/// Fetches posts from a public JSON blob with a plain GET.
///
/// No retry and no caching: every call hits the endpoint.
pub struct JsonBinSource {
    http_client: reqwest::Client,
    url: String,
}

impl JsonBinSource {
    /// Creates a source for `config.posts_url` with the configured timeout.
    pub fn new(config: &BlogConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .unwrap_or_default();

        Self {
            http_client,
            url: config.posts_url.clone(),
        }
    }

    /// Creates a source for an explicit URL with default settings.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::new(&BlogConfig::default())
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl PostSource for JsonBinSource {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "blog.fetch_posts", skip(self), fields(url = %self.url), err)
    )]
    async fn fetch_posts(&self) -> Result<Vec<Post>, NolyxError> {
        let response = self
            .http_client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    NolyxError::FetchError(format!("request timed out: {e}"))
                } else {
                    NolyxError::FetchError(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(NolyxError::FetchError(format!(
                "HTTP status {}",
                response.status()
            )));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| NolyxError::InvalidPayload(format!("response is not JSON: {e}")))?;

        extract_posts(&payload)
    }
}

/// A fixed list of posts, for offline hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticPostSource {
    posts: Vec<Post>,
}

impl StaticPostSource {
    pub fn new(posts: Vec<Post>) -> Self {
        Self { posts }
    }
}

#[async_trait]
impl PostSource for StaticPostSource {
    async fn fetch_posts(&self) -> Result<Vec<Post>, NolyxError> {
        Ok(self.posts.clone())
    }
}

/// Loads posts, falling back to an empty list on any failure.
///
/// Failures are logged and reported as [`SiteEvent::PostsLoadFailed`]; the
/// page then shows its "no results" state.
pub async fn load_posts<S: PostSource + ?Sized>(source: &S) -> Vec<Post> {
    match source.fetch_posts().await {
        Ok(posts) => {
            log::info!(
                target: "nolyx",
                "msg=\"posts loaded\", count={}",
                posts.len()
            );
            dispatch(SiteEvent::PostsLoaded {
                count: posts.len(),
                at: Utc::now(),
            });
            posts
        }
        Err(e) => {
            log::error!(
                target: "nolyx",
                "msg=\"failed to load posts\", error=\"{e}\""
            );
            dispatch(SiteEvent::PostsLoadFailed {
                reason: e.to_string(),
                at: Utc::now(),
            });
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingSource;

    #[async_trait]
    impl PostSource for FailingSource {
        async fn fetch_posts(&self) -> Result<Vec<Post>, NolyxError> {
            Err(NolyxError::FetchError("HTTP status 503".to_owned()))
        }
    }

    fn post(id: u64) -> Post {
        Post {
            id,
            title: format!("Post {id}"),
            excerpt: String::new(),
            content: String::new(),
            category: "dao".to_owned(),
            date: String::new(),
            read_time: String::new(),
            image: String::new(),
            author: Default::default(),
            tags: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_load_posts_success() {
        let source = StaticPostSource::new(vec![post(1), post(2)]);
        let posts = load_posts(&source).await;

        assert_eq!(posts.len(), 2);
    }

    #[tokio::test]
    async fn test_load_posts_failure_is_empty() {
        let posts = load_posts(&FailingSource).await;
        assert!(posts.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_empty() {
        // port 9 (discard) on loopback refuses connections
        let source = JsonBinSource::with_url("http://127.0.0.1:9/posts");
        let posts = load_posts(&source).await;

        assert!(posts.is_empty());
    }

    #[test]
    fn test_source_url_from_config() {
        let config = BlogConfig {
            posts_url: "https://example.invalid/b/1".to_owned(),
            ..Default::default()
        };
        assert_eq!(JsonBinSource::new(&config).url(), "https://example.invalid/b/1");
    }
}

//! NewsAPI (newsapi.org v2) source implementation.
//!
//! Two endpoints are used:
//!
//! * `GET {base}/top-headlines?category=<category>&apiKey=<key>`
//! * `GET {base}/everything?q=<query>&apiKey=<key>`
//!
//! Both return the same `{ "articles": [...] }` shape, parsed by
//! [`parse_articles`].  Any non-2xx status is a [`FetchError::Status`]; the
//! API's own `message` is attached when the error body carries one.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

use super::article::{parse_articles, WireError};
use super::{Article, FeedRequest, NewsSource};
use crate::error::FetchError;

/// Default API root used when the config does not override it.
pub const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2";

/// Bytes left as-is in query values: alphanumerics plus `-_.!~*()`.
/// Everything else, space included, becomes `%XX`.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'(')
    .remove(b')');

/// Shown in place of the API key in logged request targets.
const REDACTED: &str = "***";

/// A NewsAPI client bound to one API key.
pub struct NewsApiClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl NewsApiClient {
    /// Create a client.
    ///
    /// # Arguments
    ///
    /// * `base_url`: API root, e.g. [`DEFAULT_BASE_URL`].  Endpoint names are
    ///   appended as path segments.
    /// * `api_key`: the credential sent as the `apiKey` query parameter.
    /// * `timeout`: whole-request timeout enforced by the HTTP client.
    pub fn new(base_url: &str, api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("invalid news API base URL {base_url:?}"))?;
        if base_url.cannot_be_a_base() {
            bail!("news API base URL {base_url} cannot take path segments");
        }

        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(timeout)
            .user_agent(format!("headlines/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url,
            api_key: api_key.into(),
        })
    }

    /// Build the full request target for `request`, credential included.
    ///
    /// Pure (no I/O) so the query encoding can be tested directly.
    pub fn request_url(&self, request: &FeedRequest) -> Url {
        self.target(request, &self.api_key)
    }

    fn target(&self, request: &FeedRequest, credential: &str) -> Url {
        let (endpoint, key, value) = match request {
            FeedRequest::TopHeadlines(category) => ("top-headlines", "category", category.as_str()),
            FeedRequest::Everything(query) => ("everything", "q", query.as_str()),
        };

        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(endpoint);
        }
        // Strict percent-encoding: `+` is an operator in NewsAPI's `q` syntax,
        // so a space must go out as `%20`.
        let query = format!(
            "{key}={}&apiKey={}",
            utf8_percent_encode(value, QUERY_VALUE),
            utf8_percent_encode(credential, QUERY_VALUE),
        );
        url.set_query(Some(&query));
        url
    }
}

#[async_trait]
impl NewsSource for NewsApiClient {
    fn name(&self) -> &str {
        "newsapi"
    }

    async fn fetch(&self, request: &FeedRequest) -> Result<Vec<Article>, FetchError> {
        let url = self.request_url(request);
        tracing::debug!(target_url = %self.target(request, REDACTED), "requesting headlines");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<WireError>(&body)
                .ok()
                .and_then(|e| e.message);
            return Err(FetchError::Status {
                code: status.as_u16(),
                message,
            });
        }

        let articles = parse_articles(&body)?;
        tracing::debug!(count = articles.len(), "parsed headlines");
        Ok(articles)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

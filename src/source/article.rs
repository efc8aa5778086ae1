//! The news item type and its NewsAPI wire format.
//!
//! `Article` is what the rest of the application works with.  The `Wire*`
//! structs mirror the JSON the API returns and are converted into `Article`s
//! by [`parse_articles`], which is a pure function so tests can feed it
//! canned bodies without touching the network.
//!
//! ## Leniency
//!
//! NewsAPI is loose with its fields: `title` can be `null`, `source.name` can
//! be missing, and `publishedAt` is occasionally not RFC 3339.  None of that
//! fails the whole response; only a body that is not JSON (or not an object)
//! does.  A missing `articles` field is an empty result, not an error.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::FetchError;

/// A single headline, normalised from the API response.
///
/// Immutable once built; the controller replaces its whole list on every
/// successful fetch and never edits individual articles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    /// Headline text.
    pub title: String,

    /// Optional standfirst / summary.
    pub description: Option<String>,

    /// Lead image, if the publisher supplied one.
    pub image_url: Option<String>,

    /// Canonical link to the full story.
    pub url: String,

    /// Publication time.  `None` when the API omitted it or sent something
    /// that does not parse as RFC 3339.
    pub published: Option<DateTime<Utc>>,

    /// Publisher name (e.g. "BBC News").
    pub source_name: String,
}

impl Article {
    /// Human-readable publication date, e.g. "January 5, 2024".
    pub fn formatted_date(&self) -> Option<String> {
        self.published.map(|d| d.format("%B %-d, %Y").to_string())
    }
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    #[serde(default)]
    articles: Option<Vec<WireArticle>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireArticle {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    url_to_image: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    published_at: Option<String>,
    #[serde(default)]
    source: Option<WireSource>,
}

#[derive(Debug, Deserialize)]
struct WireSource {
    #[serde(default)]
    name: Option<String>,
}

/// Error body NewsAPI sends alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct WireError {
    #[serde(default)]
    pub message: Option<String>,
}

impl From<WireArticle> for Article {
    fn from(wire: WireArticle) -> Self {
        // Keep the API's timestamp when it parses; degrade to None otherwise.
        let published = wire
            .published_at
            .as_deref()
            .and_then(|d| DateTime::parse_from_rfc3339(d).ok())
            .map(|dt| dt.with_timezone(&Utc));

        Article {
            title: wire.title.unwrap_or_else(|| "(untitled)".to_string()),
            description: wire.description.filter(|d| !d.trim().is_empty()),
            image_url: wire.url_to_image.filter(|u| !u.trim().is_empty()),
            url: wire.url.unwrap_or_default(),
            published,
            source_name: wire
                .source
                .and_then(|s| s.name)
                .unwrap_or_default(),
        }
    }
}

/// Parse a success-status response body into articles, in API order.
pub fn parse_articles(body: &[u8]) -> Result<Vec<Article>, FetchError> {
    let response: WireResponse = serde_json::from_slice(body)?;
    Ok(response
        .articles
        .unwrap_or_default()
        .into_iter()
        .map(Article::from)
        .collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const TWO_ARTICLES: &str = r#"{
        "status": "ok",
        "totalResults": 2,
        "articles": [
            {
                "source": { "id": "bbc-news", "name": "BBC News" },
                "author": "BBC",
                "title": "First headline",
                "description": "Something happened",
                "url": "https://example.com/1",
                "urlToImage": "https://example.com/1.jpg",
                "publishedAt": "2024-01-05T09:30:00Z",
                "content": "..."
            },
            {
                "source": { "id": null, "name": "Reuters" },
                "title": "Second headline",
                "description": null,
                "url": "https://example.com/2",
                "urlToImage": null,
                "publishedAt": "2024-01-04T18:00:00Z"
            }
        ]
    }"#;

    #[test]
    fn parses_articles_in_api_order() {
        let articles = parse_articles(TWO_ARTICLES.as_bytes()).unwrap();

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].title, "First headline");
        assert_eq!(articles[0].source_name, "BBC News");
        assert_eq!(articles[0].description.as_deref(), Some("Something happened"));
        assert_eq!(articles[0].image_url.as_deref(), Some("https://example.com/1.jpg"));
        assert_eq!(
            articles[0].published,
            Some(Utc.with_ymd_and_hms(2024, 1, 5, 9, 30, 0).unwrap())
        );

        assert_eq!(articles[1].title, "Second headline");
        assert!(articles[1].description.is_none());
        assert!(articles[1].image_url.is_none());
    }

    #[test]
    fn missing_articles_field_is_empty_not_error() {
        let articles = parse_articles(br#"{"status":"ok","totalResults":0}"#).unwrap();
        assert!(articles.is_empty());
    }

    #[test]
    fn null_articles_field_is_empty() {
        let articles = parse_articles(br#"{"articles":null}"#).unwrap();
        assert!(articles.is_empty());
    }

    #[test]
    fn unparseable_body_is_decode_error() {
        let err = parse_articles(b"<html>oops</html>").unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn null_title_and_missing_source_degrade_gracefully() {
        let body = br#"{"articles":[{"title":null,"url":"https://example.com/x"}]}"#;
        let articles = parse_articles(body).unwrap();

        assert_eq!(articles[0].title, "(untitled)");
        assert_eq!(articles[0].source_name, "");
        assert!(articles[0].published.is_none());
    }

    #[test]
    fn bad_timestamp_becomes_none() {
        let body = br#"{"articles":[{"title":"t","url":"u","publishedAt":"yesterday"}]}"#;
        let articles = parse_articles(body).unwrap();
        assert!(articles[0].published.is_none());
    }

    #[test]
    fn offset_timestamps_are_normalised_to_utc() {
        let body = br#"{"articles":[{"title":"t","url":"u","publishedAt":"2024-03-01T01:00:00+02:00"}]}"#;
        let articles = parse_articles(body).unwrap();
        assert_eq!(
            articles[0].published,
            Some(Utc.with_ymd_and_hms(2024, 2, 29, 23, 0, 0).unwrap())
        );
    }

    #[test]
    fn formatted_date_is_long_form() {
        let articles = parse_articles(TWO_ARTICLES.as_bytes()).unwrap();
        assert_eq!(articles[0].formatted_date().as_deref(), Some("January 5, 2024"));
    }
}

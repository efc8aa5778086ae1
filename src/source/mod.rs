//! News source abstraction layer.
//!
//! This module defines the [`NewsSource`] trait, the [`FeedRequest`] the
//! controller asks it to serve, and the common [`Article`] type.  The only
//! concrete source is [`NewsApiClient`]; tests substitute in-memory stubs.
//!
//! ## For contributors: adding a new source
//!
//! 1. Create a new file in this directory (e.g. `gnews.rs`).
//! 2. Define a struct and implement [`NewsSource`] for it, mapping each
//!    [`FeedRequest`] variant onto the provider's endpoints.
//! 3. Add `mod gnews;` below and re-export your struct.
//! 4. Construct it in `main.rs` instead of `NewsApiClient`.
//!
//! The controller, the request sequencing and the UI are all source-agnostic.

mod article;
mod newsapi;

pub use article::Article;
pub use newsapi::{NewsApiClient, DEFAULT_BASE_URL};

use async_trait::async_trait;

use crate::category::Category;
use crate::error::FetchError;

/// One thing the controller can ask a source for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedRequest {
    /// Top headlines for a category.
    TopHeadlines(Category),
    /// Free-text search across everything.  The query is never blank; the
    /// controller turns blank searches into [`FeedRequest::TopHeadlines`].
    Everything(String),
}

/// Trait that every news source must implement.
///
/// The controller calls [`fetch()`](NewsSource::fetch) from a spawned tokio
/// task, so implementations must be [`Send`] + [`Sync`].
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Human-readable label used in log lines.
    fn name(&self) -> &str;

    /// Perform one request and return its articles in provider order.
    ///
    /// A success response without an article list yields an empty `Vec`.
    async fn fetch(&self, request: &FeedRequest) -> Result<Vec<Article>, FetchError>;
}

//! Error types for fetching headlines and persisting preferences.
//!
//! Everything that can go wrong while talking to the news API collapses into
//! [`FetchError`]; the feed controller turns it into the one-line message the
//! UI shows in its error banner.  Application wiring (`main`, config loading)
//! uses [`anyhow`] instead.

use thiserror::Error;

/// Why a single request to the news API failed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response (DNS, connect, TLS, timeout).
    #[error("network error: {0}")]
    Transport(String),

    /// The API answered with a non-success status code.
    ///
    /// `message` carries the API's own explanation when the error body was
    /// readable (e.g. "Your API key is invalid or incorrect.").
    #[error("HTTP error! status: {code}{}", detail(.message))]
    Status { code: u16, message: Option<String> },

    /// The response body was not the JSON shape we expect.
    #[error("malformed response: {0}")]
    Decode(String),
}

fn detail(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(" ({m})"))
        .unwrap_or_default()
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            FetchError::Status {
                code: status.as_u16(),
                message: None,
            }
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}

/// Failure reading or writing the preferences file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid preferences file: {0}")]
    Json(#[from] serde_json::Error),
}

//! Wikimedia client error types.

use std::sync::Arc;

use wikifit_core::ErrorKind;

/// Errors from a single upstream lookup.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SourceError {
    /// The term has no entry in this source.
    #[error("not found: {0}")]
    NotFound(String),

    /// HTTP error response other than 404.
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    /// Error envelope returned by the MediaWiki action API.
    #[error("API error: {code}: {info}")]
    Api { code: String, info: String },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Endpoint URL could not be built.
    #[error("invalid endpoint: {0}")]
    Endpoint(String),

    /// Response did not match the expected record.
    #[error("parse error: {0}")]
    Parse(String),
}

impl SourceError {
    /// Classification exposed to callers.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SourceError::NotFound(_) => ErrorKind::NotFound,
            SourceError::Parse(_) => ErrorKind::MalformedResponse,
            SourceError::HttpError { .. }
            | SourceError::Api { .. }
            | SourceError::Timeout
            | SourceError::Network(_)
            | SourceError::Endpoint(_) => ErrorKind::Unavailable,
        }
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { SourceError::Timeout } else { SourceError::Network(Arc::new(err)) }
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(err.to_string())
    }
}

//! Unified error types for wikifit.
//!
//! Lookup failures from upstream sources are not errors at this level: they
//! travel as [`SourceResult::Failure`](crate::SourceResult) values. This type
//! covers bad caller input and local faults.

use rmcp::model::{ErrorCode, ErrorData as McpError};

use crate::config::ConfigError;

/// Unified error types for wikifit.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty query).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Source name not in the registry.
    #[error("UNKNOWN_SOURCE: {0}")]
    UnknownSource(String),

    /// Configuration could not be loaded or is invalid.
    #[error("CONFIG_ERROR: {0}")]
    Config(#[from] ConfigError),

    /// Local fault (client construction, serialization).
    #[error("INTERNAL: {0}")]
    Internal(String),
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let (code, message) = match &err {
            Error::InvalidInput(msg) => (-32602, msg.clone()),
            Error::UnknownSource(name) => (-32602, format!("unknown source: {name}")),
            Error::Config(e) => (-32603, e.to_string()),
            Error::Internal(msg) => (-32603, msg.clone()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}

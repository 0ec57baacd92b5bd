//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use crate::model::Source;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `timeout_ms` is less than 100ms or exceeds 60 seconds
    /// - `user_agent` is empty
    /// - `language` is not a wiki language code
    /// - `max_concurrency` is outside 1..=9
    /// - either TTL is zero, or `failure_ttl_secs` exceeds `cache_ttl_secs`
    /// - an endpoint names an unknown source or is not an http(s) URL
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 60_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 60 seconds (60000ms)".into(),
            });
        }

        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if !is_language_code(&self.language) {
            return Err(ConfigError::Invalid {
                field: "language".into(),
                reason: format!("'{}' is not a wiki language code", self.language),
            });
        }

        if !(1..=Source::ALL.len()).contains(&self.max_concurrency) {
            return Err(ConfigError::Invalid {
                field: "max_concurrency".into(),
                reason: format!("must be between 1 and {}", Source::ALL.len()),
            });
        }

        if self.cache_ttl_secs == 0 {
            return Err(ConfigError::Invalid { field: "cache_ttl_secs".into(), reason: "must be greater than 0".into() });
        }
        if self.failure_ttl_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "failure_ttl_secs".into(),
                reason: "must be greater than 0".into(),
            });
        }
        if self.failure_ttl_secs > self.cache_ttl_secs {
            return Err(ConfigError::Invalid {
                field: "failure_ttl_secs".into(),
                reason: "must not exceed cache_ttl_secs".into(),
            });
        }

        for (source, base_url) in self.endpoint_overrides()? {
            match url::Url::parse(&base_url) {
                Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
                _ => {
                    return Err(ConfigError::Invalid {
                        field: format!("endpoints.{source}"),
                        reason: format!("'{base_url}' is not an http(s) URL"),
                    });
                }
            }
        }

        if !self.endpoints.is_empty() {
            tracing::warn!(
                overrides = self.endpoints.len(),
                "Endpoint overrides are set; some sources will not reach Wikimedia hosts"
            );
        }

        Ok(())
    }
}

/// Accepts codes such as `en`, `simple`, `zh-yue`, `be-tarask`.
fn is_language_code(code: &str) -> bool {
    let mut parts = code.split('-');
    let head_ok = parts
        .next()
        .is_some_and(|p| (2..=8).contains(&p.len()) && p.bytes().all(|b| b.is_ascii_lowercase()));

    head_ok && parts.all(|p| (2..=8).contains(&p.len()) && p.bytes().all(|b| b.is_ascii_lowercase()))
}

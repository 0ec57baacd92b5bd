//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (WIKIFIT_*)
//! 2. TOML config file (if WIKIFIT_CONFIG_FILE set)
//! 3. Built-in defaults

use std::collections::BTreeMap;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::model::Source;

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (WIKIFIT_*)
/// 2. TOML config file (if WIKIFIT_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// User-Agent string for upstream requests.
    ///
    /// Wikimedia rejects anonymous clients, so this must identify the app.
    /// Set via WIKIFIT_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in milliseconds.
    ///
    /// Set via WIKIFIT_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Wiki language edition for per-language projects (e.g. "en", "de").
    ///
    /// Set via WIKIFIT_LANGUAGE environment variable.
    #[serde(default = "default_language")]
    pub language: String,

    /// Maximum upstream requests in flight during a search across all sources.
    ///
    /// 1 runs sources one after another.
    /// Set via WIKIFIT_MAX_CONCURRENCY environment variable.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Lifetime of cached successful lookups, in seconds.
    ///
    /// Set via WIKIFIT_CACHE_TTL_SECS environment variable.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Lifetime of cached failed lookups, in seconds.
    ///
    /// Set via WIKIFIT_FAILURE_TTL_SECS environment variable.
    #[serde(default = "default_failure_ttl_secs")]
    pub failure_ttl_secs: u64,

    /// Base URL overrides keyed by source name (e.g. `commons`).
    ///
    /// Set via WIKIFIT_ENDPOINTS__<SOURCE> environment variables.
    #[serde(default)]
    pub endpoints: BTreeMap<String, String>,
}

fn default_user_agent() -> String {
    "wikifit/0.1 (https://github.com/wikifit/wikifit)".into()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_language() -> String {
    "en".into()
}

fn default_max_concurrency() -> usize {
    1
}

fn default_cache_ttl_secs() -> u64 {
    3600
}

fn default_failure_ttl_secs() -> u64 {
    300
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            language: default_language(),
            max_concurrency: default_max_concurrency(),
            cache_ttl_secs: default_cache_ttl_secs(),
            failure_ttl_secs: default_failure_ttl_secs(),
            endpoints: BTreeMap::new(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn failure_ttl(&self) -> Duration {
        Duration::from_secs(self.failure_ttl_secs)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `WIKIFIT_`
    /// 2. TOML file from `WIKIFIT_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("WIKIFIT_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("WIKIFIT_")
                .ignore(&["config_file"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Endpoint overrides resolved to their sources.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if a key does not name a registered source.
    pub fn endpoint_overrides(&self) -> Result<BTreeMap<Source, String>, ConfigError> {
        self.endpoints
            .iter()
            .map(|(name, url)| {
                let source = name.parse::<Source>().map_err(|_| ConfigError::Invalid {
                    field: format!("endpoints.{name}"),
                    reason: "unknown source".into(),
                })?;
                Ok((source, url.trim_end_matches('/').to_string()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.user_agent.starts_with("wikifit/"));
        assert_eq!(config.timeout_ms, 10_000);
        assert_eq!(config.language, "en");
        assert_eq!(config.max_concurrency, 1);
        assert_eq!(config.cache_ttl_secs, 3600);
        assert_eq!(config.failure_ttl_secs, 300);
        assert!(config.endpoints.is_empty());
    }

    #[test]
    fn test_durations() {
        let config = AppConfig::default();
        assert_eq!(config.timeout(), Duration::from_millis(10_000));
        assert_eq!(config.cache_ttl(), Duration::from_secs(3600));
        assert_eq!(config.failure_ttl(), Duration::from_secs(300));
    }

    #[test]
    fn test_endpoint_overrides() {
        let mut config = AppConfig::default();
        config.endpoints.insert("Commons".into(), "http://127.0.0.1:9000/".into());

        let overrides = config.endpoint_overrides().unwrap();
        assert_eq!(overrides.get(&Source::Commons).map(String::as_str), Some("http://127.0.0.1:9000"));
    }

    #[test]
    fn test_endpoint_overrides_unknown_source() {
        let mut config = AppConfig::default();
        config.endpoints.insert("wikinews".into(), "http://127.0.0.1:9000".into());

        let result = config.endpoint_overrides();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "endpoints.wikinews"));
    }

    #[test]
    fn test_load_layers_env_over_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "wikifit.toml",
                r#"
                timeout_ms = 5000
                max_concurrency = 2

                [endpoints]
                wikidata = "http://localhost:8080"
                "#,
            )?;
            jail.set_env("WIKIFIT_CONFIG_FILE", "wikifit.toml");
            jail.set_env("WIKIFIT_MAX_CONCURRENCY", "3");
            jail.set_env("WIKIFIT_LANGUAGE", "de");

            let config = AppConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.timeout_ms, 5000);
            assert_eq!(config.max_concurrency, 3);
            assert_eq!(config.language, "de");
            assert_eq!(config.endpoints.get("wikidata").map(String::as_str), Some("http://localhost:8080"));
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("WIKIFIT_MAX_CONCURRENCY", "0");
            assert!(matches!(AppConfig::load(), Err(ConfigError::Invalid { .. })));
            Ok(())
        });
    }
}

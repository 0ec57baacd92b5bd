//! Wikimedia HTTP client.
//!
//! One shared `reqwest` client used by every source adapter.
//!
//! ### Behavior
//!
//! - **Endpoints**: REST `page/summary` on Wikipedia, the action API
//!   (`/w/api.php`) everywhere else.
//! - **Identification**: every request carries the configured User-Agent, as
//!   required by the Wikimedia User-Agent policy.
//! - **Timeouts**: one bounded timeout per request; no retries.
//! - **Status mapping**: 404 is `NotFound`, other non-2xx statuses and
//!   transport failures are `Unavailable`, undecodable bodies are
//!   `MalformedResponse`.

pub mod error;
pub mod response;

pub use error::SourceError;

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use reqwest::{StatusCode, header};
use serde::de::DeserializeOwned;
use url::Url;
use wikifit_core::{AppConfig, ConfigError, Error, Source};

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "wikifit/0.1 (https://github.com/wikifit/wikifit)";

/// Path of the MediaWiki action API.
const ACTION_API_PATH: [&str; 2] = ["w", "api.php"];

/// Wikimedia client configuration.
#[derive(Debug, Clone)]
pub struct WikimediaConfig {
    /// User-agent string (default: wikifit/0.x).
    pub user_agent: String,
    /// Request timeout (default: 10s).
    pub timeout: Duration,
    /// Language edition for per-language projects (default: en).
    pub language: String,
    /// Base URL overrides per source.
    pub endpoints: BTreeMap<Source, String>,
}

impl Default for WikimediaConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            language: "en".to_string(),
            endpoints: BTreeMap::new(),
        }
    }
}

impl WikimediaConfig {
    /// Build from the application configuration.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            user_agent: config.user_agent.clone(),
            timeout: config.timeout(),
            language: config.language.clone(),
            endpoints: config.endpoint_overrides()?,
        })
    }

    /// Base URL for `source`: the override if set, else the public host.
    pub fn base_url(&self, source: Source) -> String {
        self.endpoints
            .get(&source)
            .cloned()
            .unwrap_or_else(|| source.default_base_url(&self.language))
    }
}

/// Shared Wikimedia API client.
#[derive(Debug, Clone)]
pub struct WikimediaClient {
    http: reqwest::Client,
    config: WikimediaConfig,
}

impl WikimediaClient {
    /// Create a new client with the given configuration.
    pub fn new(config: WikimediaConfig) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .use_rustls_tls()
            .gzip(true)
            .build()
            .map_err(|e| Error::Internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &WikimediaConfig {
        &self.config
    }

    pub fn language(&self) -> &str {
        &self.config.language
    }

    /// Base URL with `segments` appended as escaped path segments.
    pub fn endpoint(&self, source: Source, segments: &[&str]) -> Result<Url, SourceError> {
        let base = self.config.base_url(source);
        let mut url = Url::parse(&base).map_err(|e| SourceError::Endpoint(format!("{base}: {e}")))?;

        url.path_segments_mut()
            .map_err(|_| SourceError::Endpoint(format!("{base}: cannot be a base URL")))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    /// GET `url` with `params` and decode the JSON body as `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, url: Url, params: &[(&str, String)]) -> Result<T, SourceError> {
        let start = Instant::now();
        tracing::debug!(url = %url, "requesting");

        let response = self
            .http
            .get(url.clone())
            .header(header::ACCEPT, "application/json")
            .query(params)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(url = %url, status = status.as_u16(), elapsed_ms = start.elapsed().as_millis() as u64, "response");

        if status == StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound(format!("HTTP 404 for {}", url.path())));
        }

        if !status.is_success() {
            return Err(SourceError::HttpError { status: status.as_u16() });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Call the MediaWiki action API of `source`.
    ///
    /// Adds `format=json&formatversion=2` and turns an `error` envelope into
    /// [`SourceError::Api`].
    pub async fn action_api<T: DeserializeOwned>(
        &self, source: Source, params: &[(&str, String)],
    ) -> Result<T, SourceError> {
        let url = self.endpoint(source, &ACTION_API_PATH)?;

        let mut all_params: Vec<(&str, String)> =
            vec![("format", "json".to_string()), ("formatversion", "2".to_string())];
        all_params.extend(params.iter().cloned());

        let body: serde_json::Value = self.get_json(url, &all_params).await?;

        if let Some(error) = body.get("error") {
            let field = |name: &str| error.get(name).and_then(|v| v.as_str()).unwrap_or_default().to_string();
            return Err(SourceError::Api { code: field("code"), info: field("info") });
        }

        Ok(serde_json::from_value(body)?)
    }
}

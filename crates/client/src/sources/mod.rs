//! Source adapters.
//!
//! One adapter per registered [`Source`]. Each issues its upstream request(s)
//! through the shared [`WikimediaClient`], maps the typed response to a
//! [`Payload`], and never returns an error: failures become
//! [`SourceResult::Failure`] values.

pub mod commons;
pub mod extracts;
pub mod html;
pub mod summary;
pub mod wikidata;
pub mod wikisource;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use wikifit_core::{Error, ErrorKind, Payload, Query, Source, SourceResult};

use crate::wikimedia::{SourceError, WikimediaClient};

pub use commons::CommonsAdapter;
pub use extracts::ExtractAdapter;
pub use summary::WikipediaAdapter;
pub use wikidata::WikidataAdapter;
pub use wikisource::WikisourceAdapter;

/// Per-call tuning. Unset fields use the source's defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceOptions {
    /// Maximum number of items for list-shaped sources (Commons, Wikisource).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u8>,
    /// Sentence cap for extract-shaped sources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentences: Option<u8>,
}

impl SourceOptions {
    /// Check ranges accepted by the upstream APIs.
    pub fn validate(&self) -> Result<(), Error> {
        if let Some(limit) = self.limit
            && !(1..=50).contains(&limit)
        {
            return Err(Error::InvalidInput("limit must be 1-50".into()));
        }

        if let Some(sentences) = self.sentences
            && !(1..=10).contains(&sentences)
        {
            return Err(Error::InvalidInput("sentences must be 1-10".into()));
        }

        Ok(())
    }
}

/// Looks up one query in one source.
#[async_trait::async_trait]
pub trait SourceAdapter: Send + Sync {
    /// The source this adapter serves.
    fn source(&self) -> Source;

    /// Run the lookup. Always yields a result tagged with [`Self::source`].
    async fn fetch(&self, query: &Query, options: &SourceOptions) -> SourceResult;
}

/// Every adapter over `client`, in registration order.
pub fn default_adapters(client: &WikimediaClient) -> Vec<Arc<dyn SourceAdapter>> {
    Source::ALL
        .into_iter()
        .map(|source| -> Arc<dyn SourceAdapter> {
            match source {
                Source::Wikipedia => Arc::new(WikipediaAdapter::new(client.clone())),
                Source::Commons => Arc::new(CommonsAdapter::new(client.clone())),
                Source::Wikisource => Arc::new(WikisourceAdapter::new(client.clone())),
                Source::Wikidata => Arc::new(WikidataAdapter::new(client.clone())),
                Source::Wiktionary => Arc::new(ExtractAdapter::wiktionary(client.clone())),
                Source::Wikiquote => Arc::new(ExtractAdapter::wikiquote(client.clone())),
                Source::Wikibooks => Arc::new(ExtractAdapter::wikibooks(client.clone())),
                Source::Wikiversity => Arc::new(ExtractAdapter::wikiversity(client.clone())),
                Source::Wikispecies => Arc::new(ExtractAdapter::wikispecies(client.clone())),
            }
        })
        .collect()
}

/// Log the outcome of a lookup and turn it into a [`SourceResult`].
///
/// Levels follow [`ErrorKind::log_level`]: a missing term is routine and
/// stays at debug.
pub(crate) fn report(source: Source, query: &Query, outcome: Result<Payload, SourceError>) -> SourceResult {
    match outcome {
        Ok(payload) => {
            tracing::debug!(
                source = %source,
                query = %query,
                outcome = "success",
                payload = payload.kind(),
                "source lookup succeeded"
            );
            SourceResult::success(source, payload)
        }
        Err(err) => {
            let kind = err.kind();
            match kind {
                ErrorKind::NotFound => {
                    tracing::debug!(source = %source, query = %query, outcome = "failure", kind = %kind, error = %err, "term not found in source")
                }
                ErrorKind::MalformedResponse => {
                    tracing::warn!(source = %source, query = %query, outcome = "failure", kind = %kind, error = %err, "unexpected response shape")
                }
                ErrorKind::Unavailable => {
                    tracing::error!(source = %source, query = %query, outcome = "failure", kind = %kind, error = %err, "source unavailable")
                }
            }
            SourceResult::failure(source, kind, err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wikimedia::WikimediaConfig;
    use wikifit_core::Extract;

    #[test]
    fn test_default_adapters_registration_order() {
        let client = WikimediaClient::new(WikimediaConfig::default()).unwrap();
        let adapters = default_adapters(&client);

        let sources: Vec<Source> = adapters.iter().map(|a| a.source()).collect();
        assert_eq!(sources, Source::ALL.to_vec());
    }

    #[test]
    fn test_options_validate() {
        assert!(SourceOptions::default().validate().is_ok());
        assert!(SourceOptions { limit: Some(5), sentences: Some(10) }.validate().is_ok());
        assert!(SourceOptions { limit: Some(0), sentences: None }.validate().is_err());
        assert!(SourceOptions { limit: Some(51), sentences: None }.validate().is_err());
        assert!(SourceOptions { limit: None, sentences: Some(11) }.validate().is_err());
    }

    #[test]
    fn test_report_maps_outcomes() {
        let query = Query::new("yoga").unwrap();

        let ok = report(
            Source::Wikibooks,
            &query,
            Ok(Payload::Extract(Extract { title: "Yoga".into(), text: "Poses.".into() })),
        );
        assert!(ok.is_success());
        assert_eq!(ok.source(), Source::Wikibooks);

        let missing = report(Source::Wikibooks, &query, Err(SourceError::NotFound("no page".into())));
        assert_eq!(missing.kind(), Some(ErrorKind::NotFound));

        let down = report(Source::Wikibooks, &query, Err(SourceError::HttpError { status: 502 }));
        assert_eq!(down.kind(), Some(ErrorKind::Unavailable));
        assert!(matches!(down, SourceResult::Failure { message, .. } if message.contains("502")));
    }
}

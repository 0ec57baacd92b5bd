//! Per-source outcomes and the aggregate keyed by source.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::Level;

use super::{Payload, Source};

/// Why a source produced no payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The term does not exist in that source.
    NotFound,
    /// The upstream answered but not in the expected shape.
    MalformedResponse,
    /// Network failure, timeout, or non-404 error status.
    Unavailable,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::MalformedResponse => "malformed_response",
            ErrorKind::Unavailable => "unavailable",
        }
    }

    /// Level at which a failure of this kind is logged.
    pub fn log_level(&self) -> Level {
        match self {
            ErrorKind::NotFound => Level::DEBUG,
            ErrorKind::MalformedResponse => Level::WARN,
            ErrorKind::Unavailable => Level::ERROR,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one source lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceResult {
    Success { source: Source, payload: Payload, fetched_at: DateTime<Utc> },
    Failure { source: Source, kind: ErrorKind, message: String },
}

impl SourceResult {
    pub fn success(source: Source, payload: Payload) -> Self {
        SourceResult::Success { source, payload, fetched_at: Utc::now() }
    }

    pub fn failure(source: Source, kind: ErrorKind, message: impl Into<String>) -> Self {
        SourceResult::Failure { source, kind, message: message.into() }
    }

    pub fn source(&self) -> Source {
        match self {
            SourceResult::Success { source, .. } | SourceResult::Failure { source, .. } => *source,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SourceResult::Success { .. })
    }

    /// Failure kind, `None` on success.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            SourceResult::Success { .. } => None,
            SourceResult::Failure { kind, .. } => Some(*kind),
        }
    }

    pub fn payload(&self) -> Option<&Payload> {
        match self {
            SourceResult::Success { payload, .. } => Some(payload),
            SourceResult::Failure { .. } => None,
        }
    }
}

/// Outcomes of one query across every registered source.
///
/// Always holds exactly one entry per [`Source`], so callers never check
/// for missing keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AggregateResult {
    results: BTreeMap<Source, SourceResult>,
}

impl AggregateResult {
    /// Build an aggregate from whatever outcomes were produced.
    ///
    /// Sources without an outcome are filled with an `Unavailable` failure.
    /// A result is filed under its own source; duplicates keep the first.
    pub fn from_results(results: impl IntoIterator<Item = SourceResult>) -> Self {
        let mut map = BTreeMap::new();
        for result in results {
            map.entry(result.source()).or_insert(result);
        }

        for source in Source::ALL {
            map.entry(source)
                .or_insert_with(|| SourceResult::failure(source, ErrorKind::Unavailable, "no result produced"));
        }

        Self { results: map }
    }

    pub fn get(&self, source: Source) -> &SourceResult {
        // from_results fills every source, so indexing cannot miss
        &self.results[&source]
    }

    /// Entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&Source, &SourceResult)> {
        self.results.iter()
    }

    pub fn successes(&self) -> impl Iterator<Item = &SourceResult> {
        self.results.values().filter(|r| r.is_success())
    }

    pub fn failures(&self) -> impl Iterator<Item = &SourceResult> {
        self.results.values().filter(|r| !r.is_success())
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl<'de> Deserialize<'de> for AggregateResult {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = BTreeMap::<Source, SourceResult>::deserialize(deserializer)?;
        let filed = map
            .into_iter()
            .filter(|(key, result)| *key == result.source())
            .map(|(_, result)| result);
        Ok(AggregateResult::from_results(filed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Extract;

    fn extract(source: Source) -> SourceResult {
        SourceResult::success(source, Payload::Extract(Extract { title: "Yoga".into(), text: "text".into() }))
    }

    #[test]
    fn test_error_kind_levels() {
        assert_eq!(ErrorKind::NotFound.log_level(), Level::DEBUG);
        assert_eq!(ErrorKind::MalformedResponse.log_level(), Level::WARN);
        assert_eq!(ErrorKind::Unavailable.log_level(), Level::ERROR);
    }

    #[test]
    fn test_source_result_accessors() {
        let ok = extract(Source::Wikibooks);
        assert!(ok.is_success());
        assert_eq!(ok.source(), Source::Wikibooks);
        assert_eq!(ok.kind(), None);
        assert!(ok.payload().is_some());

        let failed = SourceResult::failure(Source::Commons, ErrorKind::NotFound, "no images");
        assert!(!failed.is_success());
        assert_eq!(failed.kind(), Some(ErrorKind::NotFound));
        assert!(failed.payload().is_none());
    }

    #[test]
    fn test_aggregate_fills_missing_sources() {
        let aggregate = AggregateResult::from_results(vec![extract(Source::Wikiquote)]);

        assert_eq!(aggregate.len(), Source::ALL.len());
        assert!(aggregate.get(Source::Wikiquote).is_success());
        assert_eq!(aggregate.get(Source::Wikidata).kind(), Some(ErrorKind::Unavailable));
        for (source, result) in aggregate.iter() {
            assert_eq!(*source, result.source());
        }
    }

    #[test]
    fn test_aggregate_keeps_first_duplicate() {
        let aggregate = AggregateResult::from_results(vec![
            extract(Source::Wikipedia),
            SourceResult::failure(Source::Wikipedia, ErrorKind::Unavailable, "late"),
        ]);

        assert!(aggregate.get(Source::Wikipedia).is_success());
    }

    #[test]
    fn test_aggregate_counts() {
        let results = Source::ALL.into_iter().map(|source| {
            if source == Source::Wikiquote {
                SourceResult::failure(source, ErrorKind::Unavailable, "timeout")
            } else {
                extract(source)
            }
        });
        let aggregate = AggregateResult::from_results(results);

        assert_eq!(aggregate.successes().count(), 8);
        assert_eq!(aggregate.failures().count(), 1);
    }

    #[test]
    fn test_aggregate_json_keyed_by_source() {
        let aggregate = AggregateResult::from_results(vec![extract(Source::Wiktionary)]);
        let json = serde_json::to_value(&aggregate).unwrap();

        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 9);
        assert_eq!(json["wiktionary"]["status"], "success");
        assert_eq!(json["commons"]["status"], "failure");
        assert_eq!(json["commons"]["kind"], "unavailable");

        let back: AggregateResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, aggregate);
    }

    #[test]
    fn test_aggregate_json_drops_misfiled_results() {
        let json = serde_json::json!({
            "wikipedia": {"status": "failure", "source": "commons", "kind": "not_found", "message": "misfiled"},
            "commons": {"status": "failure", "source": "commons", "kind": "not_found", "message": "no images"}
        });

        let aggregate: AggregateResult = serde_json::from_value(json).unwrap();

        assert_eq!(aggregate.len(), 9);
        assert_eq!(aggregate.get(Source::Wikipedia).kind(), Some(ErrorKind::Unavailable));
        assert!(matches!(
            aggregate.get(Source::Commons),
            SourceResult::Failure { message, .. } if message == "no images"
        ));
    }
}

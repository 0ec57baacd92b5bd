//! Fan-out of one query across every registered source.
//!
//! Partial failure is normal: each adapter's outcome is captured on its own
//! and the aggregate always carries one entry per source.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use wikifit_core::cache::compute_cache_key;
use wikifit_core::{AggregateResult, AppConfig, Error, Query, Source, SourceResult, TtlCache};

use crate::sources::{SourceAdapter, SourceOptions, default_adapters};
use crate::wikimedia::{WikimediaClient, WikimediaConfig};

/// Cache namespace for adapter calls.
const FETCH_CACHE_FN: &str = "source_fetch";

/// Fan-out and caching policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregatorPolicy {
    /// Maximum adapters running at once; 1 is strictly sequential.
    pub max_concurrency: usize,
    /// Lifetime of cached successes.
    pub success_ttl: Duration,
    /// Lifetime of cached failures.
    pub failure_ttl: Duration,
}

impl Default for AggregatorPolicy {
    fn default() -> Self {
        Self { max_concurrency: 1, success_ttl: Duration::from_secs(3600), failure_ttl: Duration::from_secs(300) }
    }
}

impl From<&AppConfig> for AggregatorPolicy {
    fn from(config: &AppConfig) -> Self {
        Self {
            max_concurrency: config.max_concurrency,
            success_ttl: config.cache_ttl(),
            failure_ttl: config.failure_ttl(),
        }
    }
}

impl AggregatorPolicy {
    fn ttl_for(&self, result: &SourceResult) -> Duration {
        if result.is_success() { self.success_ttl } else { self.failure_ttl }
    }
}

/// Runs queries against the registered adapters, memoizing each adapter call.
#[derive(Clone)]
pub struct Aggregator {
    adapters: Vec<Arc<dyn SourceAdapter>>,
    cache: TtlCache<SourceResult>,
    policy: AggregatorPolicy,
}

impl Aggregator {
    /// Create an aggregator over `adapters`, run in the given order.
    pub fn new(adapters: Vec<Arc<dyn SourceAdapter>>, cache: TtlCache<SourceResult>, policy: AggregatorPolicy) -> Self {
        Self { adapters, cache, policy }
    }

    /// Aggregator over every Wikimedia source, configured from `config`.
    pub fn from_config(config: &AppConfig) -> Result<Self, Error> {
        let client = WikimediaClient::new(WikimediaConfig::from_app_config(config)?)?;
        Ok(Self::new(default_adapters(&client), TtlCache::new(), AggregatorPolicy::from(config)))
    }

    /// Registered sources, in run order.
    pub fn sources(&self) -> impl Iterator<Item = Source> + '_ {
        self.adapters.iter().map(|adapter| adapter.source())
    }

    pub fn cache(&self) -> &TtlCache<SourceResult> {
        &self.cache
    }

    pub fn policy(&self) -> &AggregatorPolicy {
        &self.policy
    }

    /// Look up `query` in a single source.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownSource` if no adapter is registered for `source`.
    pub async fn lookup(&self, source: Source, query: &Query, options: &SourceOptions) -> Result<SourceResult, Error> {
        let adapter = self
            .adapters
            .iter()
            .find(|adapter| adapter.source() == source)
            .ok_or_else(|| Error::UnknownSource(source.to_string()))?;

        Ok(fetch_cached(adapter.as_ref(), &self.cache, self.policy, query, options).await)
    }

    /// Look up `query` in every registered source.
    pub async fn search_all(&self, query: &Query) -> AggregateResult {
        let start = Instant::now();
        let options = SourceOptions::default();

        let aggregate = AggregateResult::from_results(self.fan_out(query, options).await);

        tracing::info!(
            query = %query,
            succeeded = aggregate.successes().count(),
            failed = aggregate.failures().count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "search across sources completed"
        );

        aggregate
    }

    /// Bounded-concurrency run; completion order does not matter since the
    /// aggregate is keyed by source.
    ///
    /// Each adapter runs in its own task so a panic stays in that task. With a
    /// single permit the next task is spawned only after the previous one
    /// finishes, which keeps registration order.
    async fn fan_out(&self, query: &Query, options: SourceOptions) -> Vec<SourceResult> {
        let semaphore = Arc::new(Semaphore::new(self.policy.max_concurrency.max(1)));
        let mut join_set = JoinSet::new();

        for adapter in &self.adapters {
            let Ok(permit) = semaphore.clone().acquire_owned().await else {
                break;
            };
            let adapter = Arc::clone(adapter);
            let cache = self.cache.clone();
            let policy = self.policy;
            let query = query.clone();

            join_set.spawn(async move {
                // NOTE: Hold permit for task duration to enforce concurrency limit
                let _permit = permit;
                fetch_cached(adapter.as_ref(), &cache, policy, &query, &options).await
            });
        }

        let mut results = Vec::with_capacity(self.adapters.len());
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok(result) => results.push(result),
                Err(e) => tracing::error!(query = %query, "source task failed: {}", e),
            }
        }
        results
    }
}

/// Run `adapter` through the cache. Failures are cached for the shorter
/// failure TTL.
async fn fetch_cached(
    adapter: &dyn SourceAdapter, cache: &TtlCache<SourceResult>, policy: AggregatorPolicy, query: &Query,
    options: &SourceOptions,
) -> SourceResult {
    let source = adapter.source();

    let key = match compute_cache_key(FETCH_CACHE_FN, &(source, query.as_str(), options)) {
        Ok(key) => key,
        Err(e) => {
            tracing::warn!(source = %source, "cache key unavailable, fetching directly: {}", e);
            return adapter.fetch(query, options).await;
        }
    };

    cache
        .get_or_insert_with(key, |result| policy.ttl_for(result), || adapter.fetch(query, options))
        .await
}

//! Memoizing wrapper for async functions.

use std::future::Future;
use std::time::Duration;

use serde::Serialize;

use super::hash::compute_cache_key;
use super::ttl::TtlCache;

/// An async function memoized by its exact arguments for a fixed TTL.
///
/// Built with [`cached`] or [`Cached::with_cache`]. Entries are keyed by
/// the wrapper name plus the argument tuple; arguments are not normalized.
pub struct Cached<F, V> {
    name: &'static str,
    ttl: Duration,
    cache: TtlCache<V>,
    func: F,
}

/// Wrap `func` so repeated calls with equal arguments within `ttl` reuse
/// the first result.
pub fn cached<F, V>(name: &'static str, ttl: Duration, func: F) -> Cached<F, V> {
    Cached::with_cache(name, ttl, TtlCache::new(), func)
}

impl<F, V> Cached<F, V> {
    /// Wrap `func` on top of an existing, possibly shared, cache.
    pub fn with_cache(name: &'static str, ttl: Duration, cache: TtlCache<V>, func: F) -> Self {
        Self { name, ttl, cache, func }
    }

    pub fn cache(&self) -> &TtlCache<V> {
        &self.cache
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl<F, V: Clone> Cached<F, V> {
    /// Call the wrapped function, or return the cached result for `args`.
    pub async fn call<A, Fut>(&self, args: A) -> V
    where
        A: Serialize,
        F: Fn(A) -> Fut,
        Fut: Future<Output = V>,
    {
        let key = match compute_cache_key(self.name, &args) {
            Ok(key) => key,
            Err(e) => {
                tracing::warn!(function = self.name, "uncacheable arguments, calling through: {}", e);
                return (self.func)(args).await;
            }
        };

        let ttl = self.ttl;
        self.cache.get_or_insert_with(key, |_| ttl, || (self.func)(args)).await
    }
}

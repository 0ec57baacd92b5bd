//! In-memory TTL cache.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;

/// Cached value with its insertion time and lifetime.
struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
    ttl: Duration,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.inserted_at) > self.ttl
    }
}

/// Process-lifetime cache with per-entry TTL.
///
/// Clones share the same storage. Stale entries are skipped on read and
/// replaced on the next insert; there is no size bound.
pub struct TtlCache<V> {
    entries: Arc<RwLock<HashMap<String, CacheEntry<V>>>>,
}

impl<V> Clone for TtlCache<V> {
    fn clone(&self) -> Self {
        Self { entries: Arc::clone(&self.entries) }
    }
}

impl<V> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> TtlCache<V> {
    pub fn new() -> Self {
        Self { entries: Arc::new(RwLock::new(HashMap::new())) }
    }

    /// Number of stored entries, stale ones included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Drop stale entries, returning how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        before - entries.len()
    }
}

impl<V: Clone> TtlCache<V> {
    /// Fresh value for `key`, if any.
    pub async fn get(&self, key: &str) -> Option<V> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| !entry.is_expired(Instant::now()))
            .map(|entry| entry.value.clone())
    }

    /// Store `value` under `key`, replacing any previous entry.
    pub async fn insert(&self, key: String, value: V, ttl: Duration) {
        let mut entries = self.entries.write().await;
        entries.insert(key, CacheEntry { value, inserted_at: Instant::now(), ttl });
    }

    /// Return the fresh value for `key`, or compute, store and return it.
    ///
    /// `ttl_of` picks the lifetime from the computed value. The lock is not
    /// held while `compute` runs; concurrent misses on one key may each
    /// compute, and the last insert wins.
    pub async fn get_or_insert_with<F, Fut, T>(&self, key: String, ttl_of: T, compute: F) -> V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V>,
        T: FnOnce(&V) -> Duration,
    {
        if let Some(value) = self.get(&key).await {
            tracing::debug!(key = %key, "cache hit");
            return value;
        }

        let value = compute().await;
        let ttl = ttl_of(&value);
        self.insert(key, value.clone(), ttl).await;
        value
    }
}

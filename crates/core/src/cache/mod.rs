//! In-memory caching for lookup results.
//!
//! This module provides:
//!
//! - SHA-256 cache keys over a function name and its argument tuple
//! - A concurrency-safe TTL cache with per-entry lifetimes
//! - A memoizing wrapper for async functions

pub mod cached;
pub mod hash;
pub mod ttl;

pub use cached::{Cached, cached};
pub use hash::compute_cache_key;
pub use ttl::TtlCache;

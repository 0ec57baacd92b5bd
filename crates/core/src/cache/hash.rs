//! Cache key generation.

use serde::Serialize;
use sha2::{Digest, Sha256};

/// Compute the cache key for a call of `function` with `args`.
///
/// Arguments are keyed by their exact JSON encoding, so a tuple keeps its
/// order and strings keep their case.
pub fn compute_cache_key<A: Serialize + ?Sized>(function: &str, args: &A) -> Result<String, serde_json::Error> {
    let encoded = serde_json::to_vec(args)?;

    let mut hasher = Sha256::new();
    hasher.update(function.as_bytes());
    hasher.update(b"\n");
    hasher.update(&encoded);
    Ok(hex::encode(hasher.finalize()))
}

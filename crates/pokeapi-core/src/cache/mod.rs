//! Response caches that sit in front of the transport.
//!
//! Resource APIs only depend on [`CacheLike`], so a caller can substitute any
//! storage or eviction policy. [`LruCache`] is the in-memory default: bounded,
//! process-local and never persisted. One instance is created per resource kind
//! so bounds and recency order are independent.

mod lru;

pub use lru::LruCache;

/// Default capacity used by the client for each resource kind.
pub const DEFAULT_CACHE_CAPACITY: usize = 500;

/// Minimal get/set cache capability.
///
/// Implementations must be safe to share across tasks; the client calls them
/// from whatever runtime thread resumes the request.
pub trait CacheLike<V>: Send + Sync {
    fn get(&self, key: &str) -> Option<V>;
    fn set(&self, key: &str, value: V);
}

/// Cache key for a resource: `"<kind>:<id or name>"`.
pub fn cache_key(kind: &str, id_or_name: impl std::fmt::Display) -> String {
    format!("{kind}:{id_or_name}")
}

//! In-memory cache for search payloads.
//!
//! Keys are `"{tab}:{normalized query}:{start}"`; values expire after a fixed
//! TTL and are evicted on the next read past expiry.

pub mod key;
pub mod ttl;

pub use key::{normalize_query_for_cache, search_cache_key};
pub use ttl::{CacheEntry, TtlCache};

//! Cache key derivation for search requests.

use crate::tab::Tab;

/// Normalize a query for cache lookups.
///
/// Trims, collapses internal whitespace runs to a single space and
/// lowercases. Normalizing twice is a no-op.
pub fn normalize_query_for_cache(query: &str) -> String {
    query.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

/// Compute the cache (and in-flight) key for a search.
pub fn search_cache_key(tab: Tab, query: &str, start: u8) -> String {
    format!("{}:{}:{}", tab.as_str(), normalize_query_for_cache(query), start)
}

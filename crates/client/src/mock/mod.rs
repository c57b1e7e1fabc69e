//! Deterministic sample results for demo mode and degraded fallback.
//!
//! Row order depends only on the normalized query and the page, so the same
//! request always shows the same rows; only the item ids change.

mod samples;

use prospect_core::{SearchInformation, SearchPayload, SearchResultItem, SourceKind, Tab, normalize_query_for_cache};
use sha2::{Digest, Sha256};

use crate::provider::PAGE_SIZE;

/// Banner attached to results served because live search is switched off.
pub const DEMO_BANNER: &str = "Demo mode: showing sample results";

/// Banner attached to sample results served after a live search failed.
pub const DEGRADED_BANNER: &str = "Live search unavailable; showing sample results";

/// Seed derived from the normalized query.
fn query_seed(query: &str) -> u64 {
    let digest = Sha256::digest(normalize_query_for_cache(query).as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

/// Build a sample payload for `(tab, query, start)`.
pub fn mock_payload(tab: Tab, query: &str, start: u8) -> SearchPayload {
    let mut rows = samples::samples(tab);
    let page = u64::from(start.saturating_sub(1) / PAGE_SIZE);
    if !rows.is_empty() {
        let len = rows.len() as u64;
        let offset = (query_seed(query) % len + page) % len;
        rows.rotate_left(offset as usize);
    }

    let query = query.trim();
    let total = rows.len() as u64;
    let items = rows
        .into_iter()
        .take(usize::from(PAGE_SIZE))
        .enumerate()
        .map(|(idx, row)| SearchResultItem {
            id: uuid::Uuid::new_v4().to_string(),
            rank: usize::from(start) + idx,
            title: row.title.to_string(),
            url: row.url.to_string(),
            source_domain: row.domain.to_string(),
            snippet: format!("{} Sample result for \"{query}\".", row.snippet),
            details: row.details,
        })
        .collect();

    SearchPayload {
        items,
        source: SourceKind::Mock,
        search_information: Some(SearchInformation {
            total_results: total,
            search_time: 0.0,
            formatted_total_results: Some(total.to_string()),
        }),
        banner: None,
    }
}

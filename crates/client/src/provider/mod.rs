//! Live search provider abstraction.
//!
//! The orchestrator only sees this trait, so tests can swap in providers
//! that count calls, stall or fail.

pub mod error;

use async_trait::async_trait;
use prospect_core::{SearchPayload, Tab};

pub use error::ProviderError;

/// Results per page requested from providers.
pub const PAGE_SIZE: u8 = 10;

/// A validated request handed to a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderQuery {
    pub tab: Tab,
    /// The user's query as typed (trimmed).
    pub raw: String,
    /// The tab-refined query sent upstream.
    pub refined: String,
    /// 1-based result offset.
    pub start: u8,
}

impl ProviderQuery {
    pub fn new(tab: Tab, raw: &str, start: u8) -> Self {
        let raw = raw.trim().to_string();
        let refined = tab.refine(&raw);
        Self { tab, raw, refined, start }
    }
}

/// A source of live search results.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run one search and normalize the response.
    async fn search(&self, query: &ProviderQuery) -> Result<SearchPayload, ProviderError>;

    /// Provider name for logging.
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_query_refines_for_tab() {
        let query = ProviderQuery::new(Tab::Patents, "  solid state battery ", 11);
        assert_eq!(query.raw, "solid state battery");
        assert!(query.refined.starts_with("solid state battery "));
        assert!(query.refined.contains("site:patents.google.com"));
        assert_eq!(query.start, 11);
    }
}

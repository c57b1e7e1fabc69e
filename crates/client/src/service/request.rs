//! Incoming search requests and their validation.

use prospect_core::Tab;
use serde::Deserialize;

use super::SearchRejection;
use crate::provider::ProviderQuery;

/// Shortest accepted query, in characters, after trimming.
pub const MIN_QUERY_CHARS: usize = 2;

/// Longest accepted query, in characters, after trimming.
pub const MAX_QUERY_CHARS: usize = 200;

/// Highest 1-based offset the provider pages to.
pub const MAX_START: u32 = 91;

fn default_start() -> u32 {
    1
}

/// A search as submitted by a transport, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub tab: String,
    #[serde(default = "default_start")]
    pub start: u32,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, tab: impl Into<String>, start: u32) -> Self {
        Self { query: query.into(), tab: tab.into(), start }
    }

    /// Check the request and build the provider query.
    pub fn validate(&self) -> Result<ProviderQuery, SearchRejection> {
        let query = self.query.trim();
        let chars = query.chars().count();
        if chars < MIN_QUERY_CHARS {
            return Err(SearchRejection::InvalidInput(format!(
                "query must be at least {MIN_QUERY_CHARS} characters"
            )));
        }
        if chars > MAX_QUERY_CHARS {
            return Err(SearchRejection::InvalidInput(format!(
                "query must be at most {MAX_QUERY_CHARS} characters, got {chars}"
            )));
        }

        let tab: Tab = self.tab.parse().map_err(|e: prospect_core::UnknownTab| {
            SearchRejection::InvalidInput(e.to_string())
        })?;

        let start = u8::try_from(self.start)
            .ok()
            .filter(|s| (1..=MAX_START as u8).contains(s))
            .ok_or_else(|| SearchRejection::InvalidInput(format!("start must be 1-{MAX_START}, got {}", self.start)))?;

        Ok(ProviderQuery::new(tab, query, start))
    }
}

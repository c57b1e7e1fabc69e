//! cache_stats tool implementation.
//!
//! Reports cache occupancy, live calls in flight and the session budget.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use serde::{Deserialize, Serialize};

use crate::tools::{ToolContext, json_result};

/// Output from the cache_stats tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatsOutput {
    /// Entries held, including expired ones not yet evicted.
    pub entries: usize,
    pub in_flight: usize,
    /// google or mock.
    pub provider: String,
    pub cache_ttl_secs: i64,
    /// Clamped to the session limit.
    pub searches_used: u32,
    pub searches_remaining: u32,
    /// True once a live search was refused with "Preview ended".
    pub budget_exhausted: bool,
}

/// Implementation of the cache_stats tool.
pub async fn stats_impl(ctx: &ToolContext) -> Result<CallToolResult, McpError> {
    let budget = ctx.budget();
    json_result(&CacheStatsOutput {
        entries: ctx.service.cache_len(),
        in_flight: ctx.service.in_flight(),
        provider: ctx.service.provider_name().to_string(),
        cache_ttl_secs: ctx.service.settings().cache_ttl.num_seconds(),
        searches_used: budget.used.min(budget.limit),
        searches_remaining: budget.remaining(),
        budget_exhausted: budget.is_exhausted(),
    })
}

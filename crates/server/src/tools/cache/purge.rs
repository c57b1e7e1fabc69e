//! cache_purge tool implementation.
//!
//! Drops expired search cache entries, or all of them.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::tools::{ToolContext, json_result};

/// Parameters for the cache_purge tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct CachePurgeParams {
    /// Remove every entry, not only expired ones.
    #[serde(default)]
    pub all: bool,
}

/// Output from the cache_purge tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachePurgeOutput {
    /// Number of entries deleted.
    pub deleted: usize,
    /// Entries left afterwards.
    pub remaining: usize,
}

/// Implementation of the cache_purge tool.
pub async fn purge_impl(ctx: &ToolContext, params: CachePurgeParams) -> Result<CallToolResult, McpError> {
    let deleted = ctx.service.purge_cache(params.all);
    tracing::info!(deleted, all = params.all, "search cache purged");
    json_result(&CachePurgeOutput { deleted, remaining: ctx.service.cache_len() })
}

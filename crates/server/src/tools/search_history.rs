//! search_history tool implementation.
//!
//! Lists recent searches made in MCP sessions, newest first.

use prospect_core::BlobKind;
use prospect_core::store::{HistoryEntry, SearchHistory};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{MCP_OWNER, ToolContext, json_result};

/// Parameters for the search_history tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct SearchHistoryParams {
    /// Return at most this many entries (default: all stored).
    #[serde(default)]
    pub limit: Option<usize>,

    /// Only entries for this tab.
    #[serde(default)]
    pub tab: Option<prospect_core::Tab>,
}

/// Output from the search_history tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHistoryOutput {
    pub entries: Vec<HistoryEntry>,
}

/// Implementation of the search_history tool.
pub async fn history_impl(ctx: &ToolContext, params: SearchHistoryParams) -> Result<CallToolResult, McpError> {
    let history: SearchHistory = ctx.db.load_blob_or_default(MCP_OWNER, BlobKind::SearchHistory).await?;

    let entries = history
        .entries
        .into_iter()
        .filter(|e| params.tab.is_none_or(|tab| e.tab == tab))
        .take(params.limit.unwrap_or(usize::MAX))
        .collect();

    json_result(&SearchHistoryOutput { entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::market_search::{MarketSearchParams, search_impl};
    use crate::tools::test_support::{context, output};
    use prospect_core::Tab;

    #[tokio::test]
    async fn test_empty_history() {
        let ctx = context().await;
        let out = output(&history_impl(&ctx, SearchHistoryParams::default()).await.unwrap());
        assert_eq!(out["entries"].as_array().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn test_filter_and_limit() {
        let ctx = context().await;
        for (query, tab) in [("acme", Tab::Companies), ("grippers", Tab::Patents), ("acme funding", Tab::Signals)] {
            search_impl(&ctx, MarketSearchParams { query: query.into(), tab, start: 1 }).await.unwrap();
        }

        let out = output(&history_impl(&ctx, SearchHistoryParams { limit: Some(2), tab: None }).await.unwrap());
        let entries = out["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["query"], "acme funding");

        let params = SearchHistoryParams { limit: None, tab: Some(Tab::Patents) };
        let out = output(&history_impl(&ctx, params).await.unwrap());
        assert_eq!(out["entries"][0]["query"], "grippers");
        assert_eq!(out["entries"].as_array().map(Vec::len), Some(1));
    }
}

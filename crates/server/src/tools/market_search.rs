//! market_search tool implementation.
//!
//! Runs a categorized search through the shared search service and records
//! it in the session's history.

use chrono::Utc;
use prospect_client::{Provenance, SearchRequest};
use prospect_core::store::HistoryEntry;
use prospect_core::{Error, SearchResultItem, SourceKind, Tab};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{MCP_OWNER, ToolContext, json_result};

/// Input parameters for market_search tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MarketSearchParams {
    /// Search query, 2-200 characters.
    pub query: String,

    /// Result category.
    pub tab: Tab,

    /// 1-based result offset (1-91, default 1). Pages are 10 results.
    #[serde(default = "default_start")]
    pub start: u32,
}

fn default_start() -> u32 {
    1
}

/// Output structure for market_search tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSearchOutput {
    pub items: Vec<SearchResultItem>,
    pub source: SourceKind,
    /// live, cached, demo or degraded.
    pub provenance: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    pub searches_remaining: u32,
}

fn provenance_label(provenance: &Provenance) -> &'static str {
    match provenance {
        Provenance::Live => "live",
        Provenance::Cached => "cached",
        Provenance::Demo => "demo",
        Provenance::Degraded { .. } => "degraded",
    }
}

/// Implementation of the market_search tool.
pub async fn search_impl(ctx: &ToolContext, params: MarketSearchParams) -> Result<CallToolResult, McpError> {
    let request = SearchRequest::new(params.query, params.tab.as_str(), params.start);
    let caller = ctx.caller();
    let outcome = ctx.service.search(&request, &caller).await.map_err(Error::from)?;

    let entry = HistoryEntry {
        query: request.query.trim().to_string(),
        tab: params.tab,
        result_count: outcome.payload.len(),
        searched_at: Utc::now(),
    };
    if let Err(e) = ctx.db.record_search(MCP_OWNER, entry, ctx.config.history_limit).await {
        tracing::warn!(error = %e, "failed to record search history");
    }

    json_result(&MarketSearchOutput {
        provenance: provenance_label(&outcome.provenance).to_string(),
        items: outcome.payload.items,
        source: outcome.payload.source,
        banner: outcome.payload.banner,
        searches_remaining: caller.budget().remaining(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{context, live_context, output};
    use async_trait::async_trait;
    use prospect_client::{ProviderError, ProviderQuery, SearchProvider, mock_payload};
    use prospect_core::store::SearchHistory;
    use prospect_core::{BlobKind, SearchPayload};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Answers after a short delay, counting calls.
    #[derive(Default)]
    struct SlowProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SearchProvider for SlowProvider {
        async fn search(&self, query: &ProviderQuery) -> Result<SearchPayload, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(50)).await;
            let mut payload = mock_payload(query.tab, &query.raw, query.start);
            payload.source = SourceKind::Google;
            Ok(payload)
        }

        fn name(&self) -> &'static str {
            "slow"
        }
    }

    fn params(query: &str) -> MarketSearchParams {
        MarketSearchParams { query: query.into(), tab: Tab::News, start: 1 }
    }

    #[tokio::test]
    async fn test_search_records_history() {
        let ctx = context().await;

        let result = search_impl(&ctx, params("battery storage")).await.unwrap();
        let out = output(&result);
        assert_eq!(out["provenance"], "demo");
        assert_eq!(out["source"], "mock");
        assert!(out["items"].as_array().is_some_and(|items| !items.is_empty()));

        let history: SearchHistory = ctx.db.load_blob_or_default(MCP_OWNER, BlobKind::SearchHistory).await.unwrap();
        assert_eq!(history.entries.len(), 1);
        assert_eq!(history.entries[0].query, "battery storage");
    }

    #[tokio::test]
    async fn test_second_search_is_cached() {
        let ctx = context().await;
        search_impl(&ctx, params("battery storage")).await.unwrap();

        let out = output(&search_impl(&ctx, params("Battery  Storage")).await.unwrap());
        assert_eq!(out["provenance"], "cached");
    }

    #[tokio::test]
    async fn test_invalid_query() {
        let ctx = context().await;
        let err = search_impl(&ctx, params(" ")).await.unwrap_err();
        assert_eq!(err.code.0, -32602);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_searches_respect_session_budget() {
        let provider = Arc::new(SlowProvider::default());
        let ctx = live_context(provider.clone()).await;

        let calls = (0..8).map(|i| search_impl(&ctx, params(&format!("grid storage {i}"))));
        let results = futures::future::join_all(calls).await;

        let admitted = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(admitted, 3);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 3);
        assert_eq!(ctx.budget().used, 4);
        assert_eq!(ctx.budget().remaining(), 0);

        let err = search_impl(&ctx, params("one more")).await.unwrap_err();
        assert!(err.message.contains("Preview ended"));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_params_default_start() {
        let params: MarketSearchParams =
            serde_json::from_value(serde_json::json!({"query": "acme", "tab": "research-papers"})).unwrap();
        assert_eq!(params.start, 1);
        assert_eq!(params.tab, Tab::ResearchPapers);
    }
}

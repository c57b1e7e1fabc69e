//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use std::sync::Arc;

use crate::tools::{
    CachePurgeParams, MarketSearchParams, SearchHistoryParams, ToolContext, history_impl, purge_impl, search_impl,
    stats_impl,
};

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

/// The main MCP server handler for prospect.
#[derive(Clone)]
pub struct ProspectServer {
    tool_router: ToolRouter<Self>,
    ctx: Arc<ToolContext>,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl ProspectServer {
    /// Create a new server handler.
    pub fn new(ctx: ToolContext) -> Self {
        Self { tool_router: Self::tool_router(), ctx: Arc::new(ctx) }
    }

    /// Search one result category.
    ///
    /// Cached results are free. Live searches count against the session's
    /// budget; once it is used up the tool fails with "Preview ended".
    #[tool(
        description = "Search companies, people, news, signals, market, patents or research-papers. Returns result rows with category-specific details."
    )]
    async fn market_search(&self, params: Parameters<MarketSearchParams>) -> Result<CallToolResult, McpError> {
        search_impl(&self.ctx, params.0).await
    }

    #[tool(description = "List recent searches from this server's sessions, newest first.")]
    async fn search_history(&self, params: Parameters<SearchHistoryParams>) -> Result<CallToolResult, McpError> {
        history_impl(&self.ctx, params.0).await
    }

    #[tool(description = "Report search cache size, live searches in flight and the remaining session budget.")]
    async fn cache_stats(&self) -> Result<CallToolResult, McpError> {
        stats_impl(&self.ctx).await
    }

    #[tool(description = "Drop expired search cache entries, or every entry with all=true.")]
    async fn cache_purge(&self, params: Parameters<CachePurgeParams>) -> Result<CallToolResult, McpError> {
        purge_impl(&self.ctx, params.0).await
    }
}

impl ServerHandler for ProspectServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "prospect".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}

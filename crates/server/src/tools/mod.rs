//! MCP tool implementations.
//!
//! This module contains all tools exposed by the prospect MCP server. The
//! whole MCP connection counts as one session: it has a single state owner
//! and a single search budget.

pub mod cache;
pub mod market_search;
pub mod search_history;

use std::sync::{Arc, Mutex, PoisonError};

use prospect_client::{Caller, SearchService};
use prospect_core::{AppConfig, Error, SessionBudget, StateDb};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Serialize;

pub use cache::{CachePurgeParams, purge_impl, stats_impl};
pub use market_search::{MarketSearchParams, search_impl};
pub use search_history::{SearchHistoryParams, history_impl};

/// State owner used for MCP sessions.
pub const MCP_OWNER: &str = "mcp";

/// Rate-limit key used for MCP sessions.
pub const MCP_CLIENT_ID: &str = "mcp-stdio";

/// Shared handles for tool calls.
pub struct ToolContext {
    pub service: Arc<SearchService>,
    pub db: StateDb,
    pub config: Arc<AppConfig>,
    budget: Arc<Mutex<SessionBudget>>,
}

impl ToolContext {
    pub fn new(service: Arc<SearchService>, db: StateDb, config: Arc<AppConfig>) -> Self {
        let budget = SessionBudget::new(0, service.settings().budget_limit);
        Self { service, db, config, budget: Arc::new(Mutex::new(budget)) }
    }

    pub fn budget(&self) -> SessionBudget {
        *self.budget.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The session's caller. Every search charges the same budget counter.
    pub fn caller(&self) -> Caller {
        Caller::shared(MCP_CLIENT_ID, Arc::clone(&self.budget))
    }
}

/// Serialize `output` as the tool's text content.
pub fn json_result<T: Serialize>(output: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(output).map_err(Error::from)?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

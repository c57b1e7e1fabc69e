//! Core types and shared functionality for prospect.
//!
//! This crate provides:
//! - Search result types and result categories
//! - In-memory TTL cache and cache keys
//! - Rate limiting and session budgets
//! - SQLite-backed UI state store
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod item;
pub mod limits;
pub mod store;
pub mod tab;

pub use cache::{TtlCache, normalize_query_for_cache, search_cache_key};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{AppConfig, ConfigError, SearchMode, Transport, resolve_search_mode};
pub use error::Error;
pub use item::{ItemDetails, SearchInformation, SearchPayload, SearchResultItem, SignalType, SourceKind};
pub use limits::{BudgetIncrement, RateLimitDecision, RateLimitPolicy, RateLimiter, SessionBudget};
pub use store::{BlobKind, StateDb};
pub use tab::{Tab, UnknownTab, build_tab_query};

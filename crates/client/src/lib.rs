//! Search client code for prospect.
//!
//! This crate provides the live search provider (Google Custom Search), the
//! deterministic sample generator used for demo mode and fallbacks, and the
//! search orchestrator shared by every transport.

pub mod google;
pub mod mock;
pub mod provider;
pub mod service;

pub use google::{GoogleClient, GoogleConfig};
pub use mock::{DEGRADED_BANNER, DEMO_BANNER, mock_payload};
pub use provider::{PAGE_SIZE, ProviderError, ProviderQuery, SearchProvider};
pub use service::{Caller, Provenance, SearchOutcome, SearchRejection, SearchRequest, SearchService, ServiceSettings};

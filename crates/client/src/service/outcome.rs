//! Results of a search, accepted or refused.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use prospect_core::limits::budget::PREVIEW_ENDED_BANNER;
use prospect_core::{BudgetIncrement, Error, RateLimitDecision, SearchPayload, SessionBudget};

/// Where a served payload came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provenance {
    /// Fresh from the live provider.
    Live,
    /// Served from the TTL cache.
    Cached,
    /// Sample data because live search is disabled.
    Demo,
    /// Sample data because the live call failed or timed out.
    Degraded { reason: String },
}

impl Provenance {
    pub fn is_cached(&self) -> bool {
        matches!(self, Provenance::Cached)
    }
}

/// A successful search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub payload: SearchPayload,
    pub provenance: Provenance,
}

/// Why a search was refused.
///
/// `Clone` so every caller coalesced onto one live call can receive it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchRejection {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("rate limit exceeded; window resets at {}", .0.reset_at)]
    RateLimited(RateLimitDecision),

    #[error("session search budget exhausted")]
    BudgetExceeded(BudgetIncrement),

    #[error("upstream search failed: {0}")]
    Upstream(String),
}

impl SearchRejection {
    pub fn status_code(&self) -> u16 {
        match self {
            SearchRejection::InvalidInput(_) => 400,
            SearchRejection::RateLimited(_) | SearchRejection::BudgetExceeded(_) => 429,
            SearchRejection::Upstream(_) => 502,
        }
    }

    /// Banner to show alongside the error, if any.
    pub fn banner(&self) -> Option<&'static str> {
        match self {
            SearchRejection::BudgetExceeded(_) => Some(PREVIEW_ENDED_BANNER),
            _ => None,
        }
    }
}

impl From<SearchRejection> for Error {
    fn from(rejection: SearchRejection) -> Self {
        let message = rejection.to_string();
        match rejection {
            SearchRejection::InvalidInput(msg) => Error::InvalidInput(msg),
            SearchRejection::RateLimited(_) => Error::RateLimited(message),
            SearchRejection::BudgetExceeded(_) => Error::BudgetExceeded(format!("{PREVIEW_ENDED_BANNER}: {message}")),
            SearchRejection::Upstream(msg) => Error::Upstream(msg),
        }
    }
}

/// The party a search is charged to.
///
/// The budget is a shared counter. Every search started for one session
/// charges it under the service's admission lock, so overlapping searches
/// never read a stale count.
#[derive(Debug, Clone)]
pub struct Caller {
    /// Opaque rate-limit key.
    pub client_id: String,
    budget: Arc<Mutex<SessionBudget>>,
}

impl Caller {
    /// A caller with a budget of its own, as restored for one HTTP request.
    pub fn new(client_id: impl Into<String>, budget: SessionBudget) -> Self {
        Self::shared(client_id, Arc::new(Mutex::new(budget)))
    }

    /// A caller charging a counter held by the session.
    pub fn shared(client_id: impl Into<String>, budget: Arc<Mutex<SessionBudget>>) -> Self {
        Self { client_id: client_id.into(), budget }
    }

    /// Current state of the budget.
    pub fn budget(&self) -> SessionBudget {
        *self.lock_budget()
    }

    /// Count one live search.
    pub(crate) fn charge(&self) -> BudgetIncrement {
        self.lock_budget().increment()
    }

    fn lock_budget(&self) -> MutexGuard<'_, SessionBudget> {
        self.budget.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

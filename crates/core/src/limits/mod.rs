//! Request admission: per-client rate limits and per-session budgets.

pub mod budget;
pub mod rate;

pub use budget::{
    BudgetIncrement, PREVIEW_ENDED_BANNER, SessionBudget, increment_session_budget, parse_session_budget,
};
pub use rate::{RateLimitDecision, RateLimitPolicy, RateLimiter};

//! Per-session live search budget.
//!
//! The counter itself is transport-agnostic: HTTP carries it in a cookie,
//! the MCP server keeps it in the handler. It is never decremented; only the
//! transport's expiry resets it.

use serde::Serialize;

/// Banner shown once a session has used up its live searches.
pub const PREVIEW_ENDED_BANNER: &str = "Preview ended";

/// Parse a stored counter. Anything that is not a non-negative integer is 0.
pub fn parse_session_budget(raw: Option<&str>) -> u32 {
    raw.and_then(|value| value.trim().parse::<u32>().ok()).unwrap_or(0)
}

/// Outcome of counting one more live search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetIncrement {
    pub count: u32,
    pub remaining: u32,
    /// True once `count > limit`. Using the last allowed search is not
    /// exceeding the budget; the one after it is.
    pub exceeded: bool,
}

/// Count one more search against `limit`.
///
/// The stored count saturates at `limit + 1`.
pub fn increment_session_budget(current: u32, limit: u32) -> BudgetIncrement {
    let count = current.saturating_add(1).min(limit.saturating_add(1));
    BudgetIncrement { count, remaining: limit.saturating_sub(count), exceeded: count > limit }
}

/// A session's budget counter and its limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionBudget {
    pub used: u32,
    pub limit: u32,
}

impl SessionBudget {
    pub fn new(used: u32, limit: u32) -> Self {
        Self { used, limit }
    }

    /// Restore a budget from a stored counter value.
    pub fn from_stored(raw: Option<&str>, limit: u32) -> Self {
        Self::new(parse_session_budget(raw), limit)
    }

    /// Record one more search and report where that leaves the session.
    pub fn increment(&mut self) -> BudgetIncrement {
        let step = increment_session_budget(self.used, self.limit);
        self.used = step.count;
        step
    }

    pub fn remaining(&self) -> u32 {
        self.limit.saturating_sub(self.used)
    }

    pub fn is_exhausted(&self) -> bool {
        self.used > self.limit
    }

    /// Value to write back to the transport.
    pub fn to_stored(&self) -> String {
        self.used.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_malformed_is_zero() {
        assert_eq!(parse_session_budget(None), 0);
        assert_eq!(parse_session_budget(Some("")), 0);
        assert_eq!(parse_session_budget(Some("abc")), 0);
        assert_eq!(parse_session_budget(Some("-3")), 0);
        assert_eq!(parse_session_budget(Some("1.5")), 0);
    }

    #[test]
    fn test_parse_valid() {
        assert_eq!(parse_session_budget(Some("2")), 2);
        assert_eq!(parse_session_budget(Some(" 7 ")), 7);
    }

    #[test]
    fn test_increment_sequence_limit_two() {
        let first = increment_session_budget(0, 2);
        let second = increment_session_budget(first.count, 2);
        let third = increment_session_budget(second.count, 2);

        assert_eq!((first.exceeded, second.exceeded, third.exceeded), (false, false, true));
        assert_eq!((first.remaining, second.remaining, third.remaining), (1, 0, 0));
    }

    #[test]
    fn test_increment_saturates() {
        let step = increment_session_budget(50, 2);
        assert_eq!(step.count, 3);
        assert!(step.exceeded);

        let step = increment_session_budget(u32::MAX, u32::MAX);
        assert_eq!(step.count, u32::MAX);
        assert!(!step.exceeded);
    }

    #[test]
    fn test_session_budget_round_trip() {
        let mut budget = SessionBudget::from_stored(Some("1"), 2);
        assert_eq!(budget.remaining(), 1);

        assert!(!budget.increment().exceeded);
        assert!(!budget.is_exhausted());
        assert!(budget.increment().exceeded);
        assert!(budget.is_exhausted());
        assert_eq!(budget.to_stored(), "3");
    }
}

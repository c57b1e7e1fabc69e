//! Fixed-window rate limiting keyed by client.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::clock::{Clock, SystemClock};

/// Limit and window for one named limiter.
#[derive(Debug, Clone)]
pub struct RateLimitPolicy {
    /// Limiter name, prefixed to the client key.
    pub name: String,
    pub limit: u32,
    pub window: Duration,
}

/// Result of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub remaining: u32,
    pub reset_at: DateTime<Utc>,
    pub limit: u32,
}

#[derive(Debug, Clone, Copy)]
struct RateLimitEntry {
    count: u32,
    reset_at: DateTime<Utc>,
}

/// Process-local fixed-window counters.
///
/// Bursts straddling a window boundary are admitted. Entries are only
/// replaced when their window is read after it has ended.
#[derive(Debug)]
pub struct RateLimiter {
    entries: Mutex<HashMap<String, RateLimitEntry>>,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self { entries: Mutex::new(HashMap::new()), clock }
    }

    /// Count a request for `key` against `policy`.
    ///
    /// A request is admitted only while the window count is strictly below
    /// the limit; refused requests do not increment the counter.
    pub fn check_rate_limit(&self, key: &str, policy: &RateLimitPolicy) -> RateLimitDecision {
        let now = self.clock.now();
        let full_key = format!("{}:{}", policy.name, key);
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        let fresh_window = RateLimitEntry { count: 0, reset_at: now + policy.window };
        let entry = entries.entry(full_key).or_insert(fresh_window);
        if now > entry.reset_at {
            *entry = fresh_window;
        }

        // A new window always admits its first request.
        if entry.count == 0 {
            entry.count = 1;
            return RateLimitDecision {
                allowed: true,
                remaining: policy.limit.saturating_sub(1),
                reset_at: entry.reset_at,
                limit: policy.limit,
            };
        }

        if entry.count >= policy.limit {
            return RateLimitDecision { allowed: false, remaining: 0, reset_at: entry.reset_at, limit: policy.limit };
        }

        entry.count += 1;
        RateLimitDecision {
            allowed: true,
            remaining: policy.limit.saturating_sub(entry.count),
            reset_at: entry.reset_at,
            limit: policy.limit,
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn policy(limit: u32, window_ms: i64) -> RateLimitPolicy {
        RateLimitPolicy { name: "search".into(), limit, window: Duration::milliseconds(window_ms) }
    }

    #[test]
    fn test_limit_then_deny_then_reset() {
        let clock = ManualClock::default();
        let limiter = RateLimiter::with_clock(Arc::new(clock.clone()));
        let policy = policy(2, 1000);

        let first = limiter.check_rate_limit("client", &policy);
        assert!(first.allowed);
        assert_eq!(first.remaining, 1);

        let second = limiter.check_rate_limit("client", &policy);
        assert!(second.allowed);
        assert_eq!(second.remaining, 0);

        let third = limiter.check_rate_limit("client", &policy);
        assert!(!third.allowed);
        assert_eq!(third.reset_at, first.reset_at);
        assert_eq!(third.limit, 2);

        clock.advance(Duration::milliseconds(1001));
        let after = limiter.check_rate_limit("client", &policy);
        assert!(after.allowed);
        assert_eq!(after.remaining, 1);
        assert!(after.reset_at > first.reset_at);
    }

    #[test]
    fn test_denied_requests_do_not_extend_count() {
        let clock = ManualClock::default();
        let limiter = RateLimiter::with_clock(Arc::new(clock.clone()));
        let policy = policy(1, 1000);

        assert!(limiter.check_rate_limit("c", &policy).allowed);
        for _ in 0..5 {
            assert!(!limiter.check_rate_limit("c", &policy).allowed);
        }
        clock.advance(Duration::milliseconds(1001));
        assert!(limiter.check_rate_limit("c", &policy).allowed);
    }

    #[test]
    fn test_keys_are_independent() {
        let limiter = RateLimiter::with_clock(Arc::new(ManualClock::default()));
        let policy = policy(1, 1000);

        assert!(limiter.check_rate_limit("a", &policy).allowed);
        assert!(!limiter.check_rate_limit("a", &policy).allowed);
        assert!(limiter.check_rate_limit("b", &policy).allowed);
    }

    #[test]
    fn test_limiter_name_scopes_key() {
        let limiter = RateLimiter::with_clock(Arc::new(ManualClock::default()));
        let search = policy(1, 1000);
        let other = RateLimitPolicy { name: "export".into(), ..policy(1, 1000) };

        assert!(limiter.check_rate_limit("a", &search).allowed);
        assert!(limiter.check_rate_limit("a", &other).allowed);
    }

    #[test]
    fn test_zero_limit_denies_after_first_window_start() {
        let limiter = RateLimiter::with_clock(Arc::new(ManualClock::default()));
        let policy = policy(0, 1000);

        let first = limiter.check_rate_limit("a", &policy);
        assert!(first.allowed);
        assert_eq!(first.remaining, 0);
        assert!(!limiter.check_rate_limit("a", &policy).allowed);
    }
}

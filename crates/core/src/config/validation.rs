//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use std::net::SocketAddr;

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

/// Longest accepted search cache lifetime: one week.
pub const MAX_CACHE_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Longest accepted rate limit window: one day.
pub const MAX_RATE_LIMIT_WINDOW_MS: u64 = 24 * 60 * 60 * 1000;

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid { field: field.into(), reason: reason.into() }
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `provider_timeout_ms` is below 100ms or above 5 minutes
    /// - `rate_limit_max`, `rate_limit_window_ms` or `history_limit` is 0
    /// - `cache_ttl_secs` is above one week or `rate_limit_window_ms` above one day
    /// - `session_budget_limit` is 0
    /// - `user_agent` is empty
    /// - `bind_addr` is not a socket address
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider_timeout_ms < 100 {
            return Err(invalid("provider_timeout_ms", "must be at least 100ms"));
        }
        if self.provider_timeout_ms > 300_000 {
            return Err(invalid("provider_timeout_ms", "must not exceed 5 minutes (300000ms)"));
        }

        if self.rate_limit_max == 0 {
            return Err(invalid("rate_limit_max", "must be greater than 0"));
        }
        if self.rate_limit_window_ms == 0 {
            return Err(invalid("rate_limit_window_ms", "must be greater than 0"));
        }
        if self.rate_limit_window_ms > MAX_RATE_LIMIT_WINDOW_MS {
            return Err(invalid("rate_limit_window_ms", "must not exceed one day (86400000ms)"));
        }

        if self.cache_ttl_secs > MAX_CACHE_TTL_SECS {
            return Err(invalid("cache_ttl_secs", "must not exceed one week (604800s)"));
        }

        if self.session_budget_limit == 0 {
            return Err(invalid("session_budget_limit", "must be greater than 0"));
        }

        if self.history_limit == 0 {
            return Err(invalid("history_limit", "must be greater than 0"));
        }

        if self.user_agent.is_empty() {
            return Err(invalid("user_agent", "must not be empty"));
        }

        if self.bind_addr.parse::<SocketAddr>().is_err() {
            return Err(invalid("bind_addr", "must be a socket address such as 127.0.0.1:3030"));
        }

        if self.google_api_key.is_some() != self.google_cse_id.is_some() {
            tracing::warn!(
                has_api_key = self.google_api_key.is_some(),
                has_cse_id = self.google_cse_id.is_some(),
                "Only one of google_api_key and google_cse_id is set; \
                 searches will use demo data"
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_timeout_too_small() {
        let config = AppConfig { provider_timeout_ms: 50, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "provider_timeout_ms"));
    }

    #[test]
    fn test_validate_timeout_exceeds_limit() {
        let config = AppConfig { provider_timeout_ms: 301_000, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "provider_timeout_ms"));
    }

    #[test]
    fn test_validate_zero_rate_limit() {
        let config = AppConfig { rate_limit_max: 0, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "rate_limit_max"));

        let config = AppConfig { rate_limit_window_ms: 0, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "rate_limit_window_ms"));
    }

    #[test]
    fn test_validate_durations_bounded() {
        let config = AppConfig { cache_ttl_secs: u64::MAX, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "cache_ttl_secs"));

        let config = AppConfig { rate_limit_window_ms: u64::MAX, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "rate_limit_window_ms"));

        let config = AppConfig { cache_ttl_secs: MAX_CACHE_TTL_SECS, ..Default::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_durations_never_go_negative() {
        let config = AppConfig { cache_ttl_secs: u64::MAX, rate_limit_window_ms: u64::MAX, ..Default::default() };
        assert_eq!(config.cache_ttl(), chrono::Duration::days(7));
        assert_eq!(config.rate_limit_window(), chrono::Duration::days(1));
    }

    #[test]
    fn test_validate_zero_budget() {
        let config = AppConfig { session_budget_limit: 0, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "session_budget_limit"));
    }

    #[test]
    fn test_validate_empty_user_agent() {
        let config = AppConfig { user_agent: String::new(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "user_agent"));
    }

    #[test]
    fn test_validate_bad_bind_addr() {
        let config = AppConfig { bind_addr: "localhost".into(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "bind_addr"));
    }

    #[test]
    fn test_validate_edge_case_values() {
        let config = AppConfig { provider_timeout_ms: 100, rate_limit_max: 1, ..Default::default() };
        assert!(config.validate().is_ok());

        let config = AppConfig { provider_timeout_ms: 300_000, ..Default::default() };
        assert!(config.validate().is_ok());
    }
}

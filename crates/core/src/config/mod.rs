//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (PROSPECT_*)
//! 2. TOML config file (if PROSPECT_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::{ConfigError, MAX_CACHE_TTL_SECS, MAX_RATE_LIMIT_WINDOW_MS};

/// Which provider backs live searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    Google,
    Mock,
}

/// Resolve the search mode from an optional override.
///
/// Without an override (or with one that is not recognized) searches go to
/// Google; only an explicit `mock` selects demo data.
pub fn resolve_search_mode(override_value: Option<&str>) -> SearchMode {
    match override_value.map(|v| v.trim().to_ascii_lowercase()) {
        Some(v) if v == "mock" => SearchMode::Mock,
        _ => SearchMode::Google,
    }
}

/// Transport the server binary listens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// JSON API over HTTP.
    Http,
    /// MCP over stdin/stdout.
    Stdio,
}

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (PROSPECT_*)
/// 2. TOML config file (if PROSPECT_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Google Custom Search API key.
    ///
    /// Set via PROSPECT_GOOGLE_API_KEY. Without it searches run on demo data.
    #[serde(default)]
    pub google_api_key: Option<String>,

    /// Google Programmable Search Engine id (`cx`).
    ///
    /// Set via PROSPECT_GOOGLE_CSE_ID.
    #[serde(default)]
    pub google_cse_id: Option<String>,

    /// Search mode override; `mock` forces demo data.
    ///
    /// Set via PROSPECT_SEARCH_MODE.
    #[serde(default)]
    pub search_mode: Option<String>,

    /// Set via PROSPECT_TRANSPORT (`http` or `stdio`).
    #[serde(default = "default_transport")]
    pub transport: Transport,

    /// Listen address for the HTTP transport.
    ///
    /// Set via PROSPECT_BIND_ADDR.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Path to the SQLite state database.
    ///
    /// Set via PROSPECT_DB_PATH.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// User-Agent string for provider requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Live provider call timeout in milliseconds.
    ///
    /// Set via PROSPECT_PROVIDER_TIMEOUT_MS.
    #[serde(default = "default_provider_timeout_ms")]
    pub provider_timeout_ms: u64,

    /// How long search payloads stay cached, in seconds.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Searches admitted per client per window.
    #[serde(default = "default_rate_limit_max")]
    pub rate_limit_max: u32,

    /// Rate limit window in milliseconds.
    #[serde(default = "default_rate_limit_window_ms")]
    pub rate_limit_window_ms: u64,

    /// Live searches a session may run before the paywall.
    #[serde(default = "default_session_budget_limit")]
    pub session_budget_limit: u32,

    /// Lifetime of the budget cookie in seconds.
    #[serde(default = "default_session_budget_ttl_secs")]
    pub session_budget_ttl_secs: u64,

    /// Maximum entries kept in a user's search history.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Serve demo data when the live provider fails.
    ///
    /// When disabled, provider failures surface as upstream errors.
    #[serde(default = "default_true")]
    pub mock_fallback: bool,
}

fn default_transport() -> Transport {
    Transport::Http
}

fn default_bind_addr() -> String {
    "127.0.0.1:3030".into()
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./prospect-state.sqlite")
}

fn default_user_agent() -> String {
    "prospect/0.1".into()
}

fn default_provider_timeout_ms() -> u64 {
    8_000
}

fn default_cache_ttl_secs() -> u64 {
    600
}

fn default_rate_limit_max() -> u32 {
    30
}

fn default_rate_limit_window_ms() -> u64 {
    60_000
}

fn default_session_budget_limit() -> u32 {
    3
}

fn default_session_budget_ttl_secs() -> u64 {
    86_400
}

fn default_history_limit() -> usize {
    50
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            google_api_key: None,
            google_cse_id: None,
            search_mode: None,
            transport: default_transport(),
            bind_addr: default_bind_addr(),
            db_path: default_db_path(),
            user_agent: default_user_agent(),
            provider_timeout_ms: default_provider_timeout_ms(),
            cache_ttl_secs: default_cache_ttl_secs(),
            rate_limit_max: default_rate_limit_max(),
            rate_limit_window_ms: default_rate_limit_window_ms(),
            session_budget_limit: default_session_budget_limit(),
            session_budget_ttl_secs: default_session_budget_ttl_secs(),
            history_limit: default_history_limit(),
            mock_fallback: true,
        }
    }
}

impl AppConfig {
    /// Provider timeout as Duration for use with reqwest/tokio.
    pub fn provider_timeout(&self) -> Duration {
        Duration::from_millis(self.provider_timeout_ms)
    }

    /// Cache entry lifetime, clamped to [`MAX_CACHE_TTL_SECS`].
    pub fn cache_ttl(&self) -> chrono::Duration {
        let secs = i64::try_from(self.cache_ttl_secs.min(MAX_CACHE_TTL_SECS)).unwrap_or(0);
        chrono::Duration::try_seconds(secs).unwrap_or_else(chrono::Duration::zero)
    }

    /// Rate limit window, clamped to [`MAX_RATE_LIMIT_WINDOW_MS`].
    pub fn rate_limit_window(&self) -> chrono::Duration {
        let millis = i64::try_from(self.rate_limit_window_ms.min(MAX_RATE_LIMIT_WINDOW_MS)).unwrap_or(0);
        chrono::Duration::try_milliseconds(millis).unwrap_or_else(chrono::Duration::zero)
    }

    /// Effective search mode from the override.
    pub fn search_mode(&self) -> SearchMode {
        resolve_search_mode(self.search_mode.as_deref())
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `PROSPECT_`
    /// 2. TOML file from `PROSPECT_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("PROSPECT_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("PROSPECT_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Google credentials, if both halves are configured.
    pub fn google_credentials(&self) -> Option<(&str, &str)> {
        let key = self.google_api_key.as_deref().filter(|k| !k.is_empty())?;
        let cx = self.google_cse_id.as_deref().filter(|c| !c.is_empty())?;
        Some((key, cx))
    }

    /// Require Google credentials (for deferred validation).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` naming the first absent field.
    pub fn require_google_credentials(&self) -> Result<(&str, &str), ConfigError> {
        if self.google_api_key.as_deref().is_none_or(str::is_empty) {
            return Err(ConfigError::Missing {
                field: "google_api_key".into(),
                hint: "Set PROSPECT_GOOGLE_API_KEY environment variable".into(),
            });
        }
        self.google_credentials().ok_or_else(|| ConfigError::Missing {
            field: "google_cse_id".into(),
            hint: "Set PROSPECT_GOOGLE_CSE_ID environment variable".into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.db_path, PathBuf::from("./prospect-state.sqlite"));
        assert_eq!(config.user_agent, "prospect/0.1");
        assert_eq!(config.provider_timeout_ms, 8_000);
        assert_eq!(config.session_budget_limit, 3);
        assert_eq!(config.transport, Transport::Http);
        assert!(config.mock_fallback);
        assert!(config.google_api_key.is_none());
    }

    #[test]
    fn test_provider_timeout_duration() {
        let config = AppConfig::default();
        assert_eq!(config.provider_timeout(), Duration::from_millis(8_000));
    }

    #[test]
    fn test_resolve_search_mode() {
        assert_eq!(resolve_search_mode(None), SearchMode::Google);
        assert_eq!(resolve_search_mode(Some("")), SearchMode::Google);
        assert_eq!(resolve_search_mode(Some("google")), SearchMode::Google);
        assert_eq!(resolve_search_mode(Some("mock")), SearchMode::Mock);
        assert_eq!(resolve_search_mode(Some(" MOCK ")), SearchMode::Mock);
    }

    #[test]
    fn test_require_google_credentials() {
        let config = AppConfig::default();
        assert!(matches!(
            config.require_google_credentials(),
            Err(ConfigError::Missing { field, .. }) if field == "google_api_key"
        ));

        let config = AppConfig { google_api_key: Some("key".into()), ..Default::default() };
        assert!(matches!(
            config.require_google_credentials(),
            Err(ConfigError::Missing { field, .. }) if field == "google_cse_id"
        ));

        let config =
            AppConfig { google_api_key: Some("key".into()), google_cse_id: Some("cx".into()), ..Default::default() };
        assert_eq!(config.require_google_credentials().unwrap(), ("key", "cx"));
    }

    #[test]
    fn test_load_from_env() {
        Jail::expect_with(|jail| {
            jail.set_env("PROSPECT_SEARCH_MODE", "mock");
            jail.set_env("PROSPECT_SESSION_BUDGET_LIMIT", "5");
            jail.set_env("PROSPECT_TRANSPORT", "stdio");

            let config = AppConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.search_mode(), SearchMode::Mock);
            assert_eq!(config.session_budget_limit, 5);
            assert_eq!(config.transport, Transport::Stdio);
            Ok(())
        });
    }

    #[test]
    fn test_load_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("prospect.toml", "rate_limit_max = 10\ncache_ttl_secs = 60\n")?;
            jail.set_env("PROSPECT_CONFIG_FILE", "prospect.toml");
            jail.set_env("PROSPECT_RATE_LIMIT_MAX", "20");

            let config = AppConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.rate_limit_max, 20);
            assert_eq!(config.cache_ttl_secs, 60);
            Ok(())
        });
    }

    #[test]
    fn test_load_without_overrides_is_google() {
        Jail::expect_with(|_jail| {
            let config = AppConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.search_mode(), SearchMode::Google);
            Ok(())
        });
    }
}

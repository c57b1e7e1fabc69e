//! Google Custom Search JSON API client.
//!
//! ### API contract
//!
//! - **Endpoint**: `https://www.googleapis.com/customsearch/v1`
//! - **Authentication**: `key` query parameter plus the engine id `cx`.
//! - **Paging**: `start` is 1-based, 10 results per page, at most 100 results.
//! - **Errors**: 401/403 are credential problems, 429 is quota exhaustion.
//! - **Normalization**: results become [`SearchPayload`] rows with
//!   category-specific details for the requested tab.

pub mod details;
pub mod request;
pub mod response;

pub use request::CseRequest;
pub use response::CseApiResponse;

use async_trait::async_trait;
use prospect_core::{AppConfig, SearchPayload};
use reqwest::header;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::provider::{PAGE_SIZE, ProviderError, ProviderQuery, SearchProvider};

/// Default base URL for the Custom Search API.
const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "prospect/0.1";

/// Google client configuration.
#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub api_key: String,
    /// Programmable Search Engine id.
    pub engine_id: String,
    /// Base URL (default: https://www.googleapis.com/customsearch/v1).
    pub base_url: String,
    /// Request timeout (default: 8s).
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            engine_id: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl GoogleConfig {
    /// Build from application config. Returns None without credentials.
    pub fn from_app_config(config: &AppConfig) -> Option<Self> {
        let (api_key, engine_id) = config.google_credentials()?;
        Some(Self {
            api_key: api_key.to_string(),
            engine_id: engine_id.to_string(),
            timeout: config.provider_timeout(),
            user_agent: config.user_agent.clone(),
            ..Default::default()
        })
    }
}

/// Google Custom Search client.
#[derive(Debug, Clone)]
pub struct GoogleClient {
    http: reqwest::Client,
    config: Arc<GoogleConfig>,
}

impl GoogleClient {
    /// Create a new client with the given configuration.
    pub fn new(config: GoogleConfig) -> Result<Self, ProviderError> {
        if config.api_key.is_empty() {
            return Err(ProviderError::MissingCredentials("google_api_key"));
        }
        if config.engine_id.is_empty() {
            return Err(ProviderError::MissingCredentials("google_cse_id"));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .use_rustls_tls()
            .gzip(true)
            .build()
            .map_err(|e| ProviderError::Network(Arc::new(e)))?;

        Ok(Self { http, config: Arc::new(config) })
    }

    /// Execute one Custom Search request.
    pub async fn search_raw(&self, req: &CseRequest) -> Result<CseApiResponse, ProviderError> {
        req.validate()?;

        let start = Instant::now();
        tracing::debug!(query = %req.q, start = req.get_start(), "searching Google CSE");

        let http_response = self
            .http
            .get(&self.config.base_url)
            .header("Accept", "application/json")
            .header(header::USER_AGENT, &self.config.user_agent)
            .query(&[("key", self.config.api_key.as_str())])
            .query(req)
            .send()
            .await?;

        let status = http_response.status();
        tracing::debug!(%status, elapsed = ?start.elapsed(), "Google CSE response");

        if status == 401 || status == 403 {
            return Err(ProviderError::AuthError);
        }

        if status == 429 {
            return Err(ProviderError::RateLimited);
        }

        if status.is_client_error() || status.is_server_error() {
            return Err(ProviderError::HttpError { status: status.as_u16() });
        }

        let bytes = http_response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ProviderError::Parse(e.to_string()))
    }

    fn request_for(&self, query: &ProviderQuery) -> CseRequest {
        CseRequest {
            q: query.refined.clone(),
            cx: self.config.engine_id.clone(),
            start: Some(query.start),
            num: Some(PAGE_SIZE),
            safe: Some("active".to_string()),
            date_restrict: matches!(query.tab, prospect_core::Tab::News | prospect_core::Tab::Signals)
                .then(|| "m6".to_string()),
        }
    }
}

#[async_trait]
impl SearchProvider for GoogleClient {
    async fn search(&self, query: &ProviderQuery) -> Result<SearchPayload, ProviderError> {
        let raw = self.search_raw(&self.request_for(query)).await?;
        let payload = raw.into_payload(query.tab, query.start);
        tracing::debug!(tab = %query.tab, results = payload.len(), "normalized Google results");
        Ok(payload)
    }

    fn name(&self) -> &'static str {
        "google"
    }
}

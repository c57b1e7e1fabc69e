//! Search orchestration.
//!
//! [`SearchService`] owns the shared state of the search path: result cache,
//! rate limiter and the registry of live calls in flight. A search goes
//! through these steps:
//!
//! 1. validate the request
//! 2. serve a cache hit without charging the caller
//! 3. in demo mode, serve (and cache) sample data
//! 4. join an identical live call if one is running
//! 5. otherwise admit the caller (rate limit, then session budget) and start
//!    a live call bounded by the provider timeout
//!
//! A failed or timed out live call falls back to sample data with a banner.
//! That fallback is never cached, so the next request tries live again.

pub mod inflight;
pub mod outcome;
pub mod request;

pub use outcome::{Caller, Provenance, SearchOutcome, SearchRejection};
pub use request::SearchRequest;

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::channel::oneshot;
use prospect_core::{
    AppConfig, Clock, RateLimitPolicy, RateLimiter, SearchMode, SearchPayload, SystemClock, TtlCache, search_cache_key,
};

use crate::google::{GoogleClient, GoogleConfig};
use crate::mock::{DEGRADED_BANNER, DEMO_BANNER, mock_payload};
use crate::provider::{ProviderError, ProviderQuery, SearchProvider};
use inflight::{InFlight, Joined, SearchResult, SettleGuard};

/// Tunables for the search path.
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub cache_ttl: chrono::Duration,
    pub provider_timeout: Duration,
    pub rate_policy: RateLimitPolicy,
    pub budget_limit: u32,
    /// Serve sample data when a live call fails instead of an error.
    pub mock_fallback: bool,
}

impl ServiceSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            cache_ttl: config.cache_ttl(),
            provider_timeout: config.provider_timeout(),
            rate_policy: RateLimitPolicy {
                name: "search".to_string(),
                limit: config.rate_limit_max,
                window: config.rate_limit_window(),
            },
            budget_limit: config.session_budget_limit,
            mock_fallback: config.mock_fallback,
        }
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

/// Shared search state, constructed once and handed to every transport.
pub struct SearchService {
    /// `None` in demo mode.
    provider: Option<Arc<dyn SearchProvider>>,
    cache: Arc<TtlCache<SearchPayload>>,
    limiter: RateLimiter,
    inflight: Arc<InFlight>,
    settings: ServiceSettings,
}

impl SearchService {
    /// Build the service from configuration.
    ///
    /// Uses Google when the mode allows it and both credentials are set;
    /// otherwise the service runs in demo mode.
    pub fn new(config: &AppConfig) -> Result<Self, ProviderError> {
        let provider: Option<Arc<dyn SearchProvider>> = match config.search_mode() {
            SearchMode::Mock => {
                tracing::info!("search mode override is mock, serving demo results");
                None
            }
            SearchMode::Google => match GoogleConfig::from_app_config(config) {
                Some(google) => Some(Arc::new(GoogleClient::new(google)?)),
                None => {
                    if let Err(e) = config.require_google_credentials() {
                        tracing::warn!(error = %e, "serving demo results");
                    }
                    None
                }
            },
        };

        Ok(Self::with_provider(ServiceSettings::from_config(config), provider, Arc::new(SystemClock)))
    }

    /// Build the service around an explicit provider and clock.
    pub fn with_provider(
        settings: ServiceSettings, provider: Option<Arc<dyn SearchProvider>>, clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            provider,
            cache: Arc::new(TtlCache::with_clock(Arc::clone(&clock))),
            limiter: RateLimiter::with_clock(clock),
            inflight: Arc::new(InFlight::new()),
            settings,
        }
    }

    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    /// True when no live provider is configured.
    pub fn is_demo(&self) -> bool {
        self.provider.is_none()
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.as_ref().map_or("mock", |p| p.name())
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Drop expired cache entries, or every entry when `all` is set.
    ///
    /// Returns how many entries were removed.
    pub fn purge_cache(&self, all: bool) -> usize {
        if all {
            let removed = self.cache.len();
            self.cache.clear();
            removed
        } else {
            self.cache.purge_expired()
        }
    }

    pub fn in_flight(&self) -> usize {
        self.inflight.len()
    }

    /// Run one search on behalf of `caller`.
    ///
    /// The caller's budget is charged inside the admission step, so
    /// overlapping searches for one session see each other's charges. The
    /// transport is responsible for persisting it.
    pub async fn search(&self, request: &SearchRequest, caller: &Caller) -> SearchResult {
        let query = request.validate()?;
        let key = search_cache_key(query.tab, &query.raw, query.start);

        if let Some(payload) = self.cache.get(&key) {
            tracing::debug!(%key, "search cache hit");
            return Ok(SearchOutcome { payload, provenance: Provenance::Cached });
        }

        let Some(provider) = &self.provider else {
            let payload = mock_payload(query.tab, &query.raw, query.start).with_banner(DEMO_BANNER);
            self.cache.set(key, payload.clone(), self.settings.cache_ttl);
            return Ok(SearchOutcome { payload, provenance: Provenance::Demo });
        };

        let joined = self.inflight.join_or_start(&key, || {
            let decision = self.limiter.check_rate_limit(&caller.client_id, &self.settings.rate_policy);
            if !decision.allowed {
                tracing::warn!(client = %caller.client_id, reset_at = %decision.reset_at, "search rate limited");
                return Err(SearchRejection::RateLimited(decision));
            }

            let step = caller.charge();
            if step.exceeded {
                tracing::warn!(client = %caller.client_id, used = step.count, "session budget exhausted");
                return Err(SearchRejection::BudgetExceeded(step));
            }
            Ok(())
        })?;

        let shared = match joined {
            Joined::Leader { shared, sender } => {
                self.spawn_live(Arc::clone(provider), query, key, sender);
                shared
            }
            Joined::Follower(shared) => {
                tracing::debug!(%key, "joined in-flight search");
                shared
            }
        };
        shared.await
    }

    /// Run the live call on its own task so that dropping callers never
    /// cancels it. The registry entry is gone before the result is delivered.
    fn spawn_live(
        &self, provider: Arc<dyn SearchProvider>, query: ProviderQuery, key: String,
        sender: oneshot::Sender<SearchResult>,
    ) {
        let settle = SettleGuard::new(Arc::clone(&self.inflight), key.clone());
        let cache = Arc::clone(&self.cache);
        let settings = self.settings.clone();

        tokio::spawn(async move {
            let result = run_live(provider.as_ref(), &query, &key, &cache, &settings).await;
            drop(settle);
            // every caller may have gone away already
            let _ = sender.send(result);
        });
    }
}

async fn run_live(
    provider: &dyn SearchProvider, query: &ProviderQuery, key: &str, cache: &TtlCache<SearchPayload>,
    settings: &ServiceSettings,
) -> SearchResult {
    let started = Instant::now();
    tracing::info!(provider = provider.name(), tab = %query.tab, start = query.start, "live search");

    let reason = match tokio::time::timeout(settings.provider_timeout, provider.search(query)).await {
        Ok(Ok(payload)) => {
            tracing::info!(results = payload.len(), elapsed = ?started.elapsed(), "live search complete");
            cache.set(key, payload.clone(), settings.cache_ttl);
            return Ok(SearchOutcome { payload, provenance: Provenance::Live });
        }
        Ok(Err(err)) => err.to_string(),
        Err(_) => format!("provider timed out after {}ms", settings.provider_timeout.as_millis()),
    };

    if !settings.mock_fallback {
        tracing::warn!(%reason, "live search failed");
        return Err(SearchRejection::Upstream(reason));
    }

    tracing::warn!(%reason, "live search failed, serving sample results");
    let payload = mock_payload(query.tab, &query.raw, query.start).with_banner(DEGRADED_BANNER);
    Ok(SearchOutcome { payload, provenance: Provenance::Degraded { reason } })
}

//! JSON API over HTTP.
//!
//! Routes:
//! - `POST /api/search`
//! - `GET|DELETE /api/history`
//! - `GET /api/usage`
//! - `GET|PUT /api/state/verifications`
//! - `GET|PUT /api/state/columns`
//! - `GET /health`

pub mod search;
pub mod session;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use prospect_client::SearchService;
use prospect_core::{AppConfig, StateDb};
use serde::Serialize;
use tower_http::trace::TraceLayer;

/// Shared handles for every request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub service: Arc<SearchService>,
    pub db: StateDb,
}

impl AppState {
    pub fn new(config: AppConfig, service: Arc<SearchService>, db: StateDb) -> Self {
        Self { config: Arc::new(config), service, db }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/search", post(search::search))
        .route("/api/history", get(state::get_history).delete(state::clear_history))
        .route("/api/usage", get(state::get_usage))
        .route("/api/state/verifications", get(state::get_verifications).put(state::put_verifications))
        .route("/api/state/columns", get(state::get_columns).put(state::put_columns))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Health {
    status: &'static str,
    version: &'static str,
    provider: &'static str,
    cache_entries: usize,
    in_flight: usize,
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(Health {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        provider: state.service.provider_name(),
        cache_entries: state.service.cache_len(),
        in_flight: state.service.in_flight(),
    })
}

/// Serve the API until ctrl-c.
pub async fn serve(state: AppState) -> anyhow::Result<()> {
    let addr: SocketAddr = state.config.bind_addr.parse()?;
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "HTTP API listening");

    axum::serve(listener, router.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("ctrl-c received; shutting down");
        })
        .await?;

    Ok(())
}

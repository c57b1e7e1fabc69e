//! `POST /api/search`.

use std::net::SocketAddr;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{ConnectInfo, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use prospect_client::{Caller, SearchOutcome, SearchRequest};
use prospect_core::SearchPayload;
use prospect_core::store::HistoryEntry;
use serde::Serialize;

use super::AppState;
use super::session;
use crate::error::ApiError;

/// Successful search response.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub ok: bool,
    #[serde(flatten)]
    pub payload: SearchPayload,
    pub cached: bool,
}

pub async fn search(
    State(state): State<AppState>, peer: Option<ConnectInfo<SocketAddr>>, headers: HeaderMap, jar: CookieJar,
    body: Result<Json<SearchRequest>, JsonRejection>,
) -> Response {
    let (owner, jar) = session::owner(jar);
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => return (jar, ApiError::from(rejection)).into_response(),
    };
    let budget = session::budget_from(&jar, state.service.settings().budget_limit);
    let client_id = session::client_id(&headers, peer.map(|ConnectInfo(addr)| addr));
    let caller = Caller::new(client_id, budget);

    let result = state.service.search(&request, &caller).await;
    let after = caller.budget();
    let charged = after != budget;
    let jar = jar.add(session::budget_cookie(&after, state.config.session_budget_ttl_secs));

    match result {
        Ok(outcome) => {
            record(&state, &owner, &request, &outcome, charged).await;
            let cached = outcome.provenance.is_cached();
            (jar, Json(SearchResponse { ok: true, payload: outcome.payload, cached })).into_response()
        }
        Err(rejection) => (jar, ApiError::from(rejection)).into_response(),
    }
}

/// Update the owner's history, and weekly usage when the search was charged.
///
/// A state store failure is logged and does not fail the search.
async fn record(state: &AppState, owner: &str, request: &SearchRequest, outcome: &SearchOutcome, charged: bool) {
    let Ok(tab) = request.tab.parse() else { return };
    let now = Utc::now();
    let entry =
        HistoryEntry { query: request.query.trim().to_string(), tab, result_count: outcome.payload.len(), searched_at: now };

    if let Err(e) = state.db.record_search(owner, entry, state.config.history_limit).await {
        tracing::warn!(error = %e, "failed to record search history");
    }

    if charged && let Err(e) = state.db.bump_weekly_usage(owner, now).await {
        tracing::warn!(error = %e, "failed to update weekly usage");
    }
}

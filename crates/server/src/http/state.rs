//! UI state routes: history, usage, verifications and custom columns.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use chrono::{NaiveDate, Utc};
use prospect_core::{BlobKind, SessionBudget};
use prospect_core::store::{ColumnDef, HistoryEntry, SearchHistory, Verifications, WeeklyUsage, validate_columns};
use serde::Serialize;

use super::AppState;
use super::session;
use crate::error::ApiError;

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub ok: bool,
    pub entries: Vec<HistoryEntry>,
}

#[derive(Debug, Serialize)]
pub struct ClearedResponse {
    pub ok: bool,
    pub cleared: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetView {
    /// Searches used, clamped to `limit`.
    pub used: u32,
    pub limit: u32,
    pub remaining: u32,
    /// True once a search was refused for being over budget, as opposed to
    /// having just used the last one.
    pub exhausted: bool,
}

impl From<SessionBudget> for BudgetView {
    fn from(budget: SessionBudget) -> Self {
        Self {
            used: budget.used.min(budget.limit),
            limit: budget.limit,
            remaining: budget.remaining(),
            exhausted: budget.is_exhausted(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageResponse {
    pub ok: bool,
    pub week_start: NaiveDate,
    pub count: u32,
    pub budget: BudgetView,
}

#[derive(Debug, Serialize)]
pub struct VerificationsResponse {
    pub ok: bool,
    pub verifications: Verifications,
}

#[derive(Debug, Serialize)]
pub struct ColumnsResponse {
    pub ok: bool,
    pub columns: Vec<ColumnDef>,
}

pub async fn get_history(State(state): State<AppState>, jar: CookieJar) -> Result<Response, ApiError> {
    let (owner, jar) = session::owner(jar);
    let history: SearchHistory = state.db.load_blob_or_default(&owner, BlobKind::SearchHistory).await?;
    Ok((jar, Json(HistoryResponse { ok: true, entries: history.entries })).into_response())
}

pub async fn clear_history(State(state): State<AppState>, jar: CookieJar) -> Result<Response, ApiError> {
    let (owner, jar) = session::owner(jar);
    let cleared = state.db.delete_blob(&owner, BlobKind::SearchHistory).await?;
    tracing::info!(cleared, "search history cleared");
    Ok((jar, Json(ClearedResponse { ok: true, cleared })).into_response())
}

pub async fn get_usage(State(state): State<AppState>, jar: CookieJar) -> Result<Response, ApiError> {
    let (owner, jar) = session::owner(jar);
    let now = Utc::now();
    let usage = state
        .db
        .load_blob::<WeeklyUsage>(&owner, BlobKind::WeeklyUsage)
        .await?
        .unwrap_or_else(|| WeeklyUsage::empty(now));
    let budget = session::budget_from(&jar, state.service.settings().budget_limit);

    let body = UsageResponse {
        ok: true,
        week_start: WeeklyUsage::week_start_of(now),
        count: usage.current(now),
        budget: BudgetView::from(budget),
    };
    Ok((jar, Json(body)).into_response())
}

pub async fn get_verifications(State(state): State<AppState>, jar: CookieJar) -> Result<Response, ApiError> {
    let (owner, jar) = session::owner(jar);
    let verifications: Verifications = state.db.load_blob_or_default(&owner, BlobKind::Verifications).await?;
    Ok((jar, Json(VerificationsResponse { ok: true, verifications })).into_response())
}

pub async fn put_verifications(
    State(state): State<AppState>, jar: CookieJar, body: Result<Json<Verifications>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(verifications) = body?;
    let (owner, jar) = session::owner(jar);
    state.db.save_blob(&owner, BlobKind::Verifications, &verifications).await?;
    Ok((jar, Json(VerificationsResponse { ok: true, verifications })).into_response())
}

pub async fn get_columns(State(state): State<AppState>, jar: CookieJar) -> Result<Response, ApiError> {
    let (owner, jar) = session::owner(jar);
    let columns: Vec<ColumnDef> = state.db.load_blob_or_default(&owner, BlobKind::CustomColumns).await?;
    Ok((jar, Json(ColumnsResponse { ok: true, columns })).into_response())
}

pub async fn put_columns(
    State(state): State<AppState>, jar: CookieJar, body: Result<Json<Vec<ColumnDef>>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(columns) = body?;
    validate_columns(&columns)?;
    let (owner, jar) = session::owner(jar);
    state.db.save_blob(&owner, BlobKind::CustomColumns, &columns).await?;
    Ok((jar, Json(ColumnsResponse { ok: true, columns })).into_response())
}

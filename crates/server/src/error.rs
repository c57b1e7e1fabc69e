//! Structured errors for the HTTP transport.
//!
//! Every failure is a JSON body with `ok: false` and the HTTP status that
//! matches the underlying error.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use prospect_client::SearchRejection;
use serde::Serialize;

/// JSON error body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub ok: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// An error response for the HTTP API.
#[derive(Debug, thiserror::Error)]
#[error("{status}: {}", .body.error)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    fn new(status: u16, error: String) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body: ErrorBody { ok: false, error, banner: None, remaining: None, reset_at: None, limit: None },
        }
    }
}

impl From<SearchRejection> for ApiError {
    fn from(rejection: SearchRejection) -> Self {
        let mut err = Self::new(rejection.status_code(), rejection.to_string());
        err.body.banner = rejection.banner().map(str::to_string);
        match rejection {
            SearchRejection::RateLimited(decision) => {
                err.body.remaining = Some(decision.remaining);
                err.body.reset_at = Some(decision.reset_at);
                err.body.limit = Some(decision.limit);
            }
            SearchRejection::BudgetExceeded(step) => {
                err.body.remaining = Some(step.remaining);
            }
            SearchRejection::InvalidInput(_) | SearchRejection::Upstream(_) => {}
        }
        err
    }
}

impl From<prospect_core::Error> for ApiError {
    fn from(err: prospect_core::Error) -> Self {
        let status = err.status_code();
        if status >= 500 {
            tracing::error!(error = %err, "state store request failed");
        }
        Self::new(status, err.to_string())
    }
}

/// A body that is not the expected JSON is invalid input like any other.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(status = %rejection.status(), "rejected request body");
        Self::new(400, format!("invalid request body: {}", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

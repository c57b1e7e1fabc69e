//! Unified error types for prospect.
//!
//! Each variant carries a stable code prefix and maps to both an MCP error
//! code and an HTTP status.

use rmcp::model::{ErrorCode, ErrorData as McpError};
use tokio_rusqlite::rusqlite;

/// Unified error types for the prospect server.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty query, unknown tab).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Client exceeded its request rate.
    #[error("RATE_LIMITED: {0}")]
    RateLimited(String),

    /// Session used up its live searches.
    #[error("BUDGET_EXCEEDED: {0}")]
    BudgetExceeded(String),

    /// Live provider failed and no fallback was allowed.
    #[error("UPSTREAM_ERROR: {0}")]
    Upstream(String),

    /// Stored state could not be encoded or decoded.
    #[error("STATE_CORRUPT: {0}")]
    StateCorrupt(String),

    /// Database operation failed.
    #[error("STATE_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// Migration failed to apply.
    #[error("STATE_ERROR: migration failed: {0}")]
    MigrationFailed(String),
}

impl Error {
    /// HTTP status for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::InvalidInput(_) => 400,
            Error::RateLimited(_) | Error::BudgetExceeded(_) => 429,
            Error::Upstream(_) => 502,
            Error::StateCorrupt(_) | Error::Database(_) | Error::MigrationFailed(_) => 500,
        }
    }
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::StateCorrupt(err.to_string())
    }
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let (code, message) = match &err {
            Error::InvalidInput(msg) => (-32602, msg.clone()),
            Error::RateLimited(msg) => (-32010, msg.clone()),
            Error::BudgetExceeded(msg) => (-32013, msg.clone()),
            Error::Upstream(msg) => (-32008, msg.clone()),
            Error::StateCorrupt(msg) => (-32002, msg.clone()),
            Error::Database(e) => (-32002, e.to_string()),
            Error::MigrationFailed(msg) => (-32002, msg.clone()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}

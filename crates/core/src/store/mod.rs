//! SQLite-backed store for per-owner UI state.
//!
//! Each kind of state (search history, weekly usage, row verifications,
//! custom columns) is a JSON blob loaded and saved wholesale. The blobs carry
//! no version of their own; the table schema is tracked by migrations.

pub mod blobs;
pub mod connection;
pub mod migrations;
pub mod records;

pub use blobs::BlobKind;
pub use connection::StateDb;
pub use records::{
    ColumnDef, ColumnKind, HistoryEntry, SearchHistory, VerificationRecord, VerificationStatus, Verifications,
    WeeklyUsage, validate_columns,
};

//! Typed records stored as blobs.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::blobs::BlobKind;
use super::connection::StateDb;
use crate::Error;
use crate::cache::normalize_query_for_cache;
use crate::tab::Tab;

/// One search a user ran.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub query: String,
    pub tab: Tab,
    pub result_count: usize,
    pub searched_at: DateTime<Utc>,
}

/// Most-recent-first search history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchHistory {
    pub entries: Vec<HistoryEntry>,
}

impl SearchHistory {
    /// Put `entry` at the front, dropping an older entry for the same tab
    /// and normalized query, then trim to `limit`.
    pub fn record(&mut self, entry: HistoryEntry, limit: usize) {
        let needle = normalize_query_for_cache(&entry.query);
        self.entries
            .retain(|e| !(e.tab == entry.tab && normalize_query_for_cache(&e.query) == needle));
        self.entries.insert(0, entry);
        self.entries.truncate(limit);
    }
}

/// Searches counted in the current ISO week.
///
/// The default is an empty count for a week long past; the first
/// [`bump`](Self::bump) moves it to the current week.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyUsage {
    /// Monday of the counted week.
    pub week_start: NaiveDate,
    pub count: u32,
}

impl WeeklyUsage {
    pub fn week_start_of(at: DateTime<Utc>) -> NaiveDate {
        let day = at.date_naive();
        day - Duration::days(i64::from(day.weekday().num_days_from_monday()))
    }

    pub fn empty(at: DateTime<Utc>) -> Self {
        Self { week_start: Self::week_start_of(at), count: 0 }
    }

    /// Count for the week containing `at`; zero once that week has moved on.
    pub fn current(&self, at: DateTime<Utc>) -> u32 {
        if self.week_start == Self::week_start_of(at) { self.count } else { 0 }
    }

    /// Count one more search, starting over when the week changed.
    pub fn bump(&mut self, at: DateTime<Utc>) {
        let week_start = Self::week_start_of(at);
        if self.week_start != week_start {
            self.week_start = week_start;
            self.count = 0;
        }
        self.count = self.count.saturating_add(1);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Verified,
    Disputed,
    Unverified,
}

/// The user's verdict on one grid row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRecord {
    pub status: VerificationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub checked_at: DateTime<Utc>,
}

/// Verification records keyed by row id.
pub type Verifications = BTreeMap<String, VerificationRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Text,
    Number,
    Url,
    Boolean,
}

/// A user-defined grid column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    pub id: String,
    pub header: String,
    pub kind: ColumnKind,
    /// Enrichment prompt used to fill the column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

/// Check a column set before it is saved.
pub fn validate_columns(columns: &[ColumnDef]) -> Result<(), Error> {
    let mut seen = HashSet::new();
    for column in columns {
        if column.id.trim().is_empty() {
            return Err(Error::InvalidInput("column id must not be empty".into()));
        }
        if column.header.trim().is_empty() {
            return Err(Error::InvalidInput(format!("column {} has an empty header", column.id)));
        }
        if !seen.insert(column.id.as_str()) {
            return Err(Error::InvalidInput(format!("duplicate column id: {}", column.id)));
        }
    }
    Ok(())
}

impl StateDb {
    /// Add a search to the owner's history and return the updated history.
    pub async fn record_search(&self, owner: &str, entry: HistoryEntry, limit: usize) -> Result<SearchHistory, Error> {
        let record = move |history: &mut SearchHistory| history.record(entry, limit);
        self.update_blob(owner, BlobKind::SearchHistory, record).await
    }

    /// Count one search toward the owner's weekly usage.
    pub async fn bump_weekly_usage(&self, owner: &str, at: DateTime<Utc>) -> Result<WeeklyUsage, Error> {
        self.update_blob(owner, BlobKind::WeeklyUsage, move |usage: &mut WeeklyUsage| usage.bump(at)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(query: &str, tab: Tab) -> HistoryEntry {
        HistoryEntry { query: query.into(), tab, result_count: 3, searched_at: Utc::now() }
    }

    #[test]
    fn test_history_dedupes_and_moves_to_front() {
        let mut history = SearchHistory::default();
        history.record(entry("Acme", Tab::Companies), 10);
        history.record(entry("Globex", Tab::Companies), 10);
        history.record(entry("  acme ", Tab::Companies), 10);

        let queries: Vec<&str> = history.entries.iter().map(|e| e.query.as_str()).collect();
        assert_eq!(queries, vec!["  acme ", "Globex"]);
    }

    #[test]
    fn test_history_same_query_other_tab_kept() {
        let mut history = SearchHistory::default();
        history.record(entry("acme", Tab::Companies), 10);
        history.record(entry("acme", Tab::News), 10);
        assert_eq!(history.entries.len(), 2);
    }

    #[test]
    fn test_history_truncates() {
        let mut history = SearchHistory::default();
        for i in 0..5 {
            history.record(entry(&format!("q{i}"), Tab::People), 3);
        }
        assert_eq!(history.entries.len(), 3);
        assert_eq!(history.entries[0].query, "q4");
    }

    #[test]
    fn test_weekly_usage_resets_on_new_week() {
        // 2025-03-05 is a Wednesday.
        let wednesday = Utc.with_ymd_and_hms(2025, 3, 5, 12, 0, 0).unwrap();
        let mut usage = WeeklyUsage::empty(wednesday);
        assert_eq!(usage.week_start, NaiveDate::from_ymd_opt(2025, 3, 3).unwrap());

        usage.bump(wednesday);
        usage.bump(wednesday + Duration::days(4));
        assert_eq!(usage.count, 2);

        let next_monday = Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 1).unwrap();
        assert_eq!(usage.current(next_monday), 0);
        usage.bump(next_monday);
        assert_eq!(usage.count, 1);
        assert_eq!(usage.week_start, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
    }

    #[test]
    fn test_validate_columns() {
        let col = |id: &str, header: &str| ColumnDef {
            id: id.into(),
            header: header.into(),
            kind: ColumnKind::Text,
            prompt: None,
        };

        assert!(validate_columns(&[col("a", "Revenue"), col("b", "HQ")]).is_ok());
        assert!(matches!(validate_columns(&[col("a", "x"), col("a", "y")]), Err(Error::InvalidInput(_))));
        assert!(matches!(validate_columns(&[col("a", " ")]), Err(Error::InvalidInput(_))));
        assert!(matches!(validate_columns(&[col("", "x")]), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_verification_record_json() {
        let json = r#"{"status":"verified","sourceUrl":"https://example.com","checkedAt":"2025-01-01T00:00:00Z"}"#;
        let record: VerificationRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.status, VerificationStatus::Verified);
        assert!(record.note.is_none());
    }

    #[tokio::test]
    async fn test_record_search_persists() {
        let db = StateDb::open_in_memory().await.unwrap();
        db.record_search("owner", entry("acme", Tab::Companies), 50).await.unwrap();
        let history = db.record_search("owner", entry("globex", Tab::Companies), 50).await.unwrap();
        assert_eq!(history.entries.len(), 2);

        let stored: SearchHistory = db.load_blob_or_default("owner", BlobKind::SearchHistory).await.unwrap();
        assert_eq!(stored, history);
    }

    #[tokio::test]
    async fn test_bump_weekly_usage_persists() {
        let db = StateDb::open_in_memory().await.unwrap();
        let now = Utc::now();
        db.bump_weekly_usage("owner", now).await.unwrap();
        let usage = db.bump_weekly_usage("owner", now).await.unwrap();
        assert_eq!(usage.count, 2);
    }

    #[tokio::test]
    async fn test_concurrent_updates_keep_every_write() {
        let db = StateDb::open_in_memory().await.unwrap();
        let now = Utc::now();

        let searches = (0..10).map(|i| db.record_search("owner", entry(&format!("q{i}"), Tab::News), 50));
        let bumps = (0..10).map(|_| db.bump_weekly_usage("owner", now));
        let (searches, bumps) = tokio::join!(futures::future::join_all(searches), futures::future::join_all(bumps));
        assert!(searches.iter().all(Result::is_ok));
        assert!(bumps.iter().all(Result::is_ok));

        let history: SearchHistory = db.load_blob_or_default("owner", BlobKind::SearchHistory).await.unwrap();
        assert_eq!(history.entries.len(), 10);
        let usage: WeeklyUsage = db.load_blob("owner", BlobKind::WeeklyUsage).await.unwrap().unwrap();
        assert_eq!(usage.current(now), 10);
    }
}

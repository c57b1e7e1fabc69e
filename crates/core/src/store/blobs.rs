//! Wholesale JSON blob storage keyed by owner and kind.

use std::fmt;

use super::connection::StateDb;
use crate::Error;
use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};
use tokio_rusqlite::params;

/// The kinds of per-owner state the UI persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlobKind {
    SearchHistory,
    WeeklyUsage,
    Verifications,
    CustomColumns,
}

impl BlobKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlobKind::SearchHistory => "search_history",
            BlobKind::WeeklyUsage => "weekly_usage",
            BlobKind::Verifications => "verifications",
            BlobKind::CustomColumns => "custom_columns",
        }
    }
}

impl fmt::Display for BlobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StateDb {
    /// Load a blob and decode it.
    ///
    /// Returns None if nothing is stored for this owner and kind.
    pub async fn load_blob<T: DeserializeOwned>(&self, owner: &str, kind: BlobKind) -> Result<Option<T>, Error> {
        let owner = owner.to_string();
        let raw: Option<String> = self
            .conn
            .call(move |conn| -> Result<Option<String>, Error> {
                let mut stmt = conn.prepare("SELECT value_json FROM state_blobs WHERE owner = ?1 AND kind = ?2")?;

                let result = stmt.query_row(params![owner, kind.as_str()], |row| row.get(0));

                match result {
                    Ok(json) => Ok(Some(json)),
                    Err(tokio_rusqlite::rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)?;

        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Load a blob, falling back to its default when absent.
    pub async fn load_blob_or_default<T: DeserializeOwned + Default>(
        &self, owner: &str, kind: BlobKind,
    ) -> Result<T, Error> {
        Ok(self.load_blob(owner, kind).await?.unwrap_or_default())
    }

    /// Replace the stored blob.
    ///
    /// Uses UPSERT semantics: the whole value is overwritten.
    pub async fn save_blob<T: Serialize>(&self, owner: &str, kind: BlobKind, value: &T) -> Result<(), Error> {
        let owner = owner.to_string();
        let value_json = serde_json::to_string(value)?;
        let updated_at = Utc::now().to_rfc3339();

        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "INSERT INTO state_blobs (owner, kind, value_json, updated_at)
                    VALUES (?1, ?2, ?3, ?4)
                    ON CONFLICT(owner, kind) DO UPDATE SET
                        value_json = excluded.value_json,
                        updated_at = excluded.updated_at",
                    params![owner, kind.as_str(), value_json, updated_at],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// Read, change and write back one blob as a single step.
    ///
    /// Runs in one transaction on the connection thread, so concurrent
    /// updates for the same owner and kind never lose a write. Returns the
    /// stored value.
    pub async fn update_blob<T, F>(&self, owner: &str, kind: BlobKind, change: F) -> Result<T, Error>
    where
        T: Serialize + DeserializeOwned + Default + Send + 'static,
        F: FnOnce(&mut T) + Send + 'static,
    {
        let owner = owner.to_string();
        let updated_at = Utc::now().to_rfc3339();

        self.conn
            .call(move |conn| -> Result<T, Error> {
                let tx = conn.transaction()?;
                let raw: Option<String> = match tx.query_row(
                    "SELECT value_json FROM state_blobs WHERE owner = ?1 AND kind = ?2",
                    params![owner, kind.as_str()],
                    |row| row.get(0),
                ) {
                    Ok(json) => Some(json),
                    Err(tokio_rusqlite::rusqlite::Error::QueryReturnedNoRows) => None,
                    Err(e) => return Err(e.into()),
                };

                let mut value: T = match raw {
                    Some(json) => serde_json::from_str(&json)?,
                    None => T::default(),
                };
                change(&mut value);

                tx.execute(
                    "INSERT INTO state_blobs (owner, kind, value_json, updated_at)
                    VALUES (?1, ?2, ?3, ?4)
                    ON CONFLICT(owner, kind) DO UPDATE SET
                        value_json = excluded.value_json,
                        updated_at = excluded.updated_at",
                    params![owner, kind.as_str(), serde_json::to_string(&value)?, updated_at],
                )?;
                tx.commit()?;
                Ok(value)
            })
            .await
            .map_err(Error::from)
    }

    /// Delete a stored blob. Returns whether anything was removed.
    pub async fn delete_blob(&self, owner: &str, kind: BlobKind) -> Result<bool, Error> {
        let owner = owner.to_string();
        self.conn
            .call(move |conn| -> Result<bool, Error> {
                let count =
                    conn.execute("DELETE FROM state_blobs WHERE owner = ?1 AND kind = ?2", params![owner, kind.as_str()])?;
                Ok(count > 0)
            })
            .await
            .map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn test_save_and_load_blob() {
        let db = StateDb::open_in_memory().await.unwrap();
        let value: BTreeMap<String, u32> = [("a".to_string(), 1)].into();

        db.save_blob("owner-1", BlobKind::Verifications, &value).await.unwrap();

        let loaded: BTreeMap<String, u32> = db.load_blob("owner-1", BlobKind::Verifications).await.unwrap().unwrap();
        assert_eq!(loaded, value);
    }

    #[tokio::test]
    async fn test_load_missing_blob() {
        let db = StateDb::open_in_memory().await.unwrap();
        let loaded: Option<Vec<String>> = db.load_blob("nobody", BlobKind::CustomColumns).await.unwrap();
        assert!(loaded.is_none());

        let default: Vec<String> = db.load_blob_or_default("nobody", BlobKind::CustomColumns).await.unwrap();
        assert!(default.is_empty());
    }

    #[tokio::test]
    async fn test_blobs_scoped_by_owner_and_kind() {
        let db = StateDb::open_in_memory().await.unwrap();
        db.save_blob("a", BlobKind::SearchHistory, &vec!["x"]).await.unwrap();
        db.save_blob("b", BlobKind::SearchHistory, &vec!["y"]).await.unwrap();
        db.save_blob("a", BlobKind::CustomColumns, &vec!["z"]).await.unwrap();

        let a: Vec<String> = db.load_blob_or_default("a", BlobKind::SearchHistory).await.unwrap();
        let b: Vec<String> = db.load_blob_or_default("b", BlobKind::SearchHistory).await.unwrap();
        assert_eq!(a, vec!["x"]);
        assert_eq!(b, vec!["y"]);
    }

    #[tokio::test]
    async fn test_save_overwrites_wholesale() {
        let db = StateDb::open_in_memory().await.unwrap();
        db.save_blob("a", BlobKind::CustomColumns, &vec!["one", "two"]).await.unwrap();
        db.save_blob("a", BlobKind::CustomColumns, &vec!["three"]).await.unwrap();

        let loaded: Vec<String> = db.load_blob_or_default("a", BlobKind::CustomColumns).await.unwrap();
        assert_eq!(loaded, vec!["three"]);
    }

    #[tokio::test]
    async fn test_delete_blob() {
        let db = StateDb::open_in_memory().await.unwrap();
        db.save_blob("a", BlobKind::SearchHistory, &vec!["x"]).await.unwrap();

        assert!(db.delete_blob("a", BlobKind::SearchHistory).await.unwrap());
        assert!(!db.delete_blob("a", BlobKind::SearchHistory).await.unwrap());
        let loaded: Option<Vec<String>> = db.load_blob("a", BlobKind::SearchHistory).await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_blob_reports_state_error() {
        let db = StateDb::open_in_memory().await.unwrap();
        db.save_blob("a", BlobKind::WeeklyUsage, &"not a number").await.unwrap();

        let result: Result<Option<u32>, Error> = db.load_blob("a", BlobKind::WeeklyUsage).await;
        assert!(matches!(result, Err(Error::StateCorrupt(_))));
    }
}

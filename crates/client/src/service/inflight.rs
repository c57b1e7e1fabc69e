//! Registry of live searches currently outstanding, keyed like the cache.
//!
//! At most one live call runs per key. Callers arriving while it runs share
//! its result instead of starting their own.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::FutureExt;
use futures::channel::oneshot;
use futures::future::{BoxFuture, Shared};

use super::{SearchOutcome, SearchRejection};

/// Result every coalesced caller receives.
pub type SearchResult = Result<SearchOutcome, SearchRejection>;

/// A live search that any number of callers can await.
pub type SharedSearch = Shared<BoxFuture<'static, SearchResult>>;

/// How a caller got hold of a live search.
pub enum Joined {
    /// Registered a new call and must deliver its result through `sender`.
    Leader { shared: SharedSearch, sender: oneshot::Sender<SearchResult> },
    /// Attached to a call already running.
    Follower(SharedSearch),
}

#[derive(Default)]
pub struct InFlight {
    pending: Mutex<HashMap<String, SharedSearch>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, SharedSearch>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Attach to the search running under `key`, or register a new one.
    ///
    /// `admit` runs under the registry lock, so admission checks inside it
    /// and the registration are atomic with respect to other callers. If it
    /// refuses, nothing is registered.
    pub fn join_or_start<F>(&self, key: &str, admit: F) -> Result<Joined, SearchRejection>
    where
        F: FnOnce() -> Result<(), SearchRejection>,
    {
        let mut pending = self.lock();
        if let Some(existing) = pending.get(key) {
            return Ok(Joined::Follower(existing.clone()));
        }

        admit()?;

        let (sender, receiver) = oneshot::channel();
        let shared = async move {
            receiver
                .await
                .unwrap_or_else(|_| Err(SearchRejection::Upstream("search ended without a result".to_string())))
        }
        .boxed()
        .shared();
        pending.insert(key.to_string(), shared.clone());
        Ok(Joined::Leader { shared, sender })
    }

    pub fn remove(&self, key: &str) {
        self.lock().remove(key);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Drops the registry entry for `key` when the live call settles, however
/// it settles.
pub struct SettleGuard {
    inflight: Arc<InFlight>,
    key: String,
}

impl SettleGuard {
    pub fn new(inflight: Arc<InFlight>, key: String) -> Self {
        Self { inflight, key }
    }
}

impl Drop for SettleGuard {
    fn drop(&mut self) {
        self.inflight.remove(&self.key);
    }
}

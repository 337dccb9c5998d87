//! Keyed result cache with in-flight request sharing.
//!
//! An entry is either a pending fetch (a shared future every concurrent
//! caller awaits) or a settled outcome. Failures settle like data: later
//! callers get the cached failure until the key is invalidated, so nothing
//! retries on its own. Settlement happens inside the shared future, so the
//! cache fills even if the caller that started the fetch has gone away and
//! another caller drives it to completion.

use futures::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::FetchError;

use super::key::QueryKey;
use super::result::QueryResult;

type SharedFetch<T> = Shared<BoxFuture<'static, QueryResult<T>>>;

enum CacheEntry<T> {
    Pending { id: u64, fetch: SharedFetch<T> },
    Ready(T),
    Failed(FetchError),
}

type Entries<T> = Arc<Mutex<HashMap<QueryKey, CacheEntry<T>>>>;

/// Shared cache of query results. Clones share entries.
pub struct QueryCache<T> {
    entries: Entries<T>,
    next_id: Arc<AtomicU64>,
}

impl<T> Clone for QueryCache<T> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            next_id: Arc::clone(&self.next_id),
        }
    }
}

impl<T> Default for QueryCache<T> {
    fn default() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl<T> std::fmt::Debug for QueryCache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("entries", &lock(&self.entries).len())
            .finish()
    }
}

impl<T> QueryCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Settled data for `key`, if any.
    pub fn peek(&self, key: &QueryKey) -> Option<T> {
        match lock(&self.entries).get(key) {
            Some(CacheEntry::Ready(data)) => Some(data.clone()),
            _ => None,
        }
    }

    /// Settled outcome for `key`: `Success` or `Failure`. `None` while
    /// nothing has settled.
    pub fn cached(&self, key: &QueryKey) -> Option<QueryResult<T>> {
        match lock(&self.entries).get(key) {
            Some(CacheEntry::Ready(data)) => Some(QueryResult::Success(data.clone())),
            Some(CacheEntry::Failed(err)) => Some(QueryResult::Failure(err.clone())),
            _ => None,
        }
    }

    pub fn is_pending(&self, key: &QueryKey) -> bool {
        matches!(lock(&self.entries).get(key), Some(CacheEntry::Pending { .. }))
    }

    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Settled outcome, an in-flight fetch for the same key, or a new fetch.
    ///
    /// `fetch` is only called when neither exists.
    pub async fn fetch_or_join<F, Fut>(&self, key: &QueryKey, fetch: F) -> QueryResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, FetchError>> + Send + 'static,
    {
        let shared = {
            let mut entries = lock(&self.entries);
            match entries.get(key) {
                Some(CacheEntry::Ready(data)) => return QueryResult::Success(data.clone()),
                Some(CacheEntry::Failed(err)) => return QueryResult::Failure(err.clone()),
                Some(CacheEntry::Pending { fetch, .. }) => {
                    tracing::debug!(key = %key, "joining in-flight fetch");
                    fetch.clone()
                }
                None => {
                    let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                    tracing::debug!(key = %key, "starting fetch");
                    let shared = settle(Arc::clone(&self.entries), key.clone(), id, fetch())
                        .boxed()
                        .shared();
                    entries.insert(
                        key.clone(),
                        CacheEntry::Pending {
                            id,
                            fetch: shared.clone(),
                        },
                    );
                    shared
                }
            }
        };

        shared.await
    }

    /// Drop the entry for `key`. A fetch still in flight keeps running for
    /// its awaiters but no longer fills the cache.
    pub fn invalidate(&self, key: &QueryKey) -> bool {
        let removed = lock(&self.entries).remove(key).is_some();
        if removed {
            tracing::debug!(key = %key, "invalidated");
        }
        removed
    }

    /// Drop every entry under `prefix`. Returns how many were removed.
    pub fn invalidate_prefix(&self, prefix: &QueryKey) -> usize {
        let mut entries = lock(&self.entries);
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        let removed = before - entries.len();
        tracing::debug!(prefix = %prefix, removed, "invalidated prefix");
        removed
    }

    pub fn clear(&self) {
        lock(&self.entries).clear();
    }
}

async fn settle<T, Fut>(entries: Entries<T>, key: QueryKey, id: u64, fetch: Fut) -> QueryResult<T>
where
    T: Clone,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let outcome = fetch.await;

    let mut entries = lock(&entries);
    let current = matches!(
        entries.get(&key),
        Some(CacheEntry::Pending { id: pending, .. }) if *pending == id
    );
    if current {
        let entry = match &outcome {
            Ok(data) => CacheEntry::Ready(data.clone()),
            Err(err) => CacheEntry::Failed(err.clone()),
        };
        entries.insert(key, entry);
    }
    drop(entries);

    QueryResult::from(outcome)
}

fn lock<T>(entries: &Mutex<HashMap<QueryKey, CacheEntry<T>>>) -> MutexGuard<'_, HashMap<QueryKey, CacheEntry<T>>> {
    entries
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

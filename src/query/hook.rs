//! Per-consumer query handle.
//!
//! A hook shows the result of the key it most recently mounted. Every mount
//! and unmount bumps a generation counter; a fetch that completes under an
//! older generation still fills the cache but never reaches the display.

use futures::future::{BoxFuture, FutureExt};
use serde::de::DeserializeOwned;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::FetchError;
use crate::traits::RemoteDataClient;

use super::cache::QueryCache;
use super::definition::QuerySpec;
use super::key::QueryKey;
use super::result::QueryResult;

type Fetcher<T> = Arc<dyn Fn() -> BoxFuture<'static, Result<T, FetchError>> + Send + Sync>;

struct HookState<T> {
    generation: u64,
    mounted: Option<(QueryKey, Fetcher<T>)>,
    result: QueryResult<T>,
}

/// Cloneable handle over one mounted consumer.
pub struct QueryHook<T> {
    cache: QueryCache<T>,
    state: Arc<Mutex<HookState<T>>>,
}

impl<T> Clone for QueryHook<T> {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            state: Arc::clone(&self.state),
        }
    }
}

impl<T> QueryHook<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(cache: QueryCache<T>) -> Self {
        Self {
            cache,
            state: Arc::new(Mutex::new(HookState {
                generation: 0,
                mounted: None,
                result: QueryResult::Idle,
            })),
        }
    }

    /// Currently displayed result.
    pub fn state(&self) -> QueryResult<T> {
        self.lock().result.clone()
    }

    /// Key of the current mount.
    pub fn key(&self) -> Option<QueryKey> {
        self.lock().mounted.as_ref().map(|(key, _)| key.clone())
    }

    pub fn cache(&self) -> &QueryCache<T> {
        &self.cache
    }

    /// Mount a query backed by the remote data client.
    pub async fn mount(
        &self,
        spec: &QuerySpec<T>,
        client: Arc<dyn RemoteDataClient>,
    ) -> QueryResult<T>
    where
        T: DeserializeOwned,
    {
        let query = spec.clone();
        let fetcher: Fetcher<T> = Arc::new(move || {
            let query = query.clone();
            let client = Arc::clone(&client);
            async move { query.fetch(client.as_ref()).await }.boxed()
        });
        self.run(spec.key().clone(), fetcher).await
    }

    /// Mount `key` with a custom fetch function.
    ///
    /// A cache hit, including a cached failure, returns immediately without
    /// calling `fetch`. Otherwise
    /// the hook shows `Loading` until the shared fetch for `key` completes.
    /// Returns what the hook displays afterwards.
    pub async fn mount_with<F, Fut>(&self, key: QueryKey, fetch: F) -> QueryResult<T>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, FetchError>> + Send + 'static,
    {
        let fetcher: Fetcher<T> = Arc::new(move || fetch().boxed());
        self.run(key, fetcher).await
    }

    /// Invalidate the current key and mount it again. Idle hooks stay idle.
    pub async fn refetch(&self) -> QueryResult<T> {
        let mounted = self.lock().mounted.clone();
        match mounted {
            Some((key, fetcher)) => {
                self.cache.invalidate(&key);
                self.run(key, fetcher).await
            }
            None => QueryResult::Idle,
        }
    }

    /// Return to `Idle`. A fetch still in flight is discarded on arrival.
    pub fn unmount(&self) {
        let mut state = self.lock();
        state.generation += 1;
        state.mounted = None;
        state.result = QueryResult::Idle;
    }

    async fn run(&self, key: QueryKey, fetcher: Fetcher<T>) -> QueryResult<T> {
        let generation = {
            let mut state = self.lock();
            state.generation += 1;
            state.mounted = Some((key.clone(), Arc::clone(&fetcher)));
            if let Some(cached) = self.cache.cached(&key) {
                tracing::trace!(key = %key, "cache hit");
                state.result = cached;
                return state.result.clone();
            }
            state.result = QueryResult::Loading;
            state.generation
        };

        let result = self.cache.fetch_or_join(&key, || fetcher()).await;
        if let QueryResult::Failure(err) = &result {
            tracing::warn!(key = %key, code = err.error_code(), "{}", err);
        }

        let mut state = self.lock();
        if state.generation == generation {
            state.result = result;
        } else {
            tracing::debug!(key = %key, "discarding stale result");
        }
        state.result.clone()
    }

    fn lock(&self) -> MutexGuard<'_, HookState<T>> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<T> fmt::Debug for QueryHook<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f.debug_struct("QueryHook")
            .field("generation", &state.generation)
            .field("key", &state.mounted.as_ref().map(|(key, _)| key.to_string()))
            .finish()
    }
}

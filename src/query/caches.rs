//! One [`QueryCache`] per payload type.
//!
//! Pages mount queries of many payload types. A `QueryCaches` hands every
//! consumer of the same type the same cache, so two pages that both need a
//! store's products share one entry.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::cache::QueryCache;
use super::key::QueryKey;

trait ErasedCache: Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn invalidate_prefix(&self, prefix: &QueryKey) -> usize;
    fn clear(&self);
}

impl<T> ErasedCache for QueryCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn invalidate_prefix(&self, prefix: &QueryKey) -> usize {
        QueryCache::invalidate_prefix(self, prefix)
    }

    fn clear(&self) {
        QueryCache::clear(self)
    }
}

/// Typed cache set. Clones share caches.
#[derive(Clone, Default)]
pub struct QueryCaches {
    caches: Arc<Mutex<HashMap<TypeId, Box<dyn ErasedCache>>>>,
}

impl QueryCaches {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cache for payload type `T`, created on first use.
    pub fn cache<T>(&self) -> QueryCache<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        let mut caches = self.lock();
        let entry = caches
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(QueryCache::<T>::new()) as Box<dyn ErasedCache>);

        match entry.as_any().downcast_ref::<QueryCache<T>>() {
            Some(cache) => cache.clone(),
            // Entries are keyed by their own TypeId.
            None => QueryCache::new(),
        }
    }

    /// Drop every entry under `prefix` in every cache.
    pub fn invalidate_prefix(&self, prefix: &QueryKey) -> usize {
        self.lock()
            .values()
            .map(|cache| cache.invalidate_prefix(prefix))
            .sum()
    }

    pub fn clear(&self) {
        for cache in self.lock().values() {
            cache.clear();
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<TypeId, Box<dyn ErasedCache>>> {
        self.caches
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for QueryCaches {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCaches")
            .field("types", &self.lock().len())
            .finish()
    }
}

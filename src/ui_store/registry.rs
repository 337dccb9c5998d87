//! Concern name → store lookup.

use once_cell::sync::Lazy;
use std::any::{type_name, Any};
use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::StoreError;

use super::concerns::Concern;
use super::store::UiStore;

static GLOBAL: Lazy<StoreRegistry> = Lazy::new(StoreRegistry::new);

/// The process-wide registry.
pub fn global_registry() -> &'static StoreRegistry {
    &GLOBAL
}

/// Holds one independently constructed store per concern name.
#[derive(Default)]
pub struct StoreRegistry {
    stores: Mutex<HashMap<String, Box<dyn Any + Send + Sync>>>,
}

impl StoreRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store registered under `name`, created with a payload on first use.
    pub fn get_or_init<T>(&self, name: &str) -> Result<UiStore<T>, StoreError>
    where
        T: Clone + Send + 'static,
    {
        self.lookup(name, true, || UiStore::with_payload(name))
    }

    /// Flag store registered under `name`.
    pub fn flag(&self, name: &str) -> Result<UiStore<()>, StoreError> {
        self.lookup(name, false, || UiStore::flag(name))
    }

    /// Store for a declared concern.
    pub fn store<T>(&self, concern: &Concern<T>) -> Result<UiStore<T>, StoreError>
    where
        T: Clone + Send + 'static,
    {
        self.lookup(concern.name(), concern.carries_payload(), || concern.build())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.stores().contains_key(name)
    }

    /// Registered concern names, sorted.
    pub fn concerns(&self) -> Vec<String> {
        let mut names: Vec<String> = self.stores().keys().cloned().collect();
        names.sort();
        names
    }

    /// Drop every registered store. Existing handles keep working but are
    /// detached from the registry.
    pub fn clear(&self) {
        self.stores().clear();
    }

    /// Registered store for `name`. Both the payload type and whether the
    /// store carries a payload must match the registration.
    fn lookup<T, F>(&self, name: &str, carries_payload: bool, init: F) -> Result<UiStore<T>, StoreError>
    where
        T: Clone + Send + 'static,
        F: FnOnce() -> UiStore<T>,
    {
        let mut stores = self.stores();
        let entry = stores.entry(name.to_string()).or_insert_with(|| {
            tracing::debug!(concern = name, "registering ui store");
            Box::new(init()) as Box<dyn Any + Send + Sync>
        });

        let store = entry
            .downcast_ref::<UiStore<T>>()
            .cloned()
            .ok_or_else(|| StoreError::TypeMismatch {
                concern: name.to_string(),
                expected: type_name::<T>(),
            })?;

        if store.carries_payload() != carries_payload {
            return Err(StoreError::KindMismatch {
                concern: name.to_string(),
                registered_as_flag: !store.carries_payload(),
            });
        }
        Ok(store)
    }

    fn stores(&self) -> std::sync::MutexGuard<'_, HashMap<String, Box<dyn Any + Send + Sync>>> {
        self.stores
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for StoreRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreRegistry")
            .field("concerns", &self.concerns())
            .finish()
    }
}

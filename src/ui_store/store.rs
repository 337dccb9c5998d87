//! Observable open/payload container for one dialog-like UI concern.

use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// Snapshot of a store.
///
/// `payload` is `Some` only while `is_open` is true.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiStoreState<T> {
    pub is_open: bool,
    pub payload: Option<T>,
}

impl<T> Default for UiStoreState<T> {
    fn default() -> Self {
        Self {
            is_open: false,
            payload: None,
        }
    }
}

/// Handle returned by [`UiStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer<T> = Arc<dyn Fn(&UiStoreState<T>) + Send + Sync>;

struct StoreInner<T> {
    concern: String,
    carries_payload: bool,
    state: Mutex<UiStoreState<T>>,
    observers: Mutex<Vec<(SubscriptionId, Observer<T>)>>,
    next_id: AtomicU64,
    // Bumped under the state lock on every committed transition.
    version: AtomicU64,
}

/// Observable store. Clones share the same state.
///
/// Transitions are synchronous. Observers run after the new state is
/// committed and with no lock held, so they may read or mutate the store.
/// When an observer commits a nested transition, delivery of the older
/// snapshot stops: the remaining observers only see the newer state.
pub struct UiStore<T> {
    inner: Arc<StoreInner<T>>,
}

impl<T> Clone for UiStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for UiStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiStore")
            .field("concern", &self.inner.concern)
            .field("carries_payload", &self.inner.carries_payload)
            .finish()
    }
}

impl<T: Clone + Send + 'static> UiStore<T> {
    /// Store whose `open` keeps the payload.
    pub fn with_payload(concern: impl Into<String>) -> Self {
        Self::build(concern.into(), true)
    }

    pub(crate) fn build(concern: String, carries_payload: bool) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                concern,
                carries_payload,
                state: Mutex::new(UiStoreState::default()),
                observers: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(1),
                version: AtomicU64::new(0),
            }),
        }
    }

    pub fn concern(&self) -> &str {
        &self.inner.concern
    }

    pub fn carries_payload(&self) -> bool {
        self.inner.carries_payload
    }

    /// Current snapshot.
    pub fn read(&self) -> UiStoreState<T> {
        self.state().clone()
    }

    pub fn is_open(&self) -> bool {
        self.state().is_open
    }

    /// Open the store. On a data-carrying store the payload replaces any
    /// previous one; flag stores ignore it.
    pub fn open(&self, payload: Option<T>) {
        let (snapshot, version) = {
            let mut state = self.state();
            state.is_open = true;
            state.payload = if self.inner.carries_payload {
                payload
            } else {
                None
            };
            (state.clone(), self.bump())
        };
        tracing::trace!(concern = %self.inner.concern, "open");
        self.notify(&snapshot, version);
    }

    /// Close the store and clear its payload. Closing a closed store does
    /// nothing and notifies nobody.
    pub fn close(&self) {
        let (snapshot, version) = {
            let mut state = self.state();
            if !state.is_open {
                return;
            }
            state.is_open = false;
            state.payload = None;
            (state.clone(), self.bump())
        };
        tracing::trace!(concern = %self.inner.concern, "close");
        self.notify(&snapshot, version);
    }

    /// Flip between open (without payload) and closed.
    pub fn toggle(&self) {
        if self.is_open() {
            self.close();
        } else {
            self.open(None);
        }
    }

    /// Register an observer called synchronously after every transition.
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&UiStoreState<T>) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        self.observers().push((id, Arc::new(observer)));
        id
    }

    /// Remove an observer. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.observers();
        let before = observers.len();
        observers.retain(|(existing, _)| *existing != id);
        observers.len() < before
    }

    pub fn observer_count(&self) -> usize {
        self.observers().len()
    }

    fn bump(&self) -> u64 {
        self.inner.version.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn notify(&self, snapshot: &UiStoreState<T>, version: u64) {
        let observers: Vec<Observer<T>> = self
            .observers()
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();
        for observer in observers {
            if self.inner.version.load(Ordering::SeqCst) != version {
                tracing::trace!(concern = %self.inner.concern, "snapshot superseded");
                return;
            }
            observer(snapshot);
        }
    }

    // A panicking observer runs with no lock held, so poisoning can only come
    // from a panic inside these short critical sections; the data is still
    // consistent there.
    fn state(&self) -> MutexGuard<'_, UiStoreState<T>> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn observers(&self) -> MutexGuard<'_, Vec<(SubscriptionId, Observer<T>)>> {
        self.inner
            .observers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl UiStore<()> {
    /// Store that only tracks visibility.
    pub fn flag(concern: impl Into<String>) -> Self {
        Self::build(concern.into(), false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_starts_closed() {
        let store: UiStore<u32> = UiStore::with_payload("test");
        assert_eq!(store.read(), UiStoreState::default());
        assert!(!store.is_open());
    }

    #[test]
    fn test_open_then_read() {
        let store = UiStore::with_payload("test");
        store.open(Some(7u32));
        assert_eq!(
            store.read(),
            UiStoreState {
                is_open: true,
                payload: Some(7)
            }
        );
    }

    #[test]
    fn test_close_clears_payload() {
        let store = UiStore::with_payload("test");
        store.open(Some("draft".to_string()));
        store.close();
        assert_eq!(store.read(), UiStoreState::default());
    }

    #[test]
    fn test_reopen_replaces_payload() {
        let store = UiStore::with_payload("test");
        store.open(Some(1u32));
        store.open(Some(2u32));
        assert_eq!(store.read().payload, Some(2));
        store.open(None);
        assert_eq!(store.read().payload, None);
        assert!(store.is_open());
    }

    #[test]
    fn test_reopen_after_close_has_no_stale_payload() {
        let store = UiStore::with_payload("test");
        store.open(Some(1u32));
        store.close();
        store.open(None);
        assert_eq!(store.read().payload, None);
    }

    #[test]
    fn test_flag_store_ignores_payload() {
        let store = UiStore::flag("sheet");
        store.open(Some(()));
        assert_eq!(
            store.read(),
            UiStoreState {
                is_open: true,
                payload: None
            }
        );
        assert!(!store.carries_payload());
    }

    #[test]
    fn test_double_close_is_noop_and_silent() {
        let store = UiStore::with_payload("test");
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        store.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        store.open(Some(1u8));
        store.close();
        let after_first = store.read();
        store.close();

        assert_eq!(store.read(), after_first);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_observer_sees_committed_state() {
        let store = UiStore::with_payload("test");
        let reader = store.clone();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        store.subscribe(move |snapshot: &UiStoreState<u8>| {
            // Reading inside the callback must not deadlock and must agree.
            assert_eq!(&reader.read(), snapshot);
            sink.lock().unwrap().push(snapshot.clone());
        });

        store.open(Some(5));
        store.close();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].payload, Some(5));
        assert!(!seen[1].is_open);
    }

    #[test]
    fn test_observer_may_mutate_store() {
        let store = UiStore::with_payload("test");
        let handle = store.clone();
        store.subscribe(move |snapshot: &UiStoreState<u8>| {
            if snapshot.payload == Some(0) {
                handle.close();
            }
        });

        store.open(Some(0));
        assert!(!store.is_open());
    }

    #[test]
    fn test_nested_transition_supersedes_older_snapshot() {
        let store = UiStore::with_payload("test");
        let closer = store.clone();
        store.subscribe(move |snapshot: &UiStoreState<u8>| {
            if snapshot.is_open {
                closer.close();
            }
        });

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        store.subscribe(move |snapshot: &UiStoreState<u8>| {
            sink.lock().unwrap().push(snapshot.clone());
        });

        store.open(Some(1));

        assert_eq!(store.read(), UiStoreState::default());
        let seen = seen.lock().unwrap();
        assert_eq!(*seen, vec![UiStoreState::default()]);
    }

    #[test]
    fn test_unsubscribe() {
        let store = UiStore::flag("sheet");
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let id = store.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        store.toggle();
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.toggle();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.observer_count(), 0);
        assert!(!store.is_open());
    }
}

//! Mock session provider for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::models::{Role, Session};
use crate::traits::{SessionError, SessionProvider};

/// Session provider returning a configurable session and counting lookups.
///
/// # Example
///
/// ```ignore
/// use storedash::adapters::mock::MockSessionProvider;
///
/// let provider = MockSessionProvider::signed_in("u1", Role::User);
/// let session = provider.get_session().await?;
/// assert!(session.is_some());
/// assert_eq!(provider.call_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockSessionProvider {
    session: Arc<Mutex<Option<Session>>>,
    failure: Arc<Mutex<Option<SessionError>>>,
    calls: Arc<AtomicUsize>,
}

impl MockSessionProvider {
    /// Provider that answers "no session".
    pub fn signed_out() -> Self {
        Self::default()
    }

    /// Provider that answers with an authenticated session.
    pub fn signed_in(identity: &str, role: Role) -> Self {
        Self::with_session(Session::authenticated(identity, role))
    }

    pub fn with_session(session: Session) -> Self {
        let provider = Self::default();
        provider.set_session(Some(session));
        provider
    }

    /// Provider whose lookups fail.
    pub fn failing(error: SessionError) -> Self {
        let provider = Self::default();
        provider.set_failure(Some(error));
        provider
    }

    pub fn set_session(&self, session: Option<Session>) {
        *self.session.lock().unwrap() = session;
    }

    pub fn set_failure(&self, error: Option<SessionError>) {
        *self.failure.lock().unwrap() = error;
    }

    /// Number of `get_session` calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionProvider for MockSessionProvider {
    async fn get_session(&self) -> Result<Option<Session>, SessionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.failure.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self.session.lock().unwrap().clone())
    }
}

//! Session provider trait abstraction.
//!
//! The session provider is an external collaborator: it resolves the
//! identity of the current request. The gated view resolver consumes it and
//! never caches what it returns.

use async_trait::async_trait;

use crate::models::Session;

/// Session lookup errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The provider could not be reached.
    Transport(String),
    /// The provider answered with something that is not a session.
    Malformed(String),
    /// Other error
    Other(String),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::Transport(msg) => write!(f, "Session transport error: {}", msg),
            SessionError::Malformed(msg) => write!(f, "Malformed session: {}", msg),
            SessionError::Other(msg) => write!(f, "Session error: {}", msg),
        }
    }
}

impl std::error::Error for SessionError {}

/// Trait for resolving the session of the current request.
///
/// # Returns
/// - `Ok(Some(session))` when the request carries a session
/// - `Ok(None)` when it does not
/// - `Err(error)` when the lookup itself failed; callers treat this exactly
///   like `Ok(None)`
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn get_session(&self) -> Result<Option<Session>, SessionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_error_display() {
        assert_eq!(
            SessionError::Transport("reset".to_string()).to_string(),
            "Session transport error: reset"
        );
        assert_eq!(
            SessionError::Malformed("not json".to_string()).to_string(),
            "Malformed session: not json"
        );
    }
}

//! Session provider answering with a fixed session.
//!
//! Used by the binary, where the session comes from the environment rather
//! than from a request.

use async_trait::async_trait;

use crate::error::ConfigError;
use crate::models::{Role, Session};
use crate::traits::{SessionError, SessionProvider};

/// Environment variable carrying the user id of the static session.
pub const USER_ID_ENV: &str = "STOREDASH_USER_ID";

/// Environment variable carrying the role of the static session.
pub const ROLE_ENV: &str = "STOREDASH_ROLE";

#[derive(Debug, Clone, Default)]
pub struct StaticSessionProvider {
    session: Option<Session>,
}

impl StaticSessionProvider {
    pub fn new(session: Option<Session>) -> Self {
        Self { session }
    }

    /// Build the session from `STOREDASH_USER_ID` / `STOREDASH_ROLE`.
    ///
    /// No user id means no session. The role defaults to `USER`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_values(
            std::env::var(USER_ID_ENV).ok(),
            std::env::var(ROLE_ENV).ok(),
        )
    }

    pub(crate) fn from_values(
        user_id: Option<String>,
        role: Option<String>,
    ) -> Result<Self, ConfigError> {
        let user_id = match user_id.filter(|id| !id.trim().is_empty()) {
            Some(id) => id,
            None => return Ok(Self::default()),
        };
        let role = match role {
            Some(name) => Role::parse(&name).ok_or(ConfigError::UnknownRole(name))?,
            None => Role::default(),
        };
        Ok(Self::new(Some(Session::authenticated(user_id, role))))
    }
}

#[async_trait]
impl SessionProvider for StaticSessionProvider {
    async fn get_session(&self) -> Result<Option<Session>, SessionError> {
        Ok(self.session.clone())
    }
}

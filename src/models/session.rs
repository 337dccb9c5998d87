//! Session identity as resolved by the session provider.
//!
//! A [`Session`] is created per request, is immutable for the duration of
//! one resolution, and is never persisted by this crate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of an authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Role attached to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    #[default]
    User,
    Customer,
}

impl Role {
    /// Parse a role name case-insensitively (`admin`, `USER`, ...).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Some(Role::Admin),
            "USER" => Some(Role::User),
            "CUSTOMER" => Some(Role::Customer),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "ADMIN"),
            Role::User => write!(f, "USER"),
            Role::Customer => write!(f, "CUSTOMER"),
        }
    }
}

/// Account attributes carried alongside the identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionAttributes {
    pub is_two_factor_enabled: bool,
    #[serde(rename = "isOAuth")]
    pub is_oauth: bool,
    pub billing_account_ref: Option<String>,
}

/// Resolved identity and role of the current viewer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The authenticated user's ID. A session without one is treated as
    /// unauthenticated everywhere.
    pub identity: Option<UserId>,
    pub role: Role,
    #[serde(default)]
    pub attributes: SessionAttributes,
}

impl Session {
    /// Create a session for an authenticated user.
    pub fn authenticated(identity: impl Into<String>, role: Role) -> Self {
        Self {
            identity: Some(UserId::new(identity)),
            role,
            attributes: SessionAttributes::default(),
        }
    }

    /// Create a session that exists but carries no identity.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_attributes(mut self, attributes: SessionAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.is_authenticated() && self.role == Role::Admin
    }
}

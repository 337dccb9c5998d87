//! Errors raised while gating a view.
//!
//! These never leave the resolver: both variants short-circuit to the denial
//! view. They are kept as values so the reason can be logged and asserted on.

use std::fmt;

/// Reasons a gated view was not rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateError {
    /// No session, a session without identity, or the provider failed.
    SessionUnavailable { message: String },

    /// A session exists but the route predicate rejected it.
    AuthorizationDenied { route: String },
}

impl GateError {
    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            GateError::SessionUnavailable { .. } => "E_GATE_NO_SESSION",
            GateError::AuthorizationDenied { .. } => "E_GATE_DENIED",
        }
    }

    /// Get a user-friendly error message.
    ///
    /// Both variants read the same to the viewer so the denial view never
    /// discloses whether a session existed.
    pub fn user_message(&self) -> String {
        "You are not authorized to view this page.".to_string()
    }
}

impl fmt::Display for GateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateError::SessionUnavailable { message } => {
                write!(f, "Session unavailable: {}", message)
            }
            GateError::AuthorizationDenied { route } => {
                write!(f, "Authorization denied for route {}", route)
            }
        }
    }
}

impl std::error::Error for GateError {}

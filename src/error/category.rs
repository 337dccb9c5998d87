//! Error category classification for unified error handling.
//!
//! This module provides a high-level categorization of errors to enable
//! consistent handling and user messaging.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Session or authorization failures. Always rendered as the denial view.
    Auth,

    /// The backend could not be reached or answered with an error.
    /// Retryable on user request.
    Server,

    /// The requested record does not exist. Rendered as a not-found message.
    NotFound,

    /// Missing or invalid settings. Not retryable until corrected.
    Configuration,

    /// Programming errors such as registry type mismatches.
    Client,
}

impl ErrorCategory {
    /// Returns true if a manual retry may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Server)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Auth => "auth",
            ErrorCategory::Server => "server",
            ErrorCategory::NotFound => "not_found",
            ErrorCategory::Configuration => "configuration",
            ErrorCategory::Client => "client",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Auth => "Sign in with an account that can access this page",
            ErrorCategory::Server => "Check your connection and try again",
            ErrorCategory::NotFound => "Check the link or go back to the list",
            ErrorCategory::Configuration => "Review the STOREDASH_* environment variables",
            ErrorCategory::Client => "Please report this issue",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

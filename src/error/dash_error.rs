//! Unified error type for storedash.
//!
//! `DashError` consolidates the domain-specific error types into a single
//! enum so callers outside the resolver and query layers (the binary, config
//! loading) can categorize and report any failure uniformly.

use std::fmt;

use super::category::ErrorCategory;
use super::config::ConfigError;
use super::context::ErrorContext;
use super::fetch::FetchError;
use super::gate::GateError;
use super::store::StoreError;

/// Unified error type.
#[derive(Debug)]
pub enum DashError {
    /// Session or authorization failure.
    Gate(GateError),

    /// Remote data failure.
    Fetch(FetchError),

    /// UI-state registry misuse.
    Store(StoreError),

    /// Invalid configuration.
    Config(ConfigError),

    /// Wrapped error with additional context.
    WithContext {
        error: Box<DashError>,
        context: ErrorContext,
    },
}

impl DashError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            DashError::Gate(_) => ErrorCategory::Auth,
            DashError::Fetch(FetchError::ResourceNotFound { .. }) => ErrorCategory::NotFound,
            DashError::Fetch(FetchError::Failed { .. }) => ErrorCategory::Server,
            DashError::Store(_) => ErrorCategory::Client,
            DashError::Config(_) => ErrorCategory::Configuration,
            DashError::WithContext { error, .. } => error.category(),
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            DashError::Fetch(err) => err.is_retryable(),
            DashError::WithContext { error, .. } => error.is_retryable(),
            _ => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            DashError::Gate(err) => err.user_message(),
            DashError::Fetch(err) => err.user_message(),
            DashError::Store(err) => err.to_string(),
            DashError::Config(err) => err.to_string(),
            DashError::WithContext { error, .. } => error.user_message(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            DashError::Gate(err) => err.error_code(),
            DashError::Fetch(err) => err.error_code(),
            DashError::Store(err) => err.error_code(),
            DashError::Config(err) => err.error_code(),
            DashError::WithContext { error, .. } => error.error_code(),
        }
    }

    /// Attach context to this error.
    pub fn with_context(self, context: ErrorContext) -> Self {
        DashError::WithContext {
            error: Box::new(self),
            context,
        }
    }

    /// Get the attached context, if any.
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            DashError::WithContext { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Get the recovery hint for this error.
    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }
}

impl fmt::Display for DashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashError::Gate(err) => write!(f, "{}", err),
            DashError::Fetch(err) => write!(f, "{}", err),
            DashError::Store(err) => write!(f, "{}", err),
            DashError::Config(err) => write!(f, "{}", err),
            DashError::WithContext { error, context } => {
                write!(f, "{} ({})", error, context)
            }
        }
    }
}

impl std::error::Error for DashError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DashError::Gate(err) => Some(err),
            DashError::Fetch(err) => Some(err),
            DashError::Store(err) => Some(err),
            DashError::Config(err) => Some(err),
            DashError::WithContext { error, .. } => error.source(),
        }
    }
}

// ============================================================================
// From implementations for automatic error conversion
// ============================================================================

impl From<GateError> for DashError {
    fn from(err: GateError) -> Self {
        DashError::Gate(err)
    }
}

impl From<FetchError> for DashError {
    fn from(err: FetchError) -> Self {
        DashError::Fetch(err)
    }
}

impl From<StoreError> for DashError {
    fn from(err: StoreError) -> Self {
        DashError::Store(err)
    }
}

impl From<ConfigError> for DashError {
    fn from(err: ConfigError) -> Self {
        DashError::Config(err)
    }
}

//! Remote data errors.
//!
//! A [`FetchError`] is data, not control flow: query hooks surface it as
//! `QueryResult::Failure` for the consuming view to render inline.

use std::fmt;

/// Failure of a remote data fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request failed or the backend answered with an error.
    ///
    /// `label` is the descriptive failure kind of the query
    /// (e.g. "fetch active users failed"); `reason` is the underlying cause.
    Failed { label: String, reason: String },

    /// The record addressed by the request does not exist.
    ResourceNotFound { resource: String },
}

impl FetchError {
    pub fn failed(label: impl Into<String>, reason: impl Into<String>) -> Self {
        FetchError::Failed {
            label: label.into(),
            reason: reason.into(),
        }
    }

    /// Manual retry is offered for failed requests, never for missing records.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FetchError::Failed { .. })
    }

    /// Re-label a failure with the descriptive kind of the query that saw it.
    pub fn relabel(self, label: &str) -> Self {
        match self {
            FetchError::Failed { reason, .. } => FetchError::Failed {
                label: label.to_string(),
                reason,
            },
            other => other,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Failed { label, .. } => {
                let mut chars = label.chars();
                match chars.next() {
                    Some(first) => format!("{}{}.", first.to_uppercase(), chars.as_str()),
                    None => "Request failed.".to_string(),
                }
            }
            FetchError::ResourceNotFound { resource } => format!("{} not found.", resource),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            FetchError::Failed { .. } => "E_FETCH_FAILED",
            FetchError::ResourceNotFound { .. } => "E_FETCH_NOT_FOUND",
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Failed { label, reason } => write!(f, "{}: {}", label, reason),
            FetchError::ResourceNotFound { resource } => {
                write!(f, "Resource not found: {}", resource)
            }
        }
    }
}

impl std::error::Error for FetchError {}

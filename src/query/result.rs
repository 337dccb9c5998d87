//! Query results and their view-level rendering.

use serde::Serialize;

use crate::error::FetchError;

/// What a mounted query currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult<T> {
    /// Not mounted.
    Idle,
    Loading,
    Success(T),
    Failure(FetchError),
}

impl<T> QueryResult<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryResult::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, QueryResult::Success(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            QueryResult::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            QueryResult::Failure(err) => Some(err),
            _ => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> QueryResult<U> {
        match self {
            QueryResult::Idle => QueryResult::Idle,
            QueryResult::Loading => QueryResult::Loading,
            QueryResult::Success(data) => QueryResult::Success(f(data)),
            QueryResult::Failure(err) => QueryResult::Failure(err),
        }
    }
}

impl<T> From<Result<T, FetchError>> for QueryResult<T> {
    fn from(result: Result<T, FetchError>) -> Self {
        match result {
            Ok(data) => QueryResult::Success(data),
            Err(err) => QueryResult::Failure(err),
        }
    }
}

/// Render state of a data-backed view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ViewStatus<T> {
    Loading,
    Error { message: String, retryable: bool },
    NotFound { message: String },
    Ready { data: T },
}

impl<T> ViewStatus<T> {
    /// Idle and loading both render as loading.
    pub fn from_result(result: QueryResult<T>) -> Self {
        match result {
            QueryResult::Idle | QueryResult::Loading => ViewStatus::Loading,
            QueryResult::Success(data) => ViewStatus::Ready { data },
            QueryResult::Failure(err) => Self::from_error(&err),
        }
    }

    /// A successful fetch with no record renders the not-found message for
    /// `resource` instead of an error.
    pub fn from_optional(result: QueryResult<Option<T>>, resource: &str) -> Self {
        match result {
            QueryResult::Idle | QueryResult::Loading => ViewStatus::Loading,
            QueryResult::Success(Some(data)) => ViewStatus::Ready { data },
            QueryResult::Success(None) => ViewStatus::NotFound {
                message: FetchError::ResourceNotFound {
                    resource: resource.to_string(),
                }
                .user_message(),
            },
            QueryResult::Failure(err) => Self::from_error(&err),
        }
    }

    fn from_error(err: &FetchError) -> Self {
        match err {
            FetchError::ResourceNotFound { .. } => ViewStatus::NotFound {
                message: err.user_message(),
            },
            FetchError::Failed { .. } => ViewStatus::Error {
                message: err.user_message(),
                retryable: err.is_retryable(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ViewStatus::Ready { .. })
    }
}

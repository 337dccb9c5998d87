//! Response envelope of the backend API.
//!
//! Every resource endpoint answers with either `{ "data": T }` or
//! `{ "error": "..." }`; the HTTP status is the `ok` discriminant.

use serde::Deserialize;

/// Decoded response body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ApiEnvelope<T> {
    // Error first: a missing `data` field decodes as `None` when `T` is an
    // `Option`, so the data arm would otherwise swallow error bodies.
    Error { error: String },
    Data { data: T },
}

impl<T> ApiEnvelope<T> {
    /// Convert the envelope into a plain result, keeping the server's error text.
    pub fn into_result(self) -> Result<T, String> {
        match self {
            ApiEnvelope::Data { data } => Ok(data),
            ApiEnvelope::Error { error } => Err(error),
        }
    }
}

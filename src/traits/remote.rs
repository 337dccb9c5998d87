//! Remote data client trait abstraction.
//!
//! The backend exposes per-resource endpoints of the shape
//! `GET /api/<namespace>/<resource>[/<id>]`, where store-scoped resources
//! nest under `stores/<storeId>`. This crate treats the backend as opaque
//! beyond the success/error discriminant.

use async_trait::async_trait;
use serde::Serialize;
use std::fmt;

use crate::error::FetchError;

/// Address of one backend resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResourcePath {
    pub namespace: String,
    pub segments: Vec<String>,
}

impl ResourcePath {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            segments: Vec::new(),
        }
    }

    /// Append one path segment (resource name or id).
    pub fn segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    /// Render the request path. Segments are percent-encoded since ids come
    /// straight from route parameters.
    pub fn to_path(&self) -> String {
        let mut path = format!("/api/{}", urlencoding::encode(&self.namespace));
        for segment in &self.segments {
            path.push('/');
            path.push_str(&urlencoding::encode(segment));
        }
        path
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path())
    }
}

/// Trait for requests to the backend API.
///
/// Implementations return the `data` member of a success envelope. Transport
/// errors, non-2xx statuses, error envelopes, and undecodable bodies are all
/// `FetchError::Failed`.
#[async_trait]
pub trait RemoteDataClient: Send + Sync {
    async fn get(&self, path: &ResourcePath) -> Result<serde_json::Value, FetchError>;
}

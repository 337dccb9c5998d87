//! Typed query definitions.

use serde::de::DeserializeOwned;
use std::fmt;
use std::marker::PhantomData;

use crate::error::FetchError;
use crate::traits::{RemoteDataClient, ResourcePath};

use super::key::QueryKey;

/// Cache key, endpoint and failure label of one query.
pub struct QuerySpec<T> {
    key: QueryKey,
    path: ResourcePath,
    label: String,
    _data: PhantomData<fn() -> T>,
}

impl<T> QuerySpec<T> {
    pub fn new(key: QueryKey, path: ResourcePath, label: impl Into<String>) -> Self {
        Self {
            key,
            path,
            label: label.into(),
            _data: PhantomData,
        }
    }

    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    pub fn path(&self) -> &ResourcePath {
        &self.path
    }

    /// Descriptive failure kind, e.g. "fetch active users failed".
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl<T: DeserializeOwned> QuerySpec<T> {
    /// Fetch and decode. Every failure carries this query's label.
    pub async fn fetch(&self, client: &dyn RemoteDataClient) -> Result<T, FetchError> {
        let value = client
            .get(&self.path)
            .await
            .map_err(|err| err.relabel(&self.label))?;

        serde_json::from_value(value)
            .map_err(|err| FetchError::failed(&self.label, format!("unexpected payload: {}", err)))
    }
}

impl<T> Clone for QuerySpec<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            path: self.path.clone(),
            label: self.label.clone(),
            _data: PhantomData,
        }
    }
}

impl<T> fmt::Debug for QuerySpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuerySpec")
            .field("key", &self.key)
            .field("path", &self.path.to_path())
            .field("label", &self.label)
            .finish()
    }
}

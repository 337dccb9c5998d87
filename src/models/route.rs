//! Route invocation data: the untrusted path and query parameters of one
//! navigation.

use serde::Serialize;
use std::collections::BTreeMap;

/// String-keyed parameter mapping. Values are passed through verbatim.
pub type RouteParams = BTreeMap<String, String>;

/// Query-string parameters of an invocation.
pub type QueryParams = BTreeMap<String, String>;

/// A single route invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteInvocation {
    /// The concrete path that was requested, without the query string.
    pub path: String,
    /// Path parameters captured by the route pattern (`storeId`, `orderId`, ...).
    pub params: RouteParams,
    /// Query-string parameters (`error`, `orderId`, ...).
    pub query: QueryParams,
}

impl RouteInvocation {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }
}

//! Backend API client.
//!
//! [`ApiClient`] implements [`RemoteDataClient`] over any [`HttpClient`]:
//! it joins resource paths onto the configured base URL, attaches the
//! bearer token, and unwraps the `{ data }` / `{ error }` envelope.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::{ConfigError, FetchError};
use crate::models::ApiEnvelope;
use crate::traits::{Headers, HttpClient, RemoteDataClient, ResourcePath};

use super::ReqwestHttpClient;

/// Remote data client for the storefront backend.
#[derive(Clone)]
pub struct ApiClient {
    http: Arc<dyn HttpClient>,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client over an existing HTTP transport.
    pub fn new(http: Arc<dyn HttpClient>, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Create a reqwest-backed client from configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let http = ReqwestHttpClient::with_timeout(config.request_timeout)
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        let client = Self::new(Arc::new(http), config.api_base_url.clone());
        Ok(match config.api_token {
            Some(ref token) => client.with_token(token.clone()),
            None => client,
        })
    }

    /// Attach a bearer token to every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of a resource.
    pub fn url_for(&self, path: &ResourcePath) -> String {
        format!("{}{}", self.base_url, path.to_path())
    }

    fn headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        if let Some(ref token) = self.token {
            headers.insert("Authorization".to_string(), format!("Bearer {}", token));
        }
        headers
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("has_token", &self.token.is_some())
            .finish()
    }
}

#[async_trait]
impl RemoteDataClient for ApiClient {
    async fn get(&self, path: &ResourcePath) -> Result<serde_json::Value, FetchError> {
        let url = self.url_for(path);
        let label = format!("GET {}", path);

        let response = self
            .http
            .get(&url, &self.headers())
            .await
            .map_err(|e| FetchError::failed(&label, e.to_string()))?;

        let envelope = response.json::<ApiEnvelope<serde_json::Value>>();

        if !response.is_success() {
            let reason = match envelope {
                Ok(ApiEnvelope::Error { error }) => format!("HTTP {}: {}", response.status, error),
                _ => format!("HTTP {}", response.status),
            };
            tracing::debug!("{} failed: {}", label, reason);
            return Err(FetchError::failed(label, reason));
        }

        match envelope {
            Ok(env) => env.into_result().map_err(|error| {
                tracing::debug!("{} returned error envelope", label);
                FetchError::failed(&label, error)
            }),
            Err(e) => Err(FetchError::failed(
                label,
                format!("invalid response body: {}", e),
            )),
        }
    }
}

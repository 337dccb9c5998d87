//! Mock implementations for test fixtures.
//!
//! This module re-exports the mock implementations from
//! `storedash::adapters::mock` and provides builder-style configuration.

pub use storedash::adapters::mock::http::MockResponse;
pub use storedash::adapters::mock::{MockHttpClient, MockSessionProvider};
pub use storedash::traits::{Headers, HttpClient, HttpError, Response};

use bytes::Bytes;

/// Configuration for setting up mock HTTP responses.
pub struct MockHttpConfig {
    client: MockHttpClient,
}

impl MockHttpConfig {
    /// Creates a new mock HTTP configuration.
    pub fn new() -> Self {
        Self {
            client: MockHttpClient::new(),
        }
    }

    /// Configures a `{ "data": ... }` success envelope.
    pub fn with_data(self, url: &str, data: serde_json::Value) -> Self {
        self.client
            .set_json(url, 200, serde_json::json!({ "data": data }));
        self
    }

    /// Configures a `{ "error": ... }` envelope with the given status.
    pub fn with_error_envelope(self, url: &str, status: u16, message: &str) -> Self {
        self.client
            .set_json(url, status, serde_json::json!({ "error": message }));
        self
    }

    /// Configures a raw body.
    #[allow(dead_code)]
    pub fn with_body(self, url: &str, status: u16, body: &str) -> Self {
        self.client.set_response(
            url,
            MockResponse::Success(Response::new(status, Bytes::from(body.to_string()))),
        );
        self
    }

    /// Configures a transport failure.
    #[allow(dead_code)]
    pub fn with_transport_error(self, url: &str, error: HttpError) -> Self {
        self.client.set_response(url, MockResponse::Error(error));
        self
    }

    /// Builds the configured MockHttpClient.
    pub fn build(self) -> MockHttpClient {
        self.client
    }
}

impl Default for MockHttpConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_with_data_wraps_envelope() {
        let client = MockHttpConfig::new()
            .with_data("http://api.test/api/admin/users", serde_json::json!([]))
            .build();

        let response = client
            .get("http://api.test/api/admin/users", &Headers::new())
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(
            response.json::<serde_json::Value>().unwrap(),
            serde_json::json!({"data": []})
        );
    }

    #[tokio::test]
    async fn test_transport_error() {
        let client = MockHttpConfig::new()
            .with_transport_error(
                "http://api.test/api/admin/users",
                HttpError::Timeout("slow".to_string()),
            )
            .build();

        let result = client
            .get("http://api.test/api/admin/users", &Headers::new())
            .await;
        assert!(result.is_err());
    }
}

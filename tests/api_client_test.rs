//! Backend API client over the reqwest transport, using wiremock.

use std::sync::Arc;
use std::time::Duration;

use storedash::adapters::{ApiClient, ReqwestHttpClient};
use storedash::config::AppConfig;
use storedash::error::FetchError;
use storedash::models::Product;
use storedash::query::{QueryCache, QueryHook, QueryResult};
use storedash::resources;
use storedash::traits::{RemoteDataClient, ResourcePath};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_token() -> String {
    "test-api-token".to_string()
}

fn client_for(server: &MockServer) -> ApiClient {
    let config = AppConfig::new()
        .with_api_base_url(server.uri())
        .with_api_token(test_token())
        .with_request_timeout(Duration::from_secs(5));
    ApiClient::from_config(&config).unwrap()
}

#[tokio::test]
async fn test_get_sends_bearer_and_unwraps_data() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/stores/s1/products"))
        .and(header("Authorization", format!("Bearer {}", test_token())))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{"id": 7, "name": "Fries", "price": 3.0}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let path = ResourcePath::new("stores").segment("s1").segment("products");
    let value = client.get(&path).await.unwrap();

    assert_eq!(value[0]["name"], "Fries");
}

#[tokio::test]
async fn test_non_success_status_is_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/active-users"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(serde_json::json!({"error": "forbidden"})),
        )
        .mount(&server)
        .await;

    let hook = QueryHook::new(QueryCache::new());
    let client: Arc<dyn RemoteDataClient> = Arc::new(client_for(&server));
    let result = hook.mount(&resources::active_users(), client).await;

    assert_eq!(
        result,
        QueryResult::Failure(FetchError::failed(
            "fetch active users failed",
            "HTTP 403: forbidden"
        ))
    );
}

#[tokio::test]
async fn test_error_envelope_with_ok_status_is_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/affiliates"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"error": "no access"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .get(&ResourcePath::new("admin").segment("affiliates"))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        FetchError::failed("GET /api/admin/affiliates", "no access")
    );
}

#[tokio::test]
async fn test_garbage_body_is_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/stores/s1/products"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = Arc::new(client_for(&server));
    let result = resources::products("s1").fetch(client.as_ref()).await;

    match result {
        Err(FetchError::Failed { label, reason }) => {
            assert_eq!(label, "fetch products failed");
            assert!(reason.starts_with("invalid response body"));
        }
        other => panic!("expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_typed_decode_of_products() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/stores/s1/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{"id": "p1", "name": "Soda", "price": 2.5, "isAvailable": true}]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let products: Vec<Product> = resources::products("s1").fetch(&client).await.unwrap();

    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, "p1");
    assert!(products[0].is_available);
}

#[tokio::test]
async fn test_unreachable_backend_is_failure() {
    let http = ReqwestHttpClient::with_timeout(Duration::from_millis(500)).unwrap();
    // Port 9 (discard) is not expected to accept HTTP connections.
    let client = ApiClient::new(Arc::new(http), "http://127.0.0.1:9");

    let err = client
        .get(&ResourcePath::new("admin").segment("users"))
        .await
        .unwrap_err();

    assert!(err.is_retryable());
}

//! Query hook behaviour against the API client and a mock transport.

mod common;

use common::*;
use storedash::error::FetchError;
use storedash::models::UserSummary;
use storedash::query::{QueryCache, QueryHook, QueryResult, ViewStatus};
use storedash::resources;

fn users_url() -> String {
    url("/api/admin/users")
}

fn active_users_url() -> String {
    url("/api/admin/active-users")
}

#[tokio::test]
async fn test_two_consumers_share_one_request() {
    let http = MockHttpConfig::new()
        .with_data(&users_url(), sample_users())
        .build();
    let client = api_client(&http);
    let cache: QueryCache<Vec<UserSummary>> = QueryCache::new();

    let table = QueryHook::new(cache.clone());
    let sidebar = QueryHook::new(cache.clone());
    let spec = resources::users();

    let (a, b) = tokio::join!(
        table.mount(&spec, client.clone()),
        sidebar.mount(&spec, client.clone())
    );

    assert!(a.is_success());
    assert_eq!(a, b);
    assert_eq!(a.data().map(Vec::len), Some(2));
    assert_eq!(http.request_count_for(&users_url()), 1);

    // A later consumer is served from the cache.
    let late = QueryHook::new(cache);
    late.mount(&spec, client).await;
    assert_eq!(http.request_count_for(&users_url()), 1);
}

#[tokio::test]
async fn test_failure_carries_descriptive_label() {
    let http = MockHttpConfig::new()
        .with_error_envelope(&active_users_url(), 503, "maintenance")
        .build();
    let hook = QueryHook::new(QueryCache::new());

    let result = hook.mount(&resources::active_users(), api_client(&http)).await;

    assert_eq!(
        result,
        QueryResult::Failure(FetchError::failed(
            "fetch active users failed",
            "HTTP 503: maintenance"
        ))
    );
    assert_eq!(hook.state(), result);
}

#[tokio::test]
async fn test_manual_retry_after_failure() {
    let http = MockHttpConfig::new()
        .with_error_envelope(&users_url(), 500, "boom")
        .build();
    let hook = QueryHook::new(QueryCache::new());
    let client = api_client(&http);

    let first = hook.mount(&resources::users(), client.clone()).await;
    assert!(matches!(
        ViewStatus::from_result(first),
        ViewStatus::Error { retryable: true, .. }
    ));

    http.set_json(
        &users_url(),
        200,
        serde_json::json!({ "data": sample_users() }),
    );
    let retried = hook.refetch().await;

    assert!(retried.is_success());
    assert_eq!(http.request_count_for(&users_url()), 2);
}

#[tokio::test]
async fn test_remount_after_failure_does_not_refetch() {
    let http = MockHttpConfig::new()
        .with_error_envelope(&users_url(), 500, "boom")
        .build();
    let client = api_client(&http);
    let cache = QueryCache::new();
    let spec = resources::users();

    let first = QueryHook::new(cache.clone()).mount(&spec, client.clone()).await;
    http.set_json(
        &users_url(),
        200,
        serde_json::json!({ "data": sample_users() }),
    );
    let second = QueryHook::new(cache).mount(&spec, client).await;

    assert!(first.error().is_some());
    assert_eq!(first, second);
    assert_eq!(http.request_count_for(&users_url()), 1);
}

#[tokio::test]
async fn test_invalidating_a_store_refetches_its_resources() {
    let http = MockHttpConfig::new()
        .with_data(&products_url(STORE_ID), sample_products())
        .build();
    let client = api_client(&http);
    let cache = QueryCache::new();
    let hook = QueryHook::new(cache.clone());
    let spec = resources::products(STORE_ID);

    hook.mount(&spec, client.clone()).await;
    assert_eq!(cache.invalidate_prefix(&resources::store_prefix(STORE_ID)), 1);
    hook.mount(&spec, client).await;

    assert_eq!(http.request_count_for(&products_url(STORE_ID)), 2);
}

#[tokio::test]
async fn test_unmount_returns_to_idle() {
    let http = MockHttpConfig::new()
        .with_data(&users_url(), sample_users())
        .build();
    let hook = QueryHook::new(QueryCache::new());

    hook.mount(&resources::users(), api_client(&http)).await;
    hook.unmount();

    assert_eq!(hook.state(), QueryResult::Idle);
    assert_eq!(hook.key(), None);
}

#[tokio::test]
async fn test_transport_error_becomes_failure() {
    let http = MockHttpConfig::new()
        .with_transport_error(&users_url(), HttpError::ConnectionFailed("refused".to_string()))
        .build();
    let hook = QueryHook::new(QueryCache::new());

    let result = hook.mount(&resources::users(), api_client(&http)).await;

    match result {
        QueryResult::Failure(FetchError::Failed { label, reason }) => {
            assert_eq!(label, "fetch users failed");
            assert!(reason.contains("refused"));
        }
        other => panic!("expected failure, got {:?}", other),
    }
}

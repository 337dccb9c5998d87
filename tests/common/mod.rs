//! Common test utilities for integration tests.
//!
//! Fixtures for sessions, resolvers and backend payloads shared by the
//! integration tests.
//!
//! # Example
//!
//! ```ignore
//! let http = MockHttpConfig::new()
//!     .with_data(&products_url(STORE_ID), sample_products())
//!     .build();
//! let client = api_client(&http);
//! ```

pub mod mocks;

pub use mocks::*;

use std::sync::Arc;

use storedash::adapters::ApiClient;
use storedash::gate::GatedViewResolver;
use storedash::models::Role;
use storedash::traits::RemoteDataClient;

/// Base URL the mock HTTP client answers for.
pub const API_BASE: &str = "http://api.test";

/// Store used across the dashboard scenarios.
pub const STORE_ID: &str = "store-1";

/// Provider for a signed-in store owner.
pub fn owner_session() -> MockSessionProvider {
    MockSessionProvider::signed_in("u1", Role::User)
}

/// Provider for a signed-in administrator.
pub fn admin_session() -> MockSessionProvider {
    MockSessionProvider::signed_in("root", Role::Admin)
}

pub fn resolver(provider: &MockSessionProvider) -> GatedViewResolver {
    GatedViewResolver::new(Arc::new(provider.clone()))
}

/// API client over the given mock transport.
pub fn api_client(http: &MockHttpClient) -> Arc<dyn RemoteDataClient> {
    Arc::new(ApiClient::new(Arc::new(http.clone()), API_BASE))
}

pub fn url(path: &str) -> String {
    format!("{}{}", API_BASE, path)
}

pub fn products_url(store_id: &str) -> String {
    url(&format!("/api/stores/{}/products", store_id))
}

pub fn categories_url(store_id: &str) -> String {
    url(&format!("/api/stores/{}/categories", store_id))
}

pub fn sample_products() -> serde_json::Value {
    serde_json::json!([
        {"id": 1, "name": "Margherita", "price": 9.5, "categoryId": "c1", "isAvailable": true},
        {"id": "p2", "name": "Calzone", "price": 11.0}
    ])
}

pub fn sample_categories() -> serde_json::Value {
    serde_json::json!([
        {"id": "c1", "name": "Pizzas", "productCount": 2}
    ])
}

pub fn sample_users() -> serde_json::Value {
    serde_json::json!([
        {"id": "u1", "name": "Ana", "email": "ana@example.com", "role": "USER", "isActive": true},
        {"id": "u2", "email": "bo@example.com", "role": "ADMIN"}
    ])
}

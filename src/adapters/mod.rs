//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`ApiClient`] - Backend API client over any `HttpClient`
//! - [`StaticSessionProvider`] - Fixed session, optionally from the environment
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockHttpClient`] - Configurable HTTP responses
//! - [`mock::MockSessionProvider`] - Configurable session lookups

pub mod api_client;
pub mod mock;
pub mod reqwest_http;
pub mod static_session;

pub use api_client::ApiClient;
pub use mock::{MockHttpClient, MockSessionProvider};
pub use reqwest_http::ReqwestHttpClient;
pub use static_session::StaticSessionProvider;

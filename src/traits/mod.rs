//! Trait abstractions for the external collaborators.
//!
//! # Traits
//!
//! - [`SessionProvider`] - Resolves the session of the current request
//! - [`HttpClient`] - HTTP GET transport
//! - [`RemoteDataClient`] - Backend API requests returning envelope payloads

pub mod http;
pub mod remote;
pub mod session;

pub use http::{Headers, HttpClient, HttpError, Response};
pub use remote::{RemoteDataClient, ResourcePath};
pub use session::{SessionError, SessionProvider};

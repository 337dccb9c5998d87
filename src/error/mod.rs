//! Unified error handling for storedash.
//!
//! - **Error Categories**: High-level classification for handling decisions
//! - **Domain-specific Errors**: Gate, Fetch, Store and Config errors
//! - **Unified Error Type**: `DashError` consolidates all error types
//! - **Error Context**: Route/store information attached to errors
//! - **Result Type Alias**: `DashResult<T>` for consistent return types
//!
//! # Propagation
//!
//! | Error | Where it is handled |
//! |-------|---------------------|
//! | `GateError` | Inside the gated view resolver; becomes the denial view |
//! | `FetchError` | Surfaced as query hook state, rendered inline by the view |
//! | `StoreError` | Returned to the caller of the store registry |
//! | `ConfigError` | Returned from `AppConfig::from_env` |

mod category;
mod config;
mod context;
mod dash_error;
mod fetch;
mod gate;
mod result;
mod store;

pub use category::ErrorCategory;
pub use config::ConfigError;
pub use context::ErrorContext;
pub use dash_error::DashError;
pub use fetch::FetchError;
pub use gate::GateError;
pub use result::{DashResult, ResultExt};
pub use store::StoreError;

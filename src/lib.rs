//! storedash - session-gated storefront dashboard core
//!
//! Route resolution behind authorization predicates, observable UI-state
//! stores for dialogs and drawers, and cached remote queries. This library
//! exposes modules for use by the binary and by integration tests.

pub mod adapters;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod gate;
pub mod logging;
pub mod models;
pub mod query;
pub mod resources;
pub mod routes;
pub mod traits;
pub mod ui_store;

//! Cached remote queries.
//!
//! - [`QueryCache`] maps a [`QueryKey`] to a settled outcome or a shared
//!   in-flight fetch, with explicit invalidation.
//! - [`QueryCaches`] holds one cache per payload type for a whole session.
//! - [`QueryHook`] is one consumer's view of a key: `Idle`, `Loading`,
//!   `Success` or `Failure`, never a panic.
//! - [`QuerySpec`] ties a key to its endpoint and failure label.
//! - [`ViewStatus`] is what a page renders from a hook's result.

mod cache;
mod caches;
mod definition;
mod hook;
mod key;
mod result;

pub use cache::QueryCache;
pub use caches::QueryCaches;
pub use definition::QuerySpec;
pub use hook::QueryHook;
pub use key::QueryKey;
pub use result::{QueryResult, ViewStatus};

//! Storefront routing.
//!
//! A [`RouteTable`] maps path patterns to gated feature views. Navigating to
//! a path matches it, extracts parameters, runs the authorization gate and
//! yields either the page, the denial view or a not-found message.

mod page;
mod pattern;
mod table;

pub use page::{Page, PageQuery};
pub use pattern::{parse_query, RoutePattern};
pub use table::{Navigation, RouteTable};

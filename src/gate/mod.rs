//! Session-gated view resolution.
//!
//! ```text
//! route render
//!     │
//!     ▼
//! SessionProvider::get_session   (once, never cached)
//!     │
//!     ├── error / none / no identity ──► DenialView
//!     │
//!     ▼
//! AuthorizationPredicate::allows
//!     │
//!     ├── false ──► DenialView
//!     │
//!     ▼
//! view constructor(ViewInputs)   (declared params / identity only)
//! ```

mod predicate;
mod resolver;
mod view;

pub use predicate::{AllOf, AnyOf, Authenticated, AuthorizationPredicate, FnPredicate, RequireRole};
pub use resolver::{GatedRoute, GatedViewResolver, Resolution};
pub use view::{DenialView, ViewDependencies, ViewInputs};

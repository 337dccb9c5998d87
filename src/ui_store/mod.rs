//! Observable UI-state stores.
//!
//! One store per dialog-like concern (modals, drawers, sheets). Stores are
//! looked up by name through a [`StoreRegistry`]; the process-wide instance
//! is [`global_registry`].

mod concerns;
mod registry;
mod store;

pub use concerns::{
    Concern, ConcernStore, AFFILIATE_MODAL, CASH_REPORT_MODAL, CATEGORY_MODAL, COMBO_MODAL,
    CUSTOMER_MODAL, DELIVERER_MODAL, DELIVERY_AREA_MODAL, EMPLOYEE_MODAL, MOBILE_SIDEBAR_SHEET,
    ORDER_DETAILS_DRAWER, PRODUCT_MODAL,
};
pub use registry::{global_registry, StoreRegistry};
pub use store::{SubscriptionId, UiStore, UiStoreState};

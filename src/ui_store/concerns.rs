//! Named storefront concerns.
//!
//! Each concern is its own store with no coupling to the others. Record
//! modals carry the id of the record being edited; an open modal without a
//! payload means "create".

use std::fmt;
use std::marker::PhantomData;

use crate::error::StoreError;
use crate::models::CashReportData;

use super::registry::{global_registry, StoreRegistry};
use super::store::{SubscriptionId, UiStore, UiStoreState};

/// A concern name bound to its payload type.
pub struct Concern<T> {
    name: &'static str,
    carries_payload: bool,
    _payload: PhantomData<fn() -> T>,
}

impl<T> Concern<T> {
    pub const fn data(name: &'static str) -> Self {
        Self {
            name,
            carries_payload: true,
            _payload: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn carries_payload(&self) -> bool {
        self.carries_payload
    }
}

impl Concern<()> {
    pub const fn flag(name: &'static str) -> Self {
        Self {
            name,
            carries_payload: false,
            _payload: PhantomData,
        }
    }
}

impl<T: Clone + Send + 'static> Concern<T> {
    pub(crate) fn build(&self) -> UiStore<T> {
        UiStore::build(self.name.to_string(), self.carries_payload)
    }
}

impl<T> fmt::Debug for Concern<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Concern").field("name", &self.name).finish()
    }
}

pub const CASH_REPORT_MODAL: Concern<CashReportData> = Concern::data("cash-report-modal");
pub const PRODUCT_MODAL: Concern<String> = Concern::data("product-modal");
pub const CATEGORY_MODAL: Concern<String> = Concern::data("category-modal");
pub const COMBO_MODAL: Concern<String> = Concern::data("combo-modal");
pub const EMPLOYEE_MODAL: Concern<String> = Concern::data("employee-modal");
pub const DELIVERER_MODAL: Concern<String> = Concern::data("deliverer-modal");
pub const DELIVERY_AREA_MODAL: Concern<String> = Concern::data("delivery-area-modal");
pub const CUSTOMER_MODAL: Concern<String> = Concern::data("customer-modal");
pub const AFFILIATE_MODAL: Concern<String> = Concern::data("affiliate-modal");
pub const ORDER_DETAILS_DRAWER: Concern<String> = Concern::data("order-details-drawer");
pub const MOBILE_SIDEBAR_SHEET: Concern<()> = Concern::flag("mobile-sidebar-sheet");

/// Modal-style wrapper around a concern's store.
pub struct ConcernStore<T> {
    store: UiStore<T>,
}

impl<T> Clone for ConcernStore<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<T> fmt::Debug for ConcernStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ConcernStore").field(&self.store).finish()
    }
}

impl<T: Clone + Send + 'static> ConcernStore<T> {
    /// The concern's store in `registry`.
    pub fn in_registry(registry: &StoreRegistry, concern: &Concern<T>) -> Result<Self, StoreError> {
        Ok(Self {
            store: registry.store(concern)?,
        })
    }

    /// The concern's store in the process-wide registry.
    pub fn global(concern: &Concern<T>) -> Result<Self, StoreError> {
        Self::in_registry(global_registry(), concern)
    }

    pub fn open_modal(&self, payload: T) {
        self.store.open(Some(payload));
    }

    /// Open without a payload, e.g. a "create" form.
    pub fn open_empty(&self) {
        self.store.open(None);
    }

    pub fn close_modal(&self) {
        self.store.close();
    }

    pub fn is_open(&self) -> bool {
        self.store.is_open()
    }

    pub fn data(&self) -> Option<T> {
        self.store.read().payload
    }

    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&UiStoreState<T>) + Send + Sync + 'static,
    {
        self.store.subscribe(observer)
    }

    pub fn store(&self) -> &UiStore<T> {
        &self.store
    }
}

//! Backend resources consumed by the storefront pages.
//!
//! Store-scoped resources live under `/api/stores/<storeId>/...`, admin
//! resources under `/api/admin/...`. Cache keys mirror the request path so
//! that `invalidate_prefix` on `stores/<storeId>` drops everything for one
//! store.

use crate::models::{
    Affiliate, Category, Combo, Customer, Deliverer, DeliveryArea, Employee, Order, Product,
    Subscription, UserId, UserSummary,
};
use crate::query::{QueryKey, QuerySpec};
use crate::traits::ResourcePath;

fn query<T>(parts: &[&str], label: &str) -> QuerySpec<T> {
    let (namespace, rest) = match parts.split_first() {
        Some((namespace, rest)) => (*namespace, rest),
        None => ("", &[][..]),
    };

    let mut key = QueryKey::new(namespace);
    let mut path = ResourcePath::new(namespace);
    for part in rest {
        key = key.part(*part);
        path = path.segment(*part);
    }
    QuerySpec::new(key, path, label)
}

/// Cache key prefix covering every resource of one store.
pub fn store_prefix(store_id: &str) -> QueryKey {
    QueryKey::new("stores").part(store_id)
}

// ============================================================================
// Store-scoped
// ============================================================================

pub fn products(store_id: &str) -> QuerySpec<Vec<Product>> {
    query(&["stores", store_id, "products"], "fetch products failed")
}

pub fn categories(store_id: &str) -> QuerySpec<Vec<Category>> {
    query(&["stores", store_id, "categories"], "fetch categories failed")
}

pub fn combos(store_id: &str) -> QuerySpec<Vec<Combo>> {
    query(&["stores", store_id, "combos"], "fetch combos failed")
}

pub fn employees(store_id: &str) -> QuerySpec<Vec<Employee>> {
    query(&["stores", store_id, "employees"], "fetch employees failed")
}

pub fn deliverers(store_id: &str) -> QuerySpec<Vec<Deliverer>> {
    query(&["stores", store_id, "deliverers"], "fetch deliverers failed")
}

pub fn delivery_areas(store_id: &str) -> QuerySpec<Vec<DeliveryArea>> {
    query(
        &["stores", store_id, "delivery-areas"],
        "fetch delivery areas failed",
    )
}

pub fn customers(store_id: &str) -> QuerySpec<Vec<Customer>> {
    query(&["stores", store_id, "customers"], "fetch customers failed")
}

pub fn orders(store_id: &str) -> QuerySpec<Vec<Order>> {
    query(&["stores", store_id, "orders"], "fetch orders failed")
}

pub fn order(store_id: &str, order_id: &str) -> QuerySpec<Option<Order>> {
    query(&["stores", store_id, "orders", order_id], "fetch order failed")
}

// ============================================================================
// Admin
// ============================================================================

pub fn users() -> QuerySpec<Vec<UserSummary>> {
    query(&["admin", "users"], "fetch users failed")
}

pub fn active_users() -> QuerySpec<Vec<UserSummary>> {
    query(&["admin", "active-users"], "fetch active users failed")
}

pub fn user(user_id: &str) -> QuerySpec<Option<UserSummary>> {
    query(&["admin", "users", user_id], "fetch user failed")
}

pub fn affiliates() -> QuerySpec<Vec<Affiliate>> {
    query(&["admin", "affiliates"], "fetch affiliates failed")
}

pub fn affiliate(affiliate_id: &str) -> QuerySpec<Option<Affiliate>> {
    query(&["admin", "affiliates", affiliate_id], "fetch affiliate failed")
}

pub fn subscriptions() -> QuerySpec<Vec<Subscription>> {
    query(&["admin", "subscriptions"], "fetch subscriptions failed")
}

// ============================================================================
// Account
// ============================================================================

pub fn subscription_for(user: &UserId) -> QuerySpec<Option<Subscription>> {
    query(
        &["users", user.as_str(), "subscription"],
        "fetch subscription failed",
    )
}

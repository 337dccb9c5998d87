//! Storefront feature views.

use futures::future::{BoxFuture, FutureExt};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use crate::models::UserId;
use crate::query::{QueryCaches, QueryHook, QueryKey, QuerySpec, ViewStatus};
use crate::resources;
use crate::traits::RemoteDataClient;

/// An authorized page, built from exactly the inputs its route declares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "page", rename_all = "camelCase")]
pub enum Page {
    #[serde(rename_all = "camelCase")]
    Overview { store_id: String },
    #[serde(rename_all = "camelCase")]
    Products { store_id: String },
    #[serde(rename_all = "camelCase")]
    Categories { store_id: String },
    #[serde(rename_all = "camelCase")]
    Combos { store_id: String },
    #[serde(rename_all = "camelCase")]
    Employees { store_id: String },
    #[serde(rename_all = "camelCase")]
    Deliverers { store_id: String },
    #[serde(rename_all = "camelCase")]
    DeliveryAreas { store_id: String },
    #[serde(rename_all = "camelCase")]
    Customers { store_id: String },
    #[serde(rename_all = "camelCase")]
    Orders { store_id: String },
    #[serde(rename_all = "camelCase")]
    OrderDetail { store_id: String, order_id: String },
    #[serde(rename_all = "camelCase")]
    Settings {
        store_id: String,
        user_id: Option<UserId>,
    },
    AdminUsers,
    #[serde(rename_all = "camelCase")]
    AdminUserDetail { user_id: String },
    AdminAffiliates,
    #[serde(rename_all = "camelCase")]
    AdminAffiliateDetail { affiliate_id: String },
    AdminSubscriptions,
    #[serde(rename_all = "camelCase")]
    PaymentError {
        error: Option<String>,
        order_id: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    PaymentSuccess {
        order_id: Option<String>,
        user_id: Option<UserId>,
    },
    #[serde(rename_all = "camelCase")]
    Account { user_id: Option<UserId> },
}

impl Page {
    /// Queries this page mounts once it is authorized.
    pub fn queries(&self) -> Vec<PageQuery> {
        match self {
            Page::Overview { store_id } => {
                vec![PageQuery::list("orders", resources::orders(store_id))]
            }
            Page::Products { store_id } => vec![
                PageQuery::list("products", resources::products(store_id)),
                PageQuery::list("categories", resources::categories(store_id)),
            ],
            Page::Categories { store_id } => {
                vec![PageQuery::list("categories", resources::categories(store_id))]
            }
            Page::Combos { store_id } => vec![
                PageQuery::list("combos", resources::combos(store_id)),
                PageQuery::list("products", resources::products(store_id)),
            ],
            Page::Employees { store_id } => {
                vec![PageQuery::list("employees", resources::employees(store_id))]
            }
            Page::Deliverers { store_id } => {
                vec![PageQuery::list("deliverers", resources::deliverers(store_id))]
            }
            Page::DeliveryAreas { store_id } => vec![PageQuery::list(
                "deliveryAreas",
                resources::delivery_areas(store_id),
            )],
            Page::Customers { store_id } => {
                vec![PageQuery::list("customers", resources::customers(store_id))]
            }
            Page::Orders { store_id } => {
                vec![PageQuery::list("orders", resources::orders(store_id))]
            }
            Page::OrderDetail { store_id, order_id } => vec![PageQuery::record(
                "order",
                resources::order(store_id, order_id),
                "Order",
            )],
            Page::AdminUsers => vec![
                PageQuery::list("users", resources::users()),
                PageQuery::list("activeUsers", resources::active_users()),
            ],
            Page::AdminUserDetail { user_id } => {
                vec![PageQuery::record("user", resources::user(user_id), "User")]
            }
            Page::AdminAffiliates => {
                vec![PageQuery::list("affiliates", resources::affiliates())]
            }
            Page::AdminAffiliateDetail { affiliate_id } => vec![PageQuery::record(
                "affiliate",
                resources::affiliate(affiliate_id),
                "Affiliate",
            )],
            Page::AdminSubscriptions => {
                vec![PageQuery::list("subscriptions", resources::subscriptions())]
            }
            Page::Account { user_id: Some(user) } => vec![PageQuery::record(
                "subscription",
                resources::subscription_for(user),
                "Subscription",
            )],
            Page::Account { user_id: None }
            | Page::Settings { .. }
            | Page::PaymentError { .. }
            | Page::PaymentSuccess { .. } => Vec::new(),
        }
    }
}

type Loader = Arc<
    dyn Fn(Arc<dyn RemoteDataClient>, QueryCaches) -> BoxFuture<'static, ViewStatus<serde_json::Value>>
        + Send
        + Sync,
>;

/// One query of a page, with its payload type erased for rendering.
#[derive(Clone)]
pub struct PageQuery {
    name: &'static str,
    key: QueryKey,
    label: String,
    loader: Loader,
}

impl PageQuery {
    /// A collection query.
    pub fn list<T>(name: &'static str, spec: QuerySpec<Vec<T>>) -> Self
    where
        T: DeserializeOwned + Serialize + Clone + Send + Sync + 'static,
    {
        let key = spec.key().clone();
        let label = spec.label().to_string();
        let loader: Loader = Arc::new(move |client, caches| {
            let spec = spec.clone();
            async move {
                let hook = QueryHook::new(caches.cache::<Vec<T>>());
                let result = hook.mount(&spec, client).await;
                erase(ViewStatus::from_result(result))
            }
            .boxed()
        });
        Self {
            name,
            key,
            label,
            loader,
        }
    }

    /// A single-record query; an absent record renders as not found.
    pub fn record<T>(name: &'static str, spec: QuerySpec<Option<T>>, resource: &'static str) -> Self
    where
        T: DeserializeOwned + Serialize + Clone + Send + Sync + 'static,
    {
        let key = spec.key().clone();
        let label = spec.label().to_string();
        let loader: Loader = Arc::new(move |client, caches| {
            let spec = spec.clone();
            async move {
                let hook = QueryHook::new(caches.cache::<Option<T>>());
                let result = hook.mount(&spec, client).await;
                erase(ViewStatus::from_optional(result, resource))
            }
            .boxed()
        });
        Self {
            name,
            key,
            label,
            loader,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Mount the query against `caches` and render its status. A key that
    /// already settled in `caches` is not fetched again.
    pub async fn load(
        &self,
        client: Arc<dyn RemoteDataClient>,
        caches: &QueryCaches,
    ) -> ViewStatus<serde_json::Value> {
        (self.loader)(client, caches.clone()).await
    }
}

impl fmt::Debug for PageQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageQuery")
            .field("name", &self.name)
            .field("key", &self.key.to_string())
            .finish()
    }
}

fn erase<T: Serialize>(status: ViewStatus<T>) -> ViewStatus<serde_json::Value> {
    match status {
        ViewStatus::Loading => ViewStatus::Loading,
        ViewStatus::Error { message, retryable } => ViewStatus::Error { message, retryable },
        ViewStatus::NotFound { message } => ViewStatus::NotFound { message },
        ViewStatus::Ready { data } => match serde_json::to_value(data) {
            Ok(data) => ViewStatus::Ready { data },
            Err(err) => ViewStatus::Error {
                message: format!("Could not render data: {}", err),
                retryable: false,
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(page: &Page) -> Vec<&'static str> {
        page.queries().iter().map(PageQuery::name).collect()
    }

    #[test]
    fn test_products_page_needs_products_and_categories() {
        let page = Page::Products {
            store_id: "s1".to_string(),
        };
        assert_eq!(names(&page), vec!["products", "categories"]);
        assert_eq!(page.queries()[0].key().to_string(), "stores/s1/products");
    }

    #[test]
    fn test_admin_users_page() {
        let queries = Page::AdminUsers.queries();
        let labels: Vec<&str> = queries.iter().map(PageQuery::label).collect();
        assert_eq!(labels, vec!["fetch users failed", "fetch active users failed"]);
    }

    #[test]
    fn test_pages_without_queries() {
        assert!(Page::PaymentError {
            error: None,
            order_id: None
        }
        .queries()
        .is_empty());
        assert!(Page::Account { user_id: None }.queries().is_empty());
        assert_eq!(
            names(&Page::Account {
                user_id: Some(UserId::new("u1"))
            }),
            vec!["subscription"]
        );
    }

    #[test]
    fn test_page_serialization() {
        let page = Page::OrderDetail {
            store_id: "s1".to_string(),
            order_id: "o2".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&page).unwrap(),
            serde_json::json!({"page": "orderDetail", "storeId": "s1", "orderId": "o2"})
        );
    }
}

//! Route table: pattern matching followed by the authorization gate.

use serde::Serialize;
use std::sync::Arc;

use crate::gate::{
    AuthorizationPredicate, GatedRoute, GatedViewResolver, RequireRole, Resolution,
    ViewDependencies, ViewInputs,
};
use crate::models::{RouteInvocation, Role};

use super::page::Page;
use super::pattern::{invocation_for, RoutePattern};

/// Result of navigating to a path.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "navigation", rename_all = "camelCase")]
pub enum Navigation<V> {
    /// No route matches. No session lookup happened.
    NotFound { message: String },
    Resolved {
        route: String,
        resolution: Resolution<V>,
    },
}

impl<V> Navigation<V> {
    pub fn resolution(&self) -> Option<&Resolution<V>> {
        match self {
            Navigation::Resolved { resolution, .. } => Some(resolution),
            Navigation::NotFound { .. } => None,
        }
    }

    pub fn view(&self) -> Option<&V> {
        self.resolution().and_then(Resolution::view)
    }
}

struct RouteEntry<V> {
    pattern: RoutePattern,
    route: GatedRoute<V>,
}

/// Ordered list of gated routes. The first matching pattern wins.
pub struct RouteTable<V> {
    entries: Vec<RouteEntry<V>>,
}

impl<V> Default for RouteTable<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> RouteTable<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, pattern: &str, route: GatedRoute<V>) -> Self {
        self.entries.push(RouteEntry {
            pattern: RoutePattern::parse(pattern),
            route,
        });
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered patterns, in match order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.pattern.as_str())
    }

    /// Match `target` (path with optional `?query`).
    pub fn match_path(&self, target: &str) -> Option<(&GatedRoute<V>, RouteInvocation)> {
        self.entries.iter().find_map(|entry| {
            invocation_for(&entry.pattern, target).map(|invocation| (&entry.route, invocation))
        })
    }

    /// Match then gate.
    pub async fn resolve(&self, resolver: &GatedViewResolver, target: &str) -> Navigation<V> {
        match self.match_path(target) {
            Some((route, invocation)) => Navigation::Resolved {
                route: route.name().to_string(),
                resolution: resolver.resolve(route, &invocation).await,
            },
            None => {
                tracing::debug!("no route for path");
                Navigation::NotFound {
                    message: resolver.locale().not_found_message().to_string(),
                }
            }
        }
    }
}

fn store(inputs: &ViewInputs) -> String {
    inputs.param_or_empty("storeId")
}

fn admin(route: GatedRoute<Page>) -> GatedRoute<Page> {
    let predicate: Arc<dyn AuthorizationPredicate> = Arc::new(RequireRole::new(Role::Admin));
    route.with_predicate(predicate)
}

impl RouteTable<Page> {
    /// Every storefront route. Dashboard, payment and account routes need an
    /// authenticated session; admin routes need the admin role.
    pub fn storefront() -> Self {
        let store_only = || ViewDependencies::none().path("storeId");

        RouteTable::new()
            .route(
                "/dashboard/:storeId",
                GatedRoute::new("dashboard.overview", store_only(), |i| Page::Overview {
                    store_id: store(&i),
                }),
            )
            .route(
                "/dashboard/:storeId/products",
                GatedRoute::new("dashboard.products", store_only(), |i| Page::Products {
                    store_id: store(&i),
                }),
            )
            .route(
                "/dashboard/:storeId/categories",
                GatedRoute::new("dashboard.categories", store_only(), |i| Page::Categories {
                    store_id: store(&i),
                }),
            )
            .route(
                "/dashboard/:storeId/combos",
                GatedRoute::new("dashboard.combos", store_only(), |i| Page::Combos {
                    store_id: store(&i),
                }),
            )
            .route(
                "/dashboard/:storeId/employees",
                GatedRoute::new("dashboard.employees", store_only(), |i| Page::Employees {
                    store_id: store(&i),
                }),
            )
            .route(
                "/dashboard/:storeId/deliverers",
                GatedRoute::new("dashboard.deliverers", store_only(), |i| Page::Deliverers {
                    store_id: store(&i),
                }),
            )
            .route(
                "/dashboard/:storeId/delivery-areas",
                GatedRoute::new("dashboard.delivery_areas", store_only(), |i| {
                    Page::DeliveryAreas {
                        store_id: store(&i),
                    }
                }),
            )
            .route(
                "/dashboard/:storeId/customers",
                GatedRoute::new("dashboard.customers", store_only(), |i| Page::Customers {
                    store_id: store(&i),
                }),
            )
            .route(
                "/dashboard/:storeId/orders",
                GatedRoute::new("dashboard.orders", store_only(), |i| Page::Orders {
                    store_id: store(&i),
                }),
            )
            .route(
                "/dashboard/:storeId/orders/:orderId",
                GatedRoute::new(
                    "dashboard.order_detail",
                    store_only().path("orderId"),
                    |i| Page::OrderDetail {
                        store_id: store(&i),
                        order_id: i.param_or_empty("orderId"),
                    },
                ),
            )
            .route(
                "/dashboard/:storeId/settings",
                GatedRoute::new("dashboard.settings", store_only().identity(), |i| {
                    Page::Settings {
                        store_id: store(&i),
                        user_id: i.identity,
                    }
                }),
            )
            .route(
                "/admin/users",
                admin(GatedRoute::new("admin.users", ViewDependencies::none(), |_| {
                    Page::AdminUsers
                })),
            )
            .route(
                "/admin/users/:userId",
                admin(GatedRoute::new(
                    "admin.user_detail",
                    ViewDependencies::none().path("userId"),
                    |i| Page::AdminUserDetail {
                        user_id: i.param_or_empty("userId"),
                    },
                )),
            )
            .route(
                "/admin/affiliates",
                admin(GatedRoute::new("admin.affiliates", ViewDependencies::none(), |_| {
                    Page::AdminAffiliates
                })),
            )
            .route(
                "/admin/affiliates/:affiliateId",
                admin(GatedRoute::new(
                    "admin.affiliate_detail",
                    ViewDependencies::none().path("affiliateId"),
                    |i| Page::AdminAffiliateDetail {
                        affiliate_id: i.param_or_empty("affiliateId"),
                    },
                )),
            )
            .route(
                "/admin/subscriptions",
                admin(GatedRoute::new(
                    "admin.subscriptions",
                    ViewDependencies::none(),
                    |_| Page::AdminSubscriptions,
                )),
            )
            .route(
                "/payment/error",
                GatedRoute::new(
                    "payment.error",
                    ViewDependencies::none().query("error").query("orderId"),
                    |i| Page::PaymentError {
                        error: i.query_value("error").map(str::to_string),
                        order_id: i.query_value("orderId").map(str::to_string),
                    },
                ),
            )
            .route(
                "/payment/success",
                GatedRoute::new(
                    "payment.success",
                    ViewDependencies::none().query("orderId").identity(),
                    |i| Page::PaymentSuccess {
                        order_id: i.query_value("orderId").map(str::to_string),
                        user_id: i.identity,
                    },
                ),
            )
            .route(
                "/account",
                GatedRoute::new("account", ViewDependencies::none().identity(), |i| {
                    Page::Account {
                        user_id: i.identity,
                    }
                }),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::MockSessionProvider;
    use crate::config::Locale;
    use crate::models::UserId;

    fn resolver(provider: &MockSessionProvider) -> GatedViewResolver {
        GatedViewResolver::new(Arc::new(provider.clone()))
    }

    #[test]
    fn test_storefront_covers_every_page() {
        let table = RouteTable::storefront();
        assert_eq!(table.len(), 19);

        let (route, inv) = table.match_path("/dashboard/s1/orders/o2").unwrap();
        assert_eq!(route.name(), "dashboard.order_detail");
        assert_eq!(inv.param("orderId"), Some("o2"));

        assert!(table.match_path("/nowhere").is_none());
    }

    #[test]
    fn test_admin_routes_require_admin() {
        let table = RouteTable::storefront();
        for path in ["/admin/users", "/admin/users/u1", "/admin/affiliates", "/admin/subscriptions"] {
            let (route, _) = table.match_path(path).unwrap();
            assert_eq!(route.predicate().name(), "role:ADMIN", "{}", path);
        }
        let (route, _) = table.match_path("/dashboard/s1").unwrap();
        assert_eq!(route.predicate().name(), "authenticated");
    }

    #[tokio::test]
    async fn test_unknown_path_skips_session_lookup() {
        let provider = MockSessionProvider::signed_in("u1", Role::User);
        let nav = RouteTable::storefront()
            .resolve(&resolver(&provider).with_locale(Locale::Es), "/dashboard")
            .await;

        assert_eq!(
            nav,
            Navigation::NotFound {
                message: "Página no encontrada.".to_string()
            }
        );
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_products_for_signed_in_user() {
        let provider = MockSessionProvider::signed_in("u1", Role::User);
        let nav = RouteTable::storefront()
            .resolve(&resolver(&provider), "/dashboard/s1/products")
            .await;

        assert_eq!(
            nav.view(),
            Some(&Page::Products {
                store_id: "s1".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_payment_success_gets_query_and_identity() {
        let provider = MockSessionProvider::signed_in("u1", Role::Customer);
        let nav = RouteTable::storefront()
            .resolve(&resolver(&provider), "/payment/success?orderId=o%2F9&utm=x")
            .await;

        assert_eq!(
            nav.view(),
            Some(&Page::PaymentSuccess {
                order_id: Some("o/9".to_string()),
                user_id: Some(UserId::new("u1")),
            })
        );
    }

    #[tokio::test]
    async fn test_navigation_serializes() {
        let provider = MockSessionProvider::signed_out();
        let nav = RouteTable::storefront()
            .resolve(&resolver(&provider), "/account")
            .await;

        assert_eq!(
            serde_json::to_value(&nav).unwrap(),
            serde_json::json!({
                "navigation": "resolved",
                "route": "account",
                "resolution": {
                    "outcome": "denied",
                    "view": {"message": "You are not authorized to view this page."}
                }
            })
        );
    }
}

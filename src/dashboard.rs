//! A dashboard session.
//!
//! Owns the storefront route table, the gate, the backend client and the
//! query caches. The caches live as long as the dashboard, so pages visited
//! one after another share settled entries.

use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

use crate::adapters::ApiClient;
use crate::config::AppConfig;
use crate::error::{DashResult, ErrorContext, ResultExt};
use crate::gate::GatedViewResolver;
use crate::models::{CashReportData, Order};
use crate::query::{QueryCaches, QueryHook, QueryKey, QueryResult, ViewStatus};
use crate::resources;
use crate::routes::{Navigation, Page, RouteTable};
use crate::traits::{RemoteDataClient, SessionProvider};
use crate::ui_store::{ConcernStore, UiStoreState, CASH_REPORT_MODAL};

/// Status of one page query after loading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadedQuery {
    pub query: &'static str,
    pub key: QueryKey,
    pub status: ViewStatus<serde_json::Value>,
}

/// Everything one navigation produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    pub navigation: Navigation<Page>,
    pub queries: Vec<LoadedQuery>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash_report_modal: Option<UiStoreState<CashReportData>>,
}

pub struct Dashboard {
    table: RouteTable<Page>,
    resolver: GatedViewResolver,
    client: Arc<dyn RemoteDataClient>,
    caches: QueryCaches,
}

impl Dashboard {
    pub fn new(resolver: GatedViewResolver, client: Arc<dyn RemoteDataClient>) -> Self {
        Self {
            table: RouteTable::storefront(),
            resolver,
            client,
            caches: QueryCaches::new(),
        }
    }

    /// Build the backend client from `config` and gate routes with `provider`.
    pub fn from_config(config: &AppConfig, provider: Arc<dyn SessionProvider>) -> DashResult<Self> {
        let client = ApiClient::from_config(config)
            .context(ErrorContext::new("build_api_client").with_component("adapters"))?;
        let resolver = GatedViewResolver::new(provider).with_locale(config.locale);
        Ok(Self::new(resolver, Arc::new(client)))
    }

    pub fn caches(&self) -> &QueryCaches {
        &self.caches
    }

    pub async fn navigate(&self, path: &str) -> Navigation<Page> {
        self.table.resolve(&self.resolver, path).await
    }

    /// Load every query of `page`, in declaration order.
    pub async fn load(&self, page: &Page) -> Vec<LoadedQuery> {
        let mut loaded = Vec::new();
        for query in page.queries() {
            let status = query.load(Arc::clone(&self.client), &self.caches).await;
            loaded.push(LoadedQuery {
                query: query.name(),
                key: query.key().clone(),
                status,
            });
        }
        loaded
    }

    /// Summarize the orders created on `day` into the global cash report
    /// modal. Returns `None` when the orders could not be loaded.
    pub async fn open_cash_report(
        &self,
        store_id: &str,
        day: NaiveDate,
    ) -> DashResult<Option<UiStoreState<CashReportData>>> {
        let hook = QueryHook::new(self.caches.cache::<Vec<Order>>());
        let orders = match hook
            .mount(&resources::orders(store_id), Arc::clone(&self.client))
            .await
        {
            QueryResult::Success(orders) => orders,
            _ => {
                tracing::debug!(store_id, "orders unavailable, cash report stays closed");
                return Ok(None);
            }
        };

        let modal = ConcernStore::global(&CASH_REPORT_MODAL).with_context(|| {
            ErrorContext::new("open_cash_report")
                .with_route("dashboard.overview")
                .with_store_id(store_id)
                .with_component("ui_store")
        })?;
        modal.open_modal(CashReportData::from_orders(day, &orders));
        Ok(Some(modal.store().read()))
    }

    /// Resolve `path`, then load the page. Denied and unknown paths fetch
    /// nothing.
    pub async fn visit(&self, path: &str, today: NaiveDate) -> DashResult<Visit> {
        let navigation = self.navigate(path).await;

        let (queries, cash_report_modal) = match navigation.view() {
            None => (Vec::new(), None),
            Some(page) => {
                let queries = self.load(page).await;
                let report = match page {
                    Page::Overview { store_id } => self.open_cash_report(store_id, today).await?,
                    _ => None,
                };
                (queries, report)
            }
        };

        Ok(Visit {
            navigation,
            queries,
            cash_report_modal,
        })
    }
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("routes", &self.table.len())
            .field("locale", &self.resolver.locale())
            .field("caches", &self.caches)
            .finish()
    }
}

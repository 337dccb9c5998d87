//! Gated view resolution.
//!
//! One resolution is: read the session once, evaluate the route predicate,
//! then either construct the feature view or return the denial view. The
//! view constructor is the only place feature work starts, so nothing runs
//! for a caller that fails the gate.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::Locale;
use crate::error::GateError;
use crate::models::{RouteInvocation, Session};
use crate::traits::SessionProvider;

use super::predicate::{Authenticated, AuthorizationPredicate};
use super::view::{DenialView, ViewDependencies, ViewInputs};

type ViewConstructor<V> = Arc<dyn Fn(ViewInputs) -> V + Send + Sync>;

/// A feature view behind an authorization predicate.
pub struct GatedRoute<V> {
    name: String,
    predicate: Arc<dyn AuthorizationPredicate>,
    dependencies: ViewDependencies,
    build: ViewConstructor<V>,
}

impl<V> GatedRoute<V> {
    /// Gate `build` behind the default [`Authenticated`] predicate.
    pub fn new<F>(name: impl Into<String>, dependencies: ViewDependencies, build: F) -> Self
    where
        F: Fn(ViewInputs) -> V + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            predicate: Arc::new(Authenticated),
            dependencies,
            build: Arc::new(build),
        }
    }

    /// Replace the predicate with a route-specific one.
    pub fn with_predicate(mut self, predicate: Arc<dyn AuthorizationPredicate>) -> Self {
        self.predicate = predicate;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn predicate(&self) -> &dyn AuthorizationPredicate {
        self.predicate.as_ref()
    }

    pub fn dependencies(&self) -> &ViewDependencies {
        &self.dependencies
    }
}

impl<V> Clone for GatedRoute<V> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            predicate: Arc::clone(&self.predicate),
            dependencies: self.dependencies.clone(),
            build: Arc::clone(&self.build),
        }
    }
}

impl<V> fmt::Debug for GatedRoute<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatedRoute")
            .field("name", &self.name)
            .field("predicate", &self.predicate.name())
            .field("dependencies", &self.dependencies)
            .finish()
    }
}

/// Outcome of one resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "view", rename_all = "camelCase")]
pub enum Resolution<V> {
    Authorized(V),
    Denied(DenialView),
}

impl<V> Resolution<V> {
    pub fn is_authorized(&self) -> bool {
        matches!(self, Resolution::Authorized(_))
    }

    pub fn view(&self) -> Option<&V> {
        match self {
            Resolution::Authorized(view) => Some(view),
            Resolution::Denied(_) => None,
        }
    }

    pub fn into_view(self) -> Option<V> {
        match self {
            Resolution::Authorized(view) => Some(view),
            Resolution::Denied(_) => None,
        }
    }

    pub fn denial(&self) -> Option<&DenialView> {
        match self {
            Resolution::Authorized(_) => None,
            Resolution::Denied(denial) => Some(denial),
        }
    }

    pub fn map<U, F: FnOnce(V) -> U>(self, f: F) -> Resolution<U> {
        match self {
            Resolution::Authorized(view) => Resolution::Authorized(f(view)),
            Resolution::Denied(denial) => Resolution::Denied(denial),
        }
    }
}

/// Resolves gated routes against a session provider.
#[derive(Clone)]
pub struct GatedViewResolver {
    provider: Arc<dyn SessionProvider>,
    locale: Locale,
}

impl GatedViewResolver {
    pub fn new(provider: Arc<dyn SessionProvider>) -> Self {
        Self {
            provider,
            locale: Locale::default(),
        }
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Resolve `route` for one invocation.
    ///
    /// The session provider is called exactly once. A provider error is
    /// treated like an absent session.
    pub async fn resolve<V>(&self, route: &GatedRoute<V>, invocation: &RouteInvocation) -> Resolution<V> {
        let span = tracing::debug_span!(
            "resolve",
            route = %route.name,
            resolution_id = %Uuid::new_v4()
        );

        async move {
            match self.authorize(route, invocation).await {
                Ok(session) => {
                    tracing::debug!("authorized");
                    let inputs = route
                        .dependencies
                        .select(invocation, session.identity.as_ref());
                    Resolution::Authorized((route.build)(inputs))
                }
                Err(reason) => {
                    tracing::debug!(code = reason.error_code(), "denied");
                    Resolution::Denied(DenialView::new(self.locale, reason))
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn authorize<V>(
        &self,
        route: &GatedRoute<V>,
        invocation: &RouteInvocation,
    ) -> Result<Session, GateError> {
        let session = match self.provider.get_session().await {
            Ok(Some(session)) => session,
            Ok(None) => {
                return Err(GateError::SessionUnavailable {
                    message: "no session".to_string(),
                })
            }
            Err(err) => {
                tracing::warn!("session lookup failed, denying: {}", err);
                return Err(GateError::SessionUnavailable {
                    message: err.to_string(),
                });
            }
        };

        if !session.is_authenticated() {
            return Err(GateError::SessionUnavailable {
                message: "session has no identity".to_string(),
            });
        }

        if !route.predicate.allows(&session, &invocation.params) {
            return Err(GateError::AuthorizationDenied {
                route: route.name.clone(),
            });
        }

        Ok(session)
    }
}

impl fmt::Debug for GatedViewResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatedViewResolver")
            .field("locale", &self.locale)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::MockSessionProvider;
    use crate::gate::predicate::RequireRole;
    use crate::models::Role;
    use crate::traits::SessionError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, PartialEq)]
    struct ProductsView {
        store_id: String,
    }

    fn products_route(built: Arc<AtomicUsize>) -> GatedRoute<ProductsView> {
        GatedRoute::new(
            "dashboard.products",
            ViewDependencies::none().path("storeId"),
            move |inputs| {
                built.fetch_add(1, Ordering::SeqCst);
                ProductsView {
                    store_id: inputs.param_or_empty("storeId"),
                }
            },
        )
    }

    fn invocation() -> RouteInvocation {
        RouteInvocation::new("/dashboard/s1/products").with_param("storeId", "s1")
    }

    #[tokio::test]
    async fn test_absent_session_is_denied_without_building() {
        let provider = MockSessionProvider::signed_out();
        let resolver = GatedViewResolver::new(Arc::new(provider.clone()));
        let built = Arc::new(AtomicUsize::new(0));

        let resolution = resolver
            .resolve(&products_route(built.clone()), &invocation())
            .await;

        assert!(!resolution.is_authorized());
        assert!(matches!(
            resolution.denial().unwrap().reason(),
            GateError::SessionUnavailable { .. }
        ));
        assert_eq!(built.load(Ordering::SeqCst), 0);
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_session_without_identity_is_denied() {
        let provider = MockSessionProvider::with_session(Session::anonymous());
        let resolver = GatedViewResolver::new(Arc::new(provider));
        let built = Arc::new(AtomicUsize::new(0));

        let resolution = resolver
            .resolve(&products_route(built.clone()), &invocation())
            .await;

        assert!(!resolution.is_authorized());
        assert_eq!(built.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_provider_failure_fails_closed() {
        let provider = MockSessionProvider::failing(SessionError::Transport("reset".to_string()));
        let resolver = GatedViewResolver::new(Arc::new(provider));
        let built = Arc::new(AtomicUsize::new(0));

        let resolution = resolver
            .resolve(&products_route(built.clone()), &invocation())
            .await;

        let denial = resolution.denial().unwrap();
        assert_eq!(denial.message, "You are not authorized to view this page.");
        assert_eq!(built.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_authorized_builds_with_route_params() {
        let provider = MockSessionProvider::signed_in("u1", Role::User);
        let resolver = GatedViewResolver::new(Arc::new(provider));
        let built = Arc::new(AtomicUsize::new(0));

        let resolution = resolver
            .resolve(&products_route(built.clone()), &invocation())
            .await;

        assert_eq!(
            resolution.into_view(),
            Some(ProductsView {
                store_id: "s1".to_string()
            })
        );
        assert_eq!(built.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_predicate_denial_records_route() {
        let provider = MockSessionProvider::signed_in("u1", Role::User);
        let resolver = GatedViewResolver::new(Arc::new(provider)).with_locale(Locale::Pt);
        let route = GatedRoute::new("admin.users", ViewDependencies::none(), |_| ())
            .with_predicate(Arc::new(RequireRole::new(Role::Admin)));

        let resolution = resolver.resolve(&route, &RouteInvocation::new("/admin/users")).await;

        let denial = resolution.denial().unwrap();
        assert_eq!(
            denial.reason(),
            &GateError::AuthorizationDenied {
                route: "admin.users".to_string()
            }
        );
        assert_eq!(denial.message, Locale::Pt.denial_message());
    }

    #[tokio::test]
    async fn test_session_is_read_on_every_resolution() {
        let provider = MockSessionProvider::signed_in("u1", Role::User);
        let resolver = GatedViewResolver::new(Arc::new(provider.clone()));
        let built = Arc::new(AtomicUsize::new(0));
        let route = products_route(built.clone());

        assert!(resolver.resolve(&route, &invocation()).await.is_authorized());

        provider.set_session(None);
        assert!(!resolver.resolve(&route, &invocation()).await.is_authorized());

        assert_eq!(provider.call_count(), 2);
        assert_eq!(built.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_denied_resolution_serializes_message_only() {
        let r: Resolution<u8> = Resolution::Denied(DenialView::new(
            Locale::En,
            GateError::SessionUnavailable {
                message: "no session".to_string(),
            },
        ));
        assert_eq!(
            serde_json::to_value(&r).unwrap(),
            serde_json::json!({
                "outcome": "denied",
                "view": {"message": "You are not authorized to view this page."}
            })
        );
    }

    #[test]
    fn test_resolution_map() {
        let r: Resolution<u8> = Resolution::Authorized(2);
        assert_eq!(r.map(|v| v * 2), Resolution::Authorized(4));
    }
}

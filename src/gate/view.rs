//! View inputs and the denial view.

use serde::Serialize;

use crate::config::Locale;
use crate::error::GateError;
use crate::models::{QueryParams, RouteInvocation, RouteParams, UserId};

/// The inputs a feature view declares it needs.
///
/// Only declared values reach the view; everything else in the invocation
/// is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewDependencies {
    pub path: Vec<&'static str>,
    pub query: Vec<&'static str>,
    pub identity: bool,
}

impl ViewDependencies {
    /// A view that needs nothing from the route or session.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn path(mut self, name: &'static str) -> Self {
        self.path.push(name);
        self
    }

    pub fn query(mut self, name: &'static str) -> Self {
        self.query.push(name);
        self
    }

    pub fn identity(mut self) -> Self {
        self.identity = true;
        self
    }

    /// Select the declared subset of an invocation. Values are copied
    /// verbatim; declared names missing from the invocation stay absent.
    pub fn select(&self, invocation: &RouteInvocation, identity: Option<&UserId>) -> ViewInputs {
        let params: RouteParams = self
            .path
            .iter()
            .filter_map(|name| {
                invocation
                    .params
                    .get(*name)
                    .map(|value| (name.to_string(), value.clone()))
            })
            .collect();
        let query: QueryParams = self
            .query
            .iter()
            .filter_map(|name| {
                invocation
                    .query
                    .get(*name)
                    .map(|value| (name.to_string(), value.clone()))
            })
            .collect();

        ViewInputs {
            params,
            query,
            identity: if self.identity { identity.cloned() } else { None },
        }
    }
}

/// What an authorized view is constructed with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewInputs {
    pub params: RouteParams,
    pub query: QueryParams,
    pub identity: Option<UserId>,
}

impl ViewInputs {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    /// Declared path parameter, or an empty string if the invocation lacked it.
    pub fn param_or_empty(&self, name: &str) -> String {
        self.param(name).unwrap_or_default().to_string()
    }
}

/// Fixed "not authorized" rendering.
///
/// Carries a localized message only. The internal reason is kept for logs
/// and tests and is not serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DenialView {
    pub message: String,
    #[serde(skip)]
    reason: GateError,
}

impl DenialView {
    pub fn new(locale: Locale, reason: GateError) -> Self {
        Self {
            message: locale.denial_message().to_string(),
            reason,
        }
    }

    pub fn reason(&self) -> &GateError {
        &self.reason
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invocation() -> RouteInvocation {
        RouteInvocation::new("/dashboard/s1/orders/o9")
            .with_param("storeId", "s1")
            .with_param("orderId", "o9")
            .with_query("error", "card_declined")
            .with_query("utm", "mail")
    }

    #[test]
    fn test_select_declared_subset_only() {
        let deps = ViewDependencies::none().path("storeId").query("error");
        let user = UserId::new("u1");
        let inputs = deps.select(&invocation(), Some(&user));

        assert_eq!(inputs.param("storeId"), Some("s1"));
        assert_eq!(inputs.param("orderId"), None);
        assert_eq!(inputs.query_value("error"), Some("card_declined"));
        assert_eq!(inputs.query_value("utm"), None);
        assert_eq!(inputs.identity, None);
    }

    #[test]
    fn test_select_identity_when_declared() {
        let deps = ViewDependencies::none().identity();
        let user = UserId::new("u1");
        let inputs = deps.select(&invocation(), Some(&user));
        assert_eq!(inputs.identity, Some(user));
        assert!(inputs.params.is_empty());
    }

    #[test]
    fn test_missing_declared_param_is_absent() {
        let deps = ViewDependencies::none().path("userId");
        let inputs = deps.select(&invocation(), None);
        assert!(inputs.params.is_empty());
        assert_eq!(inputs.param_or_empty("userId"), "");
    }

    #[test]
    fn test_denial_view_serializes_message_only() {
        let denial = DenialView::new(
            Locale::Es,
            GateError::AuthorizationDenied {
                route: "admin.users".to_string(),
            },
        );
        let json = serde_json::to_value(&denial).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"message": "No tienes autorización para ver esta página."})
        );
    }
}

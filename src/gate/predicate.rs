//! Authorization predicates.
//!
//! A predicate is a pure function of the session and the route parameters.
//! The resolver never evaluates one without a session that carries an
//! identity, and every stock predicate also fails closed on its own.

use std::fmt;
use std::sync::Arc;

use crate::models::{Role, RouteParams, Session};

/// Decides whether a session may see a route.
pub trait AuthorizationPredicate: Send + Sync {
    fn allows(&self, session: &Session, params: &RouteParams) -> bool;

    /// Short name used in log lines.
    fn name(&self) -> &str;
}

/// Session exists and carries an identity. The default predicate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Authenticated;

impl AuthorizationPredicate for Authenticated {
    fn allows(&self, session: &Session, _params: &RouteParams) -> bool {
        session.is_authenticated()
    }

    fn name(&self) -> &str {
        "authenticated"
    }
}

/// Authenticated and holding a specific role.
#[derive(Debug, Clone)]
pub struct RequireRole {
    role: Role,
    name: String,
}

impl RequireRole {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            name: format!("role:{}", role),
        }
    }
}

impl AuthorizationPredicate for RequireRole {
    fn allows(&self, session: &Session, _params: &RouteParams) -> bool {
        session.is_authenticated() && session.role == self.role
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Route-supplied predicate, e.g. a store ownership check.
///
/// The closure only runs for authenticated sessions.
pub struct FnPredicate {
    name: String,
    check: Box<dyn Fn(&Session, &RouteParams) -> bool + Send + Sync>,
}

impl FnPredicate {
    pub fn new<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Session, &RouteParams) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            check: Box::new(check),
        }
    }
}

impl AuthorizationPredicate for FnPredicate {
    fn allows(&self, session: &Session, params: &RouteParams) -> bool {
        session.is_authenticated() && (self.check)(session, params)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for FnPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnPredicate").field("name", &self.name).finish()
    }
}

/// Every inner predicate must allow. An empty conjunction still requires
/// an authenticated session.
pub struct AllOf {
    name: String,
    predicates: Vec<Arc<dyn AuthorizationPredicate>>,
}

impl AllOf {
    pub fn new(predicates: Vec<Arc<dyn AuthorizationPredicate>>) -> Self {
        let name = join_names("all", &predicates);
        Self { name, predicates }
    }
}

impl AuthorizationPredicate for AllOf {
    fn allows(&self, session: &Session, params: &RouteParams) -> bool {
        session.is_authenticated() && self.predicates.iter().all(|p| p.allows(session, params))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// At least one inner predicate must allow. An empty disjunction denies.
pub struct AnyOf {
    name: String,
    predicates: Vec<Arc<dyn AuthorizationPredicate>>,
}

impl AnyOf {
    pub fn new(predicates: Vec<Arc<dyn AuthorizationPredicate>>) -> Self {
        let name = join_names("any", &predicates);
        Self { name, predicates }
    }
}

impl AuthorizationPredicate for AnyOf {
    fn allows(&self, session: &Session, params: &RouteParams) -> bool {
        session.is_authenticated() && self.predicates.iter().any(|p| p.allows(session, params))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn join_names(kind: &str, predicates: &[Arc<dyn AuthorizationPredicate>]) -> String {
    let names: Vec<&str> = predicates.iter().map(|p| p.name()).collect();
    format!("{}({})", kind, names.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> RouteParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn owns_store() -> FnPredicate {
        FnPredicate::new("owns-store", |session, params| {
            match (session.identity.as_ref(), params.get("storeId")) {
                (Some(user), Some(store)) => store == &format!("{}-store", user),
                _ => false,
            }
        })
    }

    #[test]
    fn test_authenticated_fails_closed() {
        let p = Authenticated;
        assert!(p.allows(&Session::authenticated("u1", Role::Customer), &params(&[])));
        assert!(!p.allows(&Session::anonymous(), &params(&[])));
    }

    #[test]
    fn test_require_role() {
        let p = RequireRole::new(Role::Admin);
        assert_eq!(p.name(), "role:ADMIN");
        assert!(p.allows(&Session::authenticated("u1", Role::Admin), &params(&[])));
        assert!(!p.allows(&Session::authenticated("u1", Role::User), &params(&[])));

        let mut no_identity = Session::authenticated("u1", Role::Admin);
        no_identity.identity = None;
        assert!(!p.allows(&no_identity, &params(&[])));
    }

    #[test]
    fn test_fn_predicate_sees_route_params() {
        let p = owns_store();
        let session = Session::authenticated("u1", Role::User);
        assert!(p.allows(&session, &params(&[("storeId", "u1-store")])));
        assert!(!p.allows(&session, &params(&[("storeId", "u2-store")])));
        assert!(!p.allows(&session, &params(&[])));
    }

    #[test]
    fn test_fn_predicate_never_runs_without_identity() {
        let p = FnPredicate::new("always", |_, _| true);
        assert!(!p.allows(&Session::anonymous(), &params(&[])));
    }

    #[test]
    fn test_all_of() {
        let p = AllOf::new(vec![
            Arc::new(RequireRole::new(Role::User)),
            Arc::new(owns_store()),
        ]);
        assert_eq!(p.name(), "all(role:USER,owns-store)");

        let user = Session::authenticated("u1", Role::User);
        assert!(p.allows(&user, &params(&[("storeId", "u1-store")])));
        assert!(!p.allows(&user, &params(&[("storeId", "x")])));

        let empty = AllOf::new(vec![]);
        assert!(empty.allows(&user, &params(&[])));
        assert!(!empty.allows(&Session::anonymous(), &params(&[])));
    }

    #[test]
    fn test_any_of() {
        let p = AnyOf::new(vec![
            Arc::new(RequireRole::new(Role::Admin)),
            Arc::new(owns_store()),
        ]);
        let admin = Session::authenticated("root", Role::Admin);
        let owner = Session::authenticated("u1", Role::User);
        let other = Session::authenticated("u2", Role::User);
        let store = params(&[("storeId", "u1-store")]);

        assert!(p.allows(&admin, &store));
        assert!(p.allows(&owner, &store));
        assert!(!p.allows(&other, &store));
        assert!(!AnyOf::new(vec![]).allows(&admin, &store));
    }
}

use crate::{
    routes::{REDIRECT_QUERY, RouteLocation, admin::DASHBOARD_ROUTE, public::LOGIN_ROUTE},
    session::SessionState,
};

/// NavigationTarget
///
/// A named route plus query parameters, produced when the guard diverts navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationTarget {
    pub name: &'static str,
    pub query: Vec<(String, String)>,
}

impl NavigationTarget {
    pub fn named(name: &'static str) -> Self {
        Self {
            name,
            query: Vec::new(),
        }
    }

    pub fn with_query(name: &'static str, key: &str, value: impl Into<String>) -> Self {
        Self {
            name,
            query: vec![(key.to_string(), value.into())],
        }
    }
}

/// GuardDecision
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(NavigationTarget),
}

/// evaluate
///
/// Pre-navigation check, run against a fresh session snapshot on every attempt:
///
/// 1. Protected target, no credential: login, remembering the intended path under
///    `redirect`.
/// 2. Protected target, credential without the admin role: login, intended path
///    dropped.
/// 3. Login target while signed in as admin: dashboard.
/// 4. Anything else proceeds unchanged.
///
/// Only (1) carries the intended path.
pub fn evaluate(target: &RouteLocation, session: &SessionState) -> GuardDecision {
    if target.requires_auth {
        if !session.is_authenticated() {
            return GuardDecision::Redirect(NavigationTarget::with_query(
                LOGIN_ROUTE,
                REDIRECT_QUERY,
                target.full_path.clone(),
            ));
        }
        if !session.is_admin {
            return GuardDecision::Redirect(NavigationTarget::named(LOGIN_ROUTE));
        }
    }

    if target.name == Some(LOGIN_ROUTE) && session.is_authenticated() && session.is_admin {
        return GuardDecision::Redirect(NavigationTarget::named(DASHBOARD_ROUTE));
    }

    GuardDecision::Allow
}

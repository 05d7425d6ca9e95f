//! Route Module Index
//!
//! The console's route table, split by access level the same way the surfaces are
//! gated, plus the router that runs the navigation guard on every attempt.

use std::sync::Arc;

use url::form_urlencoded;

use crate::{
    error::{ConsoleError, ConsoleResult},
    guard::{self, GuardDecision, NavigationTarget},
    navigation::NavigatorState,
    session::SessionStore,
};

/// Surfaces reachable without a session (the login page).
pub mod public;

/// Console pages that require an admin session.
pub mod admin;

/// Query key under which the intended destination is carried to the login page.
pub const REDIRECT_QUERY: &str = "redirect";

// Guard redirects settle in at most two hops; anything longer is a cycle.
const MAX_REDIRECTS: usize = 8;

/// RouteDef
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDef {
    pub name: &'static str,
    pub path: &'static str,
    pub requires_auth: bool,
}

impl RouteDef {
    pub const fn public(name: &'static str, path: &'static str) -> Self {
        Self {
            name,
            path,
            requires_auth: false,
        }
    }

    pub const fn protected(name: &'static str, path: &'static str) -> Self {
        Self {
            name,
            path,
            requires_auth: true,
        }
    }
}

/// RouteLocation
///
/// A resolved navigation target. Paths that match no route resolve to an unnamed,
/// public location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteLocation {
    pub name: Option<&'static str>,
    pub path: String,
    /// Path plus the raw query string, as the user asked for it.
    pub full_path: String,
    pub query: Vec<(String, String)>,
    pub requires_auth: bool,
}

impl RouteLocation {
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// RouteTable
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteDef>,
}

impl RouteTable {
    pub fn new(routes: Vec<RouteDef>) -> Self {
        Self { routes }
    }

    /// Login page plus every admin console page.
    pub fn console() -> Self {
        let mut routes = public::public_routes();
        routes.extend(admin::admin_routes());
        Self::new(routes)
    }

    pub fn routes(&self) -> &[RouteDef] {
        &self.routes
    }

    pub fn path_of(&self, name: &str) -> Option<&'static str> {
        self.routes.iter().find(|r| r.name == name).map(|r| r.path)
    }

    /// resolve
    ///
    /// Splits `full_path` into path and query, normalizes the path (leading slash, no
    /// trailing slash except for the root) and matches it against the table.
    pub fn resolve(&self, full_path: &str) -> RouteLocation {
        let (raw_path, raw_query) = match full_path.split_once('?') {
            Some((path, query)) => (path, query),
            None => (full_path, ""),
        };

        let trimmed = raw_path.trim().trim_end_matches('/');
        let path = if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{trimmed}")
        };

        let query: Vec<(String, String)> = form_urlencoded::parse(raw_query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        let full_path = if raw_query.is_empty() {
            path.clone()
        } else {
            format!("{path}?{raw_query}")
        };

        let matched = self.routes.iter().find(|r| r.path == path);

        RouteLocation {
            name: matched.map(|r| r.name),
            requires_auth: matched.is_some_and(|r| r.requires_auth),
            path,
            full_path,
            query,
        }
    }

    /// Concrete location for a named target, query form-url-encoded.
    pub fn location_for(&self, target: &NavigationTarget) -> Option<String> {
        let path = self.path_of(target.name)?;
        if target.query.is_empty() {
            return Some(path.to_string());
        }

        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(target.query.iter())
            .finish();
        Some(format!("{path}?{query}"))
    }
}

/// ConsoleRouter
///
/// Resolves paths, runs the navigation guard against the current session and commits
/// the final location to the navigator. Nothing is cached between attempts: the
/// session can change between two navigations.
pub struct ConsoleRouter {
    table: RouteTable,
    session: Arc<SessionStore>,
    navigator: NavigatorState,
}

impl ConsoleRouter {
    pub fn new(session: Arc<SessionStore>, navigator: NavigatorState) -> Self {
        Self {
            table: RouteTable::console(),
            session,
            navigator,
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// push
    ///
    /// Navigates to `path`, following guard redirects (each hop is checked again) and
    /// returns the location actually reached.
    pub fn push(&self, path: &str) -> ConsoleResult<RouteLocation> {
        let mut location = self.table.resolve(path);

        for _ in 0..MAX_REDIRECTS {
            let session = self.session.snapshot();

            match guard::evaluate(&location, &session) {
                GuardDecision::Allow => {
                    self.navigator.push(&location.full_path);
                    return Ok(location);
                }
                GuardDecision::Redirect(target) => {
                    let next = self.table.location_for(&target).ok_or_else(|| {
                        ConsoleError::Navigation(format!("unknown route '{}'", target.name))
                    })?;
                    tracing::debug!(from = %location.full_path, to = %next, "guard redirected navigation");
                    location = self.table.resolve(&next);
                }
            }
        }

        Err(ConsoleError::Navigation(format!(
            "too many redirects while navigating to {path}"
        )))
    }

    /// resume_after_login
    ///
    /// Continues to the destination remembered in the current location's `redirect`
    /// query value, or to the dashboard. Only in-app paths are honored.
    pub fn resume_after_login(&self) -> ConsoleResult<RouteLocation> {
        let current = self.table.resolve(&self.navigator.current());

        let destination = current
            .query_value(REDIRECT_QUERY)
            .filter(|target| target.starts_with('/') && !target.starts_with("//"))
            .map(str::to_string)
            .or_else(|| self.table.path_of(admin::DASHBOARD_ROUTE).map(str::to_string))
            .unwrap_or_else(|| "/".to_string());

        self.push(&destination)
    }
}

use super::RouteDef;

/// Path of the login surface.
pub const LOGIN_PATH: &str = "/login";

/// Name of the login route.
pub const LOGIN_ROUTE: &str = "login";

/// Public Route Table
///
/// Surfaces reachable without a session. Only the login page lives here; every
/// console page sits behind the guard in `admin`.
pub fn public_routes() -> Vec<RouteDef> {
    vec![RouteDef::public(LOGIN_ROUTE, LOGIN_PATH)]
}

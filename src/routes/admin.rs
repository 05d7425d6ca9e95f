use super::RouteDef;

/// Default landing surface after login.
pub const DASHBOARD_ROUTE: &str = "dashboard";

/// Admin Route Table
///
/// Children of the console layout at `/`. All of them require an authenticated
/// session whose credential carries the `ADMIN` role.
pub fn admin_routes() -> Vec<RouteDef> {
    [
        (DASHBOARD_ROUTE, "/"),
        // User management: listing, enabling and disabling accounts.
        ("users", "/users"),
        ("pet-tags", "/pet-tags"),
        ("bill-categories", "/bill-categories"),
        // Content review queue.
        ("moderation", "/moderation"),
        ("shops", "/shops"),
        ("comments", "/comments"),
        ("reports", "/reports"),
        ("system-config", "/system-config"),
        ("sensitive-words", "/sensitive-words"),
        ("announcements", "/announcements"),
        ("audit-logs", "/audit-logs"),
    ]
    .into_iter()
    .map(|(name, path)| RouteDef::protected(name, path))
    .collect()
}

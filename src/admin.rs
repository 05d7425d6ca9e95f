use reqwest::Method;

use crate::{
    client::ApiClient,
    error::ConsoleResult,
    models::{BillCategory, DashboardVO, PageResp, UpdateUserStatusRequest, UserManageVO, UserQuery},
};

// Each wrapper performs one request and unwraps the envelope; a non-OK code becomes
// `ConsoleError::Api` carrying the server message.

/// GET /api/admin/dashboard
pub async fn get_dashboard(client: &ApiClient) -> ConsoleResult<DashboardVO> {
    client
        .get::<DashboardVO>("/api/admin/dashboard")
        .await?
        .into_data()
}

/// GET /api/admin/users
pub async fn get_users(client: &ApiClient, query: &UserQuery) -> ConsoleResult<PageResp<UserManageVO>> {
    client
        .get_with_query::<PageResp<UserManageVO>, _>("/api/admin/users", query)
        .await?
        .into_data()
}

/// PUT /api/admin/users/status
///
/// Enables (1) or disables (0) an account, optionally recording why.
pub async fn update_user_status(client: &ApiClient, request: &UpdateUserStatusRequest) -> ConsoleResult<()> {
    client
        .put::<serde_json::Value, _>("/api/admin/users/status", request)
        .await?
        .check()
}

/// GET /api/admin/bill-categories
pub async fn list_bill_categories(client: &ApiClient) -> ConsoleResult<Vec<BillCategory>> {
    client
        .get::<Vec<BillCategory>>("/api/admin/bill-categories")
        .await?
        .into_data()
}

/// POST /api/admin/bill-categories?name=..., returning the new id.
pub async fn create_bill_category(client: &ApiClient, name: &str) -> ConsoleResult<i64> {
    client
        .call::<i64, _>(Method::POST, "/api/admin/bill-categories", |b| b.query(&[("name", name)]))
        .await?
        .into_data()
}

/// PUT /api/admin/bill-categories/{id}?name=...
pub async fn update_bill_category(client: &ApiClient, id: i64, name: &str) -> ConsoleResult<()> {
    let path = format!("/api/admin/bill-categories/{id}");
    client
        .call::<serde_json::Value, _>(Method::PUT, &path, |b| b.query(&[("name", name)]))
        .await?
        .check()
}

/// DELETE /api/admin/bill-categories/{id}
pub async fn delete_bill_category(client: &ApiClient, id: i64) -> ConsoleResult<()> {
    client
        .delete::<serde_json::Value>(&format!("/api/admin/bill-categories/{id}"))
        .await?
        .check()
}

use serde::{Deserialize, Serialize};

// --- Paging ---

/// PageResp
///
/// One page of a server-side paginated listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PageResp<T> {
    pub records: Vec<T>,
    pub total: u64,
    pub current: u64,
    pub size: u64,
}

// --- User Management ---

/// UserManageVO
///
/// A user account as shown in the management table. `status` is 0 for disabled and 1
/// for active.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserManageVO {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub nickname: Option<String>,
    pub status: i32,
    #[serde(default)]
    pub created_time: Option<String>,
}

/// UserQuery
///
/// Query parameters for `GET /api/admin/users`. Unset fields are left off the URL.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
}

/// UpdateUserStatusRequest
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserStatusRequest {
    pub user_id: i64,
    pub status: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

// --- Bill Categories ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BillCategoryKind {
    System,
    Custom,
}

/// BillCategory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BillCategory {
    pub id: i64,
    pub name: String,
    // Sent as "type" on the wire.
    #[serde(rename = "type")]
    pub kind: BillCategoryKind,
}

// --- Dashboard ---

/// DashboardVO
///
/// Headline counters for the console landing page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DashboardVO {
    pub total_users: u64,
    pub today_new_users: u64,
    pub total_pets: u64,
    pub today_active_pets: u64,
    pub total_moments: u64,
    pub pending_reviews: u64,
}

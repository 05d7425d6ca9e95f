use petdimen_admin::{
    ApiResult, ConsoleError,
    models::{BillCategory, BillCategoryKind, PageResp, UpdateUserStatusRequest, UserManageVO, UserQuery},
};
use serde_json::json;

// --- Wire Format ---

#[test]
fn test_bill_category_type_field_mapping() {
    // The backend calls the field "type", a reserved word on our side.
    let category: BillCategory =
        serde_json::from_value(json!({ "id": 3, "name": "Food", "type": "system" })).unwrap();

    assert_eq!(category.kind, BillCategoryKind::System);

    let serialized = serde_json::to_value(&category).unwrap();
    assert_eq!(serialized["type"], "system");
    assert!(serialized.get("kind").is_none());
}

#[test]
fn test_user_page_from_camel_case() {
    let page: PageResp<UserManageVO> = serde_json::from_value(json!({
        "records": [
            { "id": 1, "username": "mimi", "nickname": "Mimi", "status": 1, "createdTime": "2024-05-01 10:00:00" },
            { "id": 2, "username": "ghost", "status": 0 }
        ],
        "total": 2, "current": 1, "size": 10
    }))
    .unwrap();

    assert_eq!(page.records.len(), 2);
    assert_eq!(page.records[0].created_time.as_deref(), Some("2024-05-01 10:00:00"));
    assert_eq!(page.records[1].nickname, None);
}

#[test]
fn test_user_query_skips_unset_fields() {
    let query = UserQuery {
        page: Some(1),
        keyword: Some("cat".to_string()),
        ..Default::default()
    };

    let serialized = serde_json::to_value(&query).unwrap();

    assert_eq!(serialized, json!({ "page": 1, "keyword": "cat" }));
}

#[test]
fn test_update_user_status_request_serialization() {
    let request = UpdateUserStatusRequest {
        user_id: 42,
        status: 0,
        reason: None,
    };

    assert_eq!(serde_json::to_value(&request).unwrap(), json!({ "userId": 42, "status": 0 }));
}

// --- Envelope ---

#[test]
fn test_envelope_without_data_checks_ok() {
    let envelope: ApiResult<serde_json::Value> = serde_json::from_value(json!({ "code": "OK" })).unwrap();

    assert!(envelope.is_ok());
    assert_eq!(envelope.message, "");
    assert!(envelope.check().is_ok());
}

#[test]
fn test_envelope_data_may_be_absent_for_any_payload() {
    // BillCategory has no Default; an absent `data` still decodes as None.
    let envelope: ApiResult<BillCategory> =
        serde_json::from_value(json!({ "code": "OK", "message": "deleted" })).unwrap();

    assert_eq!(envelope.data, None);
    assert!(envelope.check().is_ok());
}

#[test]
fn test_envelope_ok_without_data_is_missing_data() {
    let envelope: ApiResult<i64> = serde_json::from_value(json!({ "code": "OK", "data": null })).unwrap();

    assert!(matches!(envelope.into_data(), Err(ConsoleError::MissingData)));
}

#[test]
fn test_envelope_error_carries_server_message() {
    let envelope: ApiResult<i64> =
        serde_json::from_value(json!({ "code": "CATEGORY_IN_USE", "message": "category is referenced by bills" }))
            .unwrap();

    let err = envelope.check().unwrap_err();

    assert_eq!(err.to_string(), "category is referenced by bills");
}

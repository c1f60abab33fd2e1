use super::*;
use serde_json::json;

// =============================================================
// Envelope
// =============================================================

#[test]
fn envelope_string_success_codes() {
    for code in ["200", "0"] {
        let env: Envelope = serde_json::from_value(json!({ "code": code, "msg": "ok", "data": 1 })).unwrap();
        assert!(env.is_success(), "code {code} should succeed");
    }
}

#[test]
fn envelope_numeric_code_is_stringified() {
    let env: Envelope = serde_json::from_value(json!({ "code": 200, "msg": "", "data": null })).unwrap();
    assert_eq!(env.code, "200");
    assert!(env.is_success());
}

#[test]
fn envelope_other_codes_fail() {
    let env: Envelope = serde_json::from_value(json!({ "code": "500", "msg": "boom", "data": null })).unwrap();
    assert!(!env.is_success());
    assert_eq!(env.message(), Some("boom"));
}

#[test]
fn envelope_missing_msg_and_data_default() {
    let env: Envelope = serde_json::from_value(json!({ "code": "0" })).unwrap();
    assert_eq!(env.msg, None);
    assert_eq!(env.data, serde_json::Value::Null);
}

#[test]
fn envelope_blank_msg_has_no_message() {
    let env: Envelope = serde_json::from_value(json!({ "code": "1", "msg": "  " })).unwrap();
    assert_eq!(env.message(), None);
}

#[test]
fn envelope_rejects_boolean_code() {
    let result: Result<Envelope, _> = serde_json::from_value(json!({ "code": true, "msg": "", "data": null }));
    assert!(result.is_err());
}

// =============================================================
// SysUser
// =============================================================

#[test]
fn sys_user_parses_camel_case_fields() {
    let user: SysUser = serde_json::from_value(json!({
        "userId": "42",
        "userName": "alice",
        "email": "alice@example.com",
        "createdAt": "2024-01-01 10:00:00",
        "updatedAt": "2024-01-02 10:00:00",
        "createdBy": "root",
        "deleted": 0
    }))
    .unwrap();
    assert_eq!(user.user_id, "42");
    assert_eq!(user.user_name, "alice");
    assert_eq!(user.created_by.as_deref(), Some("root"));
    assert_eq!(user.updated_by, None);
    assert_eq!(user.deleted_flag, 0);
}

#[test]
fn sys_user_accepts_deleted_flag_alias() {
    let user: SysUser = serde_json::from_value(json!({
        "userId": "1",
        "userName": "bob",
        "email": "b@example.com",
        "createdAt": "",
        "updatedAt": "",
        "deletedFlag": 1
    }))
    .unwrap();
    assert_eq!(user.deleted_flag, 1);
}

#[test]
fn page_data_parses_records() {
    let page: PageData<SysUser> = serde_json::from_value(json!({
        "records": [],
        "total": 0,
        "current": 1,
        "size": 10,
        "pages": 0
    }))
    .unwrap();
    assert!(page.records.is_empty());
    assert_eq!(page.size, 10);
}

// =============================================================
// Requests
// =============================================================

#[test]
fn user_query_skips_unset_fields() {
    let query = UserQuery { page: Some(2), size: None, username: Some("al".to_owned()) };
    assert_eq!(query.to_pairs(), vec![("page".to_owned(), "2".to_owned()), ("username".to_owned(), "al".to_owned())]);
    assert!(UserQuery::default().to_pairs().is_empty());
}

#[test]
fn login_request_serializes_credentials() {
    let body = serde_json::to_value(LoginRequest { username: "u".to_owned(), password: "p".to_owned() }).unwrap();
    assert_eq!(body, json!({ "username": "u", "password": "p" }));
}

use super::*;
use crate::net::error::TransportError;
use crate::test_helpers::{harness, harness_with_token, ok_envelope, response};
use crate::util::storage::MemoryStorage;
use serde_json::json;

fn profile(id: &str) -> UserProfile {
    UserProfile {
        user_id: id.to_owned(),
        user_name: "alice".to_owned(),
        email: "alice@example.com".to_owned(),
        created_at: "2024-01-01 10:00:00".to_owned(),
        updated_at: "2024-01-01 10:00:00".to_owned(),
        created_by: None,
        updated_by: None,
        deleted_flag: 0,
    }
}

// =========================================================================
// Session
// =========================================================================

#[test]
fn load_seeds_token_from_storage() {
    let storage = Arc::new(MemoryStorage::new());
    storage.set(TOKEN_KEY, "persisted").unwrap();

    let session = Session::load(storage);

    assert_eq!(session.token().as_deref(), Some("persisted"));
    assert!(session.is_login());
    assert_eq!(session.profile(), None);
}

#[test]
fn load_with_empty_storage_is_logged_out() {
    let session = Session::load(Arc::new(MemoryStorage::new()));
    assert!(!session.is_login());
    assert_eq!(session.snapshot(), SessionState::default());
}

#[test]
fn set_token_writes_memory_and_storage() {
    let h = harness();

    h.session.set_token("abc");

    assert_eq!(h.session.token().as_deref(), Some("abc"));
    assert_eq!(h.stored_token().as_deref(), Some("abc"));
}

#[test]
fn clones_share_state() {
    let h = harness();
    let other = h.session.clone();

    other.set_token("shared");

    assert_eq!(h.session.token().as_deref(), Some("shared"));
}

#[test]
fn clear_removes_token_and_profile() {
    let h = harness_with_token("tok");
    h.session.set_profile(profile("1"));

    h.session.clear();

    assert_eq!(h.session.snapshot(), SessionState::default());
    assert_eq!(h.stored_token(), None);
}

#[test]
fn set_profile_exposes_user_id() {
    let h = harness();
    assert_eq!(h.session.user_id(), None);

    h.session.set_profile(profile("42"));

    assert_eq!(h.session.user_id().as_deref(), Some("42"));
    assert!(!h.session.is_login());
}

// =========================================================================
// SessionStore
// =========================================================================

#[tokio::test]
async fn login_success_stores_token() {
    let h = harness();
    h.transport.push(ok_envelope(json!("fresh")));
    let store = SessionStore::new(h.http.clone());

    assert!(store.login("admin", "secret").await);

    assert!(store.is_login());
    assert_eq!(h.session.token().as_deref(), Some("fresh"));
    assert_eq!(h.stored_token().as_deref(), Some("fresh"));
}

#[tokio::test]
async fn login_failure_keeps_previous_token() {
    let h = harness_with_token("before");
    h.transport.push(response(200, &json!({ "code": "401", "msg": "bad credentials", "data": null }), &[]));
    let store = SessionStore::new(h.http.clone());

    assert!(!store.login("admin", "wrong").await);

    assert_eq!(h.session.token().as_deref(), Some("before"));
    assert_eq!(h.stored_token().as_deref(), Some("before"));
    assert_eq!(h.notifier.messages(), vec!["bad credentials".to_owned()]);
}

#[tokio::test]
async fn login_network_failure_returns_false() {
    let h = harness();
    h.transport.push_error(TransportError::Connect("refused".into()));
    let store = SessionStore::new(h.http.clone());

    assert!(!store.login("admin", "secret").await);
    assert!(!store.is_login());
}

#[tokio::test]
async fn repeated_login_replaces_token() {
    let h = harness();
    h.transport.push(ok_envelope(json!("first")));
    h.transport.push(ok_envelope(json!("second")));
    let store = SessionStore::new(h.http.clone());

    assert!(store.login("admin", "secret").await);
    assert!(store.login("admin", "secret").await);

    assert_eq!(h.stored_token().as_deref(), Some("second"));
}

#[tokio::test]
async fn logout_clears_session_after_remote_success() {
    let h = harness_with_token("tok");
    h.session.set_profile(profile("1"));
    h.transport.push(ok_envelope(json!(null)));
    let store = SessionStore::new(h.http.clone());

    store.logout().await.unwrap();

    assert_eq!(h.transport.last_request().headers.get("access_token").unwrap(), "tok");
    assert_eq!(h.session.snapshot(), SessionState::default());
    assert_eq!(h.stored_token(), None);
}

#[tokio::test]
async fn logout_clears_session_even_when_remote_fails() {
    let h = harness_with_token("tok");
    h.transport.push_error(TransportError::Timeout("slow".into()));
    let store = SessionStore::new(h.http.clone());

    let err = store.logout().await.unwrap_err();

    assert_eq!(err.error_code(), "E_NETWORK");
    assert!(!h.session.is_login());
    assert_eq!(h.stored_token(), None);
}

#[tokio::test]
async fn logout_when_logged_out_still_calls_backend() {
    let h = harness();
    h.transport.push(ok_envelope(json!(null)));
    let store = SessionStore::new(h.http.clone());

    store.logout().await.unwrap();

    assert_eq!(h.transport.requests().len(), 1);
    assert!(!store.is_login());
}

#[tokio::test]
async fn fetch_profile_sets_profile() {
    let h = harness_with_token("tok");
    h.transport.push(ok_envelope(json!({
        "userId": "5",
        "userName": "eve",
        "email": "eve@example.com",
        "createdAt": "2024-01-01 10:00:00",
        "updatedAt": "2024-01-01 10:00:00"
    })));
    let store = SessionStore::new(h.http.clone());

    let fetched = store.fetch_profile("5").await.unwrap();

    assert_eq!(fetched.user_name, "eve");
    assert_eq!(h.session.user_id().as_deref(), Some("5"));
}

#[tokio::test]
async fn fetch_profile_failure_keeps_existing_profile() {
    let h = harness_with_token("tok");
    h.session.set_profile(profile("1"));
    h.transport.push(response(404, &json!({}), &[]));
    let store = SessionStore::new(h.http.clone());

    assert!(store.fetch_profile("9").await.is_err());
    assert_eq!(h.session.user_id().as_deref(), Some("1"));
}

//! Integration tests for remember-me auto-login: promotion, rejection,
//! expiry, and at-most-once attempt semantics.

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use common::{body_json, identity, post_json, remember_cookies, set_cookie_value, MemoryDirectory};
use serde_json::json;

const VALIDITY_SECS: i64 = 3600;

/// Cookie header carrying the remember-me triple (and optionally a
/// session id).
fn cookie_header(uid: &str, token: &str, token_time: &str, sid: Option<&str>) -> String {
    let mut header = format!("S_UID={uid}; S_TOKEN={token}; S_TOKEN_TIME={token_time}");
    if let Some(sid) = sid {
        header.push_str(&format!("; SSESSIONID={sid}"));
    }
    header
}

// ---------------------------------------------------------------------------
// Test: a valid cookie triple promotes the fresh session
// ---------------------------------------------------------------------------

#[tokio::test]
async fn valid_triple_promotes_session() {
    let user = identity(42, "alice", "stored-hash");
    let directory = Arc::new(MemoryDirectory::with_users(vec![user.clone()]));
    let (app, sessions) = common::build_test_app(directory.clone());

    let (uid, token, token_time) = remember_cookies(&user, VALIDITY_SECS);
    let cookie = cookie_header(&uid, &token, &token_time, None);

    // An empty create body fails parameter validation, which proves the
    // request got past the auth check without touching the database.
    let response = post_json(app, "/article/create", json!({}), Some(&cookie)).await;
    let sid = set_cookie_value(&response, "SSESSIONID").expect("fresh session cookie");

    let json = body_json(response).await;
    assert_eq!(json["code"], "401", "authenticated, failed on params");

    let session = sessions.get(&sid).await.expect("session registered");
    assert_eq!(session.record.lock().await.user_id, 42);

    assert_eq!(directory.find_by_id_calls.load(Ordering::SeqCst), 1);
    assert_eq!(directory.record_login_calls.load(Ordering::SeqCst), 1);
}

// ---------------------------------------------------------------------------
// Test: a tampered token is rejected and the session stays anonymous
// ---------------------------------------------------------------------------

#[tokio::test]
async fn tampered_token_is_rejected() {
    let user = identity(42, "alice", "stored-hash");
    let directory = Arc::new(MemoryDirectory::with_users(vec![user.clone()]));
    let (app, sessions) = common::build_test_app(directory.clone());

    let (uid, token, token_time) = remember_cookies(&user, VALIDITY_SECS);
    let tampered: String = token.chars().rev().collect();
    let cookie = cookie_header(&uid, &tampered, &token_time, None);

    let response = post_json(app, "/article/create", json!({}), Some(&cookie)).await;
    let sid = set_cookie_value(&response, "SSESSIONID").expect("fresh session cookie");

    let json = body_json(response).await;
    assert_eq!(json["code"], "410");
    assert_eq!(json["msg"], "not login");

    let session = sessions.get(&sid).await.expect("session registered");
    assert_eq!(session.record.lock().await.user_id, 0);

    // The lookup happened; the login was never recorded.
    assert_eq!(directory.find_by_id_calls.load(Ordering::SeqCst), 1);
    assert_eq!(directory.record_login_calls.load(Ordering::SeqCst), 0);
}

// ---------------------------------------------------------------------------
// Test: a failed attempt is not retried for the same session
// ---------------------------------------------------------------------------

#[tokio::test]
async fn failed_attempt_is_not_retried() {
    let user = identity(42, "alice", "stored-hash");
    let directory = Arc::new(MemoryDirectory::with_users(vec![user.clone()]));
    let (app, _) = common::build_test_app(directory.clone());

    let (uid, token, token_time) = remember_cookies(&user, VALIDITY_SECS);
    let tampered: String = token.chars().rev().collect();

    let first = post_json(
        app.clone(),
        "/article/create",
        json!({}),
        Some(&cookie_header(&uid, &tampered, &token_time, None)),
    )
    .await;
    let sid = set_cookie_value(&first, "SSESSIONID").expect("session cookie");
    assert_eq!(directory.find_by_id_calls.load(Ordering::SeqCst), 1);

    // Same session, same bad cookies: no second lookup.
    let second = post_json(
        app,
        "/article/create",
        json!({}),
        Some(&cookie_header(&uid, &tampered, &token_time, Some(&sid))),
    )
    .await;
    let json = body_json(second).await;
    assert_eq!(json["code"], "410");
    assert_eq!(directory.find_by_id_calls.load(Ordering::SeqCst), 1);
}

// ---------------------------------------------------------------------------
// Test: an expired triple fails before any directory lookup
// ---------------------------------------------------------------------------

#[tokio::test]
async fn expired_triple_fails_without_lookup() {
    let user = identity(42, "alice", "stored-hash");
    let directory = Arc::new(MemoryDirectory::with_users(vec![user.clone()]));
    let (app, _) = common::build_test_app(directory.clone());

    // Expiry in the past; an expiry exactly "now" counts as expired too.
    let (uid, token, token_time) = remember_cookies(&user, -10);
    let cookie = cookie_header(&uid, &token, &token_time, None);

    let response = post_json(app, "/article/create", json!({}), Some(&cookie)).await;
    let json = body_json(response).await;
    assert_eq!(json["code"], "410");
    assert_eq!(directory.find_by_id_calls.load(Ordering::SeqCst), 0);
}

// ---------------------------------------------------------------------------
// Test: an expiry equal to the current time is already expired
// ---------------------------------------------------------------------------

#[tokio::test]
async fn expiry_equal_to_now_fails_without_lookup() {
    let user = identity(42, "alice", "stored-hash");
    let directory = Arc::new(MemoryDirectory::with_users(vec![user.clone()]));
    let (app, _) = common::build_test_app(directory.clone());

    // Validity 0 puts the expiry at (or, once the clock ticks, before)
    // the moment of the check; the credential must expire strictly in
    // the future, so equality fails.
    let (uid, token, token_time) = remember_cookies(&user, 0);
    let cookie = cookie_header(&uid, &token, &token_time, None);

    let response = post_json(app, "/article/create", json!({}), Some(&cookie)).await;
    let json = body_json(response).await;
    assert_eq!(json["code"], "410");
    assert_eq!(directory.find_by_id_calls.load(Ordering::SeqCst), 0);
}

// ---------------------------------------------------------------------------
// Test: a partial cookie triple is ignored without a lookup
// ---------------------------------------------------------------------------

#[tokio::test]
async fn partial_triple_fails_without_lookup() {
    let user = identity(42, "alice", "stored-hash");
    let directory = Arc::new(MemoryDirectory::with_users(vec![user.clone()]));
    let (app, _) = common::build_test_app(directory.clone());

    let (uid, token, _) = remember_cookies(&user, VALIDITY_SECS);
    let cookie = format!("S_UID={uid}; S_TOKEN={token}");

    let response = post_json(app, "/article/create", json!({}), Some(&cookie)).await;
    let json = body_json(response).await;
    assert_eq!(json["code"], "410");
    assert_eq!(directory.find_by_id_calls.load(Ordering::SeqCst), 0);
}

// ---------------------------------------------------------------------------
// Test: an inactive account cannot auto-login
// ---------------------------------------------------------------------------

#[tokio::test]
async fn inactive_account_cannot_auto_login() {
    let mut user = identity(42, "alice", "stored-hash");
    user.state = 3;
    let directory = Arc::new(MemoryDirectory::with_users(vec![user.clone()]));
    let (app, _) = common::build_test_app(directory.clone());

    let (uid, token, token_time) = remember_cookies(&user, VALIDITY_SECS);
    let cookie = cookie_header(&uid, &token, &token_time, None);

    let response = post_json(app, "/article/create", json!({}), Some(&cookie)).await;
    let json = body_json(response).await;
    assert_eq!(json["code"], "410");
    assert_eq!(directory.find_by_id_calls.load(Ordering::SeqCst), 1);
    assert_eq!(directory.record_login_calls.load(Ordering::SeqCst), 0);
}

// ---------------------------------------------------------------------------
// Test: a promoted session stays authenticated without the triple
// ---------------------------------------------------------------------------

#[tokio::test]
async fn promoted_session_stays_authenticated() {
    let user = identity(42, "alice", "stored-hash");
    let directory = Arc::new(MemoryDirectory::with_users(vec![user.clone()]));
    let (app, _) = common::build_test_app(directory.clone());

    let (uid, token, token_time) = remember_cookies(&user, VALIDITY_SECS);
    let first = post_json(
        app.clone(),
        "/article/create",
        json!({}),
        Some(&cookie_header(&uid, &token, &token_time, None)),
    )
    .await;
    let sid = set_cookie_value(&first, "SSESSIONID").expect("session cookie");

    // Session cookie only: the promotion is server-side state.
    let second = post_json(
        app,
        "/article/create",
        json!({}),
        Some(&format!("SSESSIONID={sid}")),
    )
    .await;
    let json = body_json(second).await;
    assert_eq!(json["code"], "401", "still authenticated, failed on params");
    assert_eq!(directory.find_by_id_calls.load(Ordering::SeqCst), 1);
}

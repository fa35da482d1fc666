use std::cell::Cell;
use std::rc::Rc;

use futures::executor::{LocalPool, block_on};
use futures::task::LocalSpawnExt;
use serde_json::json;

use super::*;
use crate::session::error::ApiError;
use crate::session::storage::{
    ACCESS_TOKEN_KEY, CART_SNAPSHOT_KEY, MemoryStorage, REFRESH_TOKEN_KEY, TokenStorage,
};
use crate::session::test_support::{MockTransport, response, token_with_exp};
use crate::session::token;

fn fixture() -> (Rc<MockTransport>, Rc<MemoryStorage>, Rc<SessionManager>) {
    let transport = MockTransport::new();
    let storage = Rc::new(MemoryStorage::new());
    let manager = SessionManager::new(transport.clone(), storage.clone());
    (transport, storage, manager)
}

fn future_exp() -> i64 {
    token::now_epoch_secs() + 3600
}

fn past_exp() -> i64 {
    token::now_epoch_secs() - 10
}

fn auth_body(user_id: i64, username: &str) -> serde_json::Value {
    json!({
        "message": "ok",
        "access_token": token_with_exp(user_id, future_exp()),
        "refresh_token": "refresh-1",
        "user": { "id": user_id, "username": username, "email": format!("{username}@example.com") }
    })
}

// =============================================================
// initialize
// =============================================================

#[test]
fn initialize_with_valid_token_is_authenticated_without_network() {
    let (transport, storage, manager) = fixture();
    storage.set(ACCESS_TOKEN_KEY, &token_with_exp(7, future_exp()));

    let phase = block_on(manager.initialize());

    assert_eq!(phase, SessionPhase::Authenticated);
    assert_eq!(manager.current_user().map(|u| u.id), Some(7));
    assert!(transport.calls().is_empty());
}

#[test]
fn initialize_without_tokens_is_anonymous_without_network() {
    let (transport, _storage, manager) = fixture();

    let phase = block_on(manager.initialize());

    assert_eq!(phase, SessionPhase::Anonymous);
    assert!(!manager.is_authenticated());
    assert!(transport.calls().is_empty());
}

#[test]
fn initialize_with_expired_token_refreshes_exactly_once() {
    let (transport, storage, manager) = fixture();
    storage.set(ACCESS_TOKEN_KEY, &token_with_exp(7, past_exp()));
    storage.set(REFRESH_TOKEN_KEY, "refresh-1");
    let new_access = token_with_exp(7, future_exp());
    transport.respond("/auth/refresh", response(200, json!({ "access_token": new_access })));

    let phase = block_on(manager.initialize());

    assert_eq!(phase, SessionPhase::Authenticated);
    assert_eq!(transport.calls_to("/auth/refresh"), 1);
    assert_eq!(storage.get(ACCESS_TOKEN_KEY).as_deref(), Some(new_access.as_str()));
    // The refresh call authenticates with the refresh token.
    assert_eq!(transport.calls()[0].bearer.as_deref(), Some("refresh-1"));
    assert_eq!(manager.current_user().map(|u| u.id), Some(7));
}

#[test]
fn initialize_with_expired_token_and_no_refresh_token_clears() {
    let (transport, storage, manager) = fixture();
    storage.set(ACCESS_TOKEN_KEY, &token_with_exp(7, past_exp()));

    let phase = block_on(manager.initialize());

    assert_eq!(phase, SessionPhase::Anonymous);
    assert!(storage.get(ACCESS_TOKEN_KEY).is_none());
    assert!(transport.calls().is_empty());
}

#[test]
fn initialize_with_malformed_token_clears() {
    let (transport, storage, manager) = fixture();
    storage.set(ACCESS_TOKEN_KEY, "not-a-jwt");
    storage.set(REFRESH_TOKEN_KEY, "refresh-1");

    let phase = block_on(manager.initialize());

    assert_eq!(phase, SessionPhase::Anonymous);
    assert!(storage.get(ACCESS_TOKEN_KEY).is_none());
    assert!(storage.get(REFRESH_TOKEN_KEY).is_none());
    assert!(transport.calls().is_empty());
}

#[test]
fn initialize_with_failed_refresh_ends_anonymous() {
    let (transport, storage, manager) = fixture();
    storage.set(ACCESS_TOKEN_KEY, &token_with_exp(7, past_exp()));
    storage.set(REFRESH_TOKEN_KEY, "refresh-1");
    transport.respond("/auth/refresh", response(401, json!({ "error": "Token has expired" })));

    let phase = block_on(manager.initialize());

    assert_eq!(phase, SessionPhase::Anonymous);
    assert!(storage.get(ACCESS_TOKEN_KEY).is_none());
    assert!(storage.get(REFRESH_TOKEN_KEY).is_none());
}

#[test]
fn initialize_is_idempotent() {
    let (transport, storage, manager) = fixture();
    storage.set(ACCESS_TOKEN_KEY, &token_with_exp(7, future_exp()));

    assert_eq!(block_on(manager.initialize()), SessionPhase::Authenticated);
    assert_eq!(block_on(manager.initialize()), SessionPhase::Authenticated);
    assert!(transport.calls().is_empty());
}

// =============================================================
// login / register / logout
// =============================================================

#[test]
fn login_stores_tokens_and_returns_server_user() {
    let (transport, storage, manager) = fixture();
    transport.respond("/auth/login", response(200, auth_body(7, "ada")));

    let user = block_on(manager.login("ada", "hunter2")).expect("login");

    assert_eq!(user.username, "ada");
    assert!(storage.get(ACCESS_TOKEN_KEY).is_some());
    assert_eq!(storage.get(REFRESH_TOKEN_KEY).as_deref(), Some("refresh-1"));
    assert!(manager.is_authenticated());
    assert_eq!(manager.phase(), SessionPhase::Authenticated);
}

#[test]
fn login_failure_surfaces_server_message() {
    let (transport, storage, manager) = fixture();
    transport.respond(
        "/auth/login",
        response(401, json!({ "error": "Invalid username or password" })),
    );

    let err = block_on(manager.login("ada", "wrong")).expect_err("rejected");

    assert_eq!(err, ApiError::Authentication("Invalid username or password".to_owned()));
    assert!(storage.get(ACCESS_TOKEN_KEY).is_none());
    assert!(!manager.is_authenticated());
}

#[test]
fn login_failure_without_server_message_is_generic() {
    let (transport, _storage, manager) = fixture();
    transport.respond("/auth/login", response(500, json!({})));

    let err = block_on(manager.login("ada", "pw")).expect_err("rejected");

    assert_eq!(err, ApiError::Authentication("Login failed".to_owned()));
}

#[test]
fn register_stores_tokens_and_returns_server_user() {
    let (transport, storage, manager) = fixture();
    transport.respond("/auth/register", response(201, auth_body(9, "bob")));

    let user = block_on(manager.register("bob", "bob@example.com", "pw")).expect("register");

    assert_eq!(user.id, 9);
    assert!(storage.get(ACCESS_TOKEN_KEY).is_some());
    assert!(manager.is_authenticated());
}

#[test]
fn logout_clears_everything_without_network() {
    let (transport, storage, manager) = fixture();
    transport.respond("/auth/login", response(200, auth_body(7, "ada")));
    block_on(manager.login("ada", "pw")).expect("login");
    storage.set(CART_SNAPSHOT_KEY, "{\"items\":[]}");

    manager.logout();

    assert!(storage.get(ACCESS_TOKEN_KEY).is_none());
    assert!(storage.get(REFRESH_TOKEN_KEY).is_none());
    assert!(storage.get(CART_SNAPSHOT_KEY).is_none());
    assert!(!manager.is_authenticated());
    assert_eq!(manager.phase(), SessionPhase::Anonymous);
    assert_eq!(transport.calls_to("/auth/logout"), 0);
}

#[test]
fn identity_change_discards_cart_artifact_before_login_returns() {
    let (transport, storage, manager) = fixture();
    transport.respond("/auth/login", response(200, auth_body(8, "eve")));
    storage.set(CART_SNAPSHOT_KEY, "cart-of-user-a");

    let cart_cleared = Rc::new(Cell::new(false));
    {
        let storage = storage.clone();
        let cart_cleared = cart_cleared.clone();
        manager.set_identity_change_hook(move || {
            // The artifact is already gone when the hook observes storage.
            cart_cleared.set(storage.get(CART_SNAPSHOT_KEY).is_none());
        });
    }

    block_on(manager.login("eve", "pw")).expect("login");

    assert!(cart_cleared.get());
    assert!(storage.get(CART_SNAPSHOT_KEY).is_none());
}

// =============================================================
// refresh
// =============================================================

#[test]
fn refresh_keeps_refresh_token_when_not_rotated() {
    let (transport, storage, manager) = fixture();
    storage.set(REFRESH_TOKEN_KEY, "refresh-1");
    transport.respond(
        "/auth/refresh",
        response(200, json!({ "access_token": token_with_exp(7, future_exp()) })),
    );

    block_on(manager.refresh()).expect("refresh");

    assert_eq!(storage.get(REFRESH_TOKEN_KEY).as_deref(), Some("refresh-1"));
}

#[test]
fn refresh_adopts_rotated_refresh_token_when_supplied() {
    let (transport, storage, manager) = fixture();
    storage.set(REFRESH_TOKEN_KEY, "refresh-1");
    transport.respond(
        "/auth/refresh",
        response(
            200,
            json!({ "access_token": token_with_exp(7, future_exp()), "refresh_token": "refresh-2" }),
        ),
    );

    block_on(manager.refresh()).expect("refresh");

    assert_eq!(storage.get(REFRESH_TOKEN_KEY).as_deref(), Some("refresh-2"));
}

#[test]
fn refresh_with_malformed_body_fails_and_clears() {
    let (transport, storage, manager) = fixture();
    storage.set(ACCESS_TOKEN_KEY, &token_with_exp(7, past_exp()));
    storage.set(REFRESH_TOKEN_KEY, "refresh-1");
    transport.respond("/auth/refresh", response(200, json!({ "unexpected": true })));

    let err = block_on(manager.refresh()).expect_err("malformed");

    assert!(matches!(err, ApiError::RefreshFailure(_)));
    assert!(storage.get(ACCESS_TOKEN_KEY).is_none());
    assert!(storage.get(REFRESH_TOKEN_KEY).is_none());
}

#[test]
fn concurrent_refresh_calls_share_one_network_call() {
    let (transport, storage, manager) = fixture();
    storage.set(REFRESH_TOKEN_KEY, "refresh-1");

    let mut pool = LocalPool::new();
    let spawner = pool.spawner();
    let results: Rc<std::cell::RefCell<Vec<Result<String, ApiError>>>> =
        Rc::new(std::cell::RefCell::new(Vec::new()));

    for _ in 0..3 {
        let manager = manager.clone();
        let results = results.clone();
        spawner
            .spawn_local(async move {
                let outcome = manager.refresh().await;
                results.borrow_mut().push(outcome);
            })
            .expect("spawn");
    }

    pool.run_until_stalled();
    assert_eq!(transport.calls_to("/auth/refresh"), 1);
    assert_eq!(transport.pending_count("/auth/refresh"), 1);

    let new_access = token_with_exp(7, future_exp());
    transport.resolve_next("/auth/refresh", response(200, json!({ "access_token": new_access })));
    pool.run_until_stalled();

    let results = results.borrow();
    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r.as_deref() == Ok(new_access.as_str())));
    assert_eq!(transport.calls_to("/auth/refresh"), 1);
}

#[test]
fn failed_refresh_clears_session_and_signals_expiry_once() {
    let (transport, storage, manager) = fixture();
    storage.set(ACCESS_TOKEN_KEY, &token_with_exp(7, past_exp()));
    storage.set(REFRESH_TOKEN_KEY, "refresh-1");

    let expirations = Rc::new(Cell::new(0));
    {
        let expirations = expirations.clone();
        manager.set_session_expired_hook(move || expirations.set(expirations.get() + 1));
    }

    let mut pool = LocalPool::new();
    let spawner = pool.spawner();
    let results: Rc<std::cell::RefCell<Vec<Result<String, ApiError>>>> =
        Rc::new(std::cell::RefCell::new(Vec::new()));

    for _ in 0..2 {
        let manager = manager.clone();
        let results = results.clone();
        spawner
            .spawn_local(async move {
                let outcome = manager.refresh().await;
                results.borrow_mut().push(outcome);
            })
            .expect("spawn");
    }

    pool.run_until_stalled();
    transport.resolve_next("/auth/refresh", response(401, json!({ "error": "Token revoked" })));
    pool.run_until_stalled();

    let results = results.borrow();
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| matches!(r, Err(ApiError::RefreshFailure(_)))));
    assert!(storage.get(ACCESS_TOKEN_KEY).is_none());
    assert!(storage.get(REFRESH_TOKEN_KEY).is_none());
    assert_eq!(expirations.get(), 1);
    assert_eq!(manager.phase(), SessionPhase::Anonymous);
}

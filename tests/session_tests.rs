// SPDX-License-Identifier: MIT
// Copyright 2026 Trenvus Contributors

//! Session lifecycle against the mock backend.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use trenvus_client::error::ClientError;
use trenvus_client::models::SessionState;
use trenvus_client::storage::{keys, MemoryStorage, Storage};

mod common;
use common::{spawn_mock_backend, test_client, REVOKED_REFRESH_TOKEN};

#[tokio::test]
async fn test_login_persists_and_survives_reload() {
    let (base_url, mock) = spawn_mock_backend().await;
    let storage = Arc::new(MemoryStorage::new());

    let client = test_client(&base_url, storage.clone());
    client.session.login("ana@example.com", "secret").await.unwrap();
    let state = client.session.snapshot().await;
    assert!(state.is_authenticated());

    let raw = storage.get(keys::SESSION).unwrap().expect("session persisted");
    let persisted: SessionState = serde_json::from_str(&raw).unwrap();
    assert_eq!(persisted, state);

    // A fresh client over the same storage is signed in without any call
    let reloaded = test_client(&base_url, storage);
    assert!(reloaded.session.is_authenticated().await);
    let token = reloaded.session.get_valid_access_token().await.unwrap();
    assert_eq!(Some(token), state.access_token);
    assert_eq!(mock.login_calls.load(Ordering::SeqCst), 1);
    assert_eq!(mock.refresh_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_identity_decoded_from_token() {
    let (base_url, _mock) = spawn_mock_backend().await;
    let client = test_client(&base_url, Arc::new(MemoryStorage::new()));

    client.session.login("ana@example.com", "secret").await.unwrap();
    assert_eq!(client.session.email().await.as_deref(), Some("ana@example.com"));
    assert_eq!(client.session.nickname().await.as_deref(), Some("ana"));
    assert!(!client.session.is_admin().await);

    client.session.login_admin().await.unwrap();
    assert_eq!(client.session.roles().await, vec!["USER", "ADMIN"]);
    assert!(client.session.is_admin().await);
}

#[tokio::test]
async fn test_wrong_password_surfaces_backend_message() {
    let (base_url, _mock) = spawn_mock_backend().await;
    let client = test_client(&base_url, Arc::new(MemoryStorage::new()));

    let err = client
        .session
        .login("ana@example.com", "wrong")
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_eq!(err.to_string(), "Credenciais inválidas");
    assert!(!client.session.is_authenticated().await);
}

#[tokio::test]
async fn test_expired_token_refreshed_once() {
    let (base_url, mock) = spawn_mock_backend().await;
    let client = test_client(&base_url, Arc::new(MemoryStorage::new()));

    mock.access_ttl_secs.store(-60, Ordering::SeqCst);
    client.session.login("ana@example.com", "secret").await.unwrap();
    let stale = client.session.snapshot().await.access_token;

    let (a, b, c) = tokio::join!(
        client.session.get_valid_access_token(),
        client.session.get_valid_access_token(),
        client.session.get_valid_access_token()
    );
    let token = a.unwrap();
    assert_eq!(token, b.unwrap());
    assert_eq!(token, c.unwrap());
    assert_ne!(Some(token.clone()), stale);
    assert_eq!(mock.refresh_calls.load(Ordering::SeqCst), 1);

    // The refreshed token is used directly afterwards
    let wallet = client.api.get_wallet(&token).await.unwrap();
    assert_eq!(wallet.usd_cents, 0);
    client.session.get_valid_access_token().await.unwrap();
    assert_eq!(mock.refresh_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_token_inside_margin_is_refreshed() {
    let (base_url, mock) = spawn_mock_backend().await;
    let client = test_client(&base_url, Arc::new(MemoryStorage::new()));

    mock.access_ttl_secs.store(5, Ordering::SeqCst);
    client.session.login("ana@example.com", "secret").await.unwrap();

    client.session.get_valid_access_token().await.unwrap();
    assert_eq!(mock.refresh_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_rejected_refresh_leaves_session_for_caller() {
    let (base_url, mock) = spawn_mock_backend().await;
    let storage = Arc::new(MemoryStorage::new());
    let state = SessionState {
        access_token: Some("h.e30.s".to_string()),
        access_expires_at: Some("2020-01-01T00:00:00Z".to_string()),
        refresh_token: Some(REVOKED_REFRESH_TOKEN.to_string()),
    };
    storage
        .set(keys::SESSION, &serde_json::to_string(&state).unwrap())
        .unwrap();
    let client = test_client(&base_url, storage.clone());

    let err = client.session.get_valid_access_token().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "Refresh token inválido");
    assert_eq!(client.session.snapshot().await, state);
    assert_eq!(mock.refresh_calls.load(Ordering::SeqCst), 1);

    // The page reacts to the 401 by dropping the session
    client.session.force_logout().await;
    assert!(!client.session.is_authenticated().await);
    assert_eq!(storage.get(keys::SESSION).unwrap(), None);
}

#[tokio::test]
async fn test_unauthenticated_makes_no_calls() {
    let (base_url, mock) = spawn_mock_backend().await;
    let client = test_client(&base_url, Arc::new(MemoryStorage::new()));

    let err = client.session.get_valid_access_token().await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthenticated));
    assert_eq!(err.to_string(), "Not authenticated");
    assert_eq!(mock.refresh_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_logout_clears_when_server_fails() {
    let (base_url, mock) = spawn_mock_backend().await;
    let storage = Arc::new(MemoryStorage::new());
    let client = test_client(&base_url, storage.clone());
    client.session.login("ana@example.com", "secret").await.unwrap();

    mock.logout_status.store(500, Ordering::SeqCst);
    let result = client.session.logout().await;

    assert_eq!(result.unwrap_err().status(), Some(500));
    assert!(!client.session.is_authenticated().await);
    assert_eq!(client.session.snapshot().await, SessionState::default());
    assert_eq!(storage.get(keys::SESSION).unwrap(), None);
    assert_eq!(mock.logout_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_logout_success() {
    let (base_url, mock) = spawn_mock_backend().await;
    let client = test_client(&base_url, Arc::new(MemoryStorage::new()));
    client.session.login("ana@example.com", "secret").await.unwrap();

    client.session.logout().await.unwrap();

    assert!(!client.session.is_authenticated().await);
    assert_eq!(client.session.email().await, None);
    assert_eq!(mock.logout_calls.load(Ordering::SeqCst), 1);
}

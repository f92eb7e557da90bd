// SPDX-License-Identifier: MIT
// Copyright 2026 Trenvus Contributors

//! Session manager: the single owner of client authentication state.
//!
//! Handles:
//! - Login, registration and demo logins (store + persist the token bundle)
//! - Handing out a usable access token, refreshing it when near expiry
//! - Logout (best-effort server invalidation, unconditional local clear)
//! - Display-only identity decoded from the current access token
//!
//! The manager is an explicit object shared as `Arc<SessionManager>`; it
//! reaches the backend only through [`AuthBackend`], so refresh behavior can
//! be exercised against a fake.

use crate::error::{ClientError, Result};
use crate::models::{AuthResponse, LoginRequest, RegisterRequest, SessionState};
use crate::services::api::ApiClient;
use crate::services::claims::{decode_identity_claims, ClaimsError, IdentityClaims};
use crate::storage::{keys, Storage};
use crate::time_utils::parse_timestamp;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// An access token expiring within this margin is refreshed before use.
const ACCESS_TOKEN_REFRESH_MARGIN_SECS: i64 = 10;

/// Backend calls that mint or revoke session tokens.
#[async_trait::async_trait]
pub trait AuthBackend: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse>;
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse>;
    async fn login_test_account(&self, id: u32) -> Result<AuthResponse>;
    async fn login_admin(&self) -> Result<AuthResponse>;
    async fn refresh(&self, refresh_token: &str) -> Result<AuthResponse>;
    async fn logout(&self, refresh_token: &str) -> Result<()>;
}

#[async_trait::async_trait]
impl AuthBackend for ApiClient {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse> {
        ApiClient::login(self, request).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        ApiClient::register(self, request).await
    }

    async fn login_test_account(&self, id: u32) -> Result<AuthResponse> {
        ApiClient::login_test_account(self, id).await
    }

    async fn login_admin(&self) -> Result<AuthResponse> {
        ApiClient::login_admin(self).await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<AuthResponse> {
        ApiClient::refresh(self, refresh_token).await
    }

    async fn logout(&self, refresh_token: &str) -> Result<()> {
        ApiClient::logout(self, refresh_token).await
    }
}

/// Owner of the client session.
pub struct SessionManager {
    backend: Arc<dyn AuthBackend>,
    storage: Arc<dyn Storage>,
    state: RwLock<SessionState>,
    /// Serializes refreshes so one expiry costs one refresh call.
    refresh_lock: Mutex<()>,
}

impl SessionManager {
    /// Create a manager, restoring any session persisted in `storage`.
    ///
    /// A missing or unreadable record yields an empty session.
    pub fn load(backend: Arc<dyn AuthBackend>, storage: Arc<dyn Storage>) -> Self {
        let state = load_state(storage.as_ref());
        tracing::debug!(
            authenticated = state.is_authenticated(),
            "Session restored from storage"
        );

        Self {
            backend,
            storage,
            state: RwLock::new(state),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Copy of the current tokens.
    pub async fn snapshot(&self) -> SessionState {
        self.state.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.is_authenticated()
    }

    // ─── Session creation ────────────────────────────────────────────────────

    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let payload = self.backend.login(&request).await?;
        self.store(payload).await;
        tracing::info!("Logged in");
        Ok(())
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<()> {
        let payload = self.backend.register(request).await?;
        self.store(payload).await;
        tracing::info!("Registered and logged in");
        Ok(())
    }

    pub async fn login_test_account(&self, id: u32) -> Result<()> {
        let payload = self.backend.login_test_account(id).await?;
        self.store(payload).await;
        tracing::info!(test_account = id, "Logged in with test account");
        Ok(())
    }

    pub async fn login_admin(&self) -> Result<()> {
        let payload = self.backend.login_admin().await?;
        self.store(payload).await;
        tracing::info!("Logged in with admin demo account");
        Ok(())
    }

    // ─── Token management ────────────────────────────────────────────────────

    /// Get an access token that will not expire in flight.
    ///
    /// Fails with [`ClientError::Unauthenticated`] (no network call) when
    /// either token is missing. Refresh failures are returned as-is and
    /// leave the session untouched; the caller decides whether to log out.
    pub async fn get_valid_access_token(&self) -> Result<String> {
        self.get_valid_access_token_at(Utc::now()).await
    }

    /// [`Self::get_valid_access_token`] with an explicit clock reading.
    pub async fn get_valid_access_token_at(&self, now: DateTime<Utc>) -> Result<String> {
        // Fast path: cached token still valid
        {
            let state = self.state.read().await;
            let (access, _) = credentials(&state)?;
            if is_fresh(state.access_expires_at.as_deref(), now) {
                return Ok(access.to_string());
            }
        }

        let _guard = self.refresh_lock.lock().await;

        // Another task may have refreshed while we were waiting
        let refresh_token = {
            let state = self.state.read().await;
            let (access, refresh) = credentials(&state)?;
            if is_fresh(state.access_expires_at.as_deref(), now) {
                return Ok(access.to_string());
            }
            refresh.to_string()
        };

        tracing::info!("Access token expiring, refreshing");
        let payload = self.backend.refresh(&refresh_token).await?;

        let mut state = self.state.write().await;
        if state.refresh_token() != Some(refresh_token.as_str()) {
            // Logged out or back in while the refresh was in flight: the
            // current session wins and the refreshed tokens are dropped
            tracing::warn!("Session changed during refresh, discarding refreshed tokens");
            let (access, _) = credentials(&state)?;
            return Ok(access.to_string());
        }

        let access = payload.access_token.clone();
        let next = SessionState::from(payload);
        self.persist(&next);
        *state = next;
        tracing::info!("Access token refreshed");
        Ok(access)
    }

    // ─── Session teardown ────────────────────────────────────────────────────

    /// Log out: ask the backend to revoke the refresh token, then clear the
    /// local session no matter how that went.
    ///
    /// The backend's answer is returned for callers that want to inspect it.
    pub async fn logout(&self) -> Result<()> {
        let refresh_token = self.state.read().await.refresh_token().map(str::to_string);

        let result = match refresh_token {
            Some(token) => self.backend.logout(&token).await,
            None => Ok(()),
        };
        if let Err(e) = &result {
            tracing::warn!(error = %e, "Server-side logout failed, clearing local session anyway");
        }

        self.clear().await;
        tracing::info!("Logged out");
        result
    }

    /// Drop the local session without contacting the backend.
    pub async fn force_logout(&self) {
        self.clear().await;
        tracing::info!("Session cleared locally");
    }

    // ─── Identity (display only) ─────────────────────────────────────────────

    /// Decode the current access token's claims, exposing why it failed.
    pub async fn identity_result(&self) -> std::result::Result<IdentityClaims, ClaimsError> {
        let state = self.state.read().await;
        decode_identity_claims(state.access_token())
    }

    /// Claims of the current access token, or `None` when they cannot be read.
    ///
    /// Display-only: not an authorization decision.
    pub async fn identity(&self) -> Option<IdentityClaims> {
        match self.identity_result().await {
            Ok(claims) => Some(claims),
            Err(ClaimsError::Missing) => None,
            Err(e) => {
                tracing::debug!(error = %e, "Access token claims unreadable");
                None
            }
        }
    }

    pub async fn email(&self) -> Option<String> {
        self.identity().await.and_then(|c| c.email)
    }

    pub async fn nickname(&self) -> Option<String> {
        self.identity().await.and_then(|c| c.nickname)
    }

    pub async fn roles(&self) -> Vec<String> {
        self.identity().await.map(|c| c.roles).unwrap_or_default()
    }

    /// Whether to show admin screens. The backend still enforces the role.
    pub async fn is_admin(&self) -> bool {
        self.identity().await.is_some_and(|c| c.is_admin())
    }

    // ─── Persistence ─────────────────────────────────────────────────────────

    /// Replace the whole session with a fresh token bundle and persist it.
    async fn store(&self, payload: AuthResponse) {
        let next = SessionState::from(payload);
        let mut state = self.state.write().await;
        self.persist(&next);
        *state = next;
    }

    fn persist(&self, state: &SessionState) {
        match serde_json::to_string(state) {
            Ok(raw) => {
                if let Err(e) = self.storage.set(keys::SESSION, &raw) {
                    tracing::warn!(error = %e, "Failed to persist session, keeping it in memory");
                }
            }
            Err(e) => tracing::warn!(error = %e, "Failed to serialize session"),
        }
    }

    async fn clear(&self) {
        *self.state.write().await = SessionState::default();
        if let Err(e) = self.storage.remove(keys::SESSION) {
            tracing::warn!(error = %e, "Failed to remove persisted session");
        }
    }
}

/// Read the persisted session. Missing or malformed records are empty.
fn load_state(storage: &dyn Storage) -> SessionState {
    let raw = match storage.get(keys::SESSION) {
        Ok(Some(raw)) => raw,
        Ok(None) => return SessionState::default(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read persisted session");
            return SessionState::default();
        }
    };

    serde_json::from_str(&raw).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Persisted session is malformed, ignoring it");
        SessionState::default()
    })
}

/// Both tokens, or `Unauthenticated`. Empty strings count as missing.
fn credentials(state: &SessionState) -> Result<(&str, &str)> {
    match (state.access_token(), state.refresh_token()) {
        (Some(access), Some(refresh)) => Ok((access, refresh)),
        _ => Err(ClientError::Unauthenticated),
    }
}

/// True when the token outlives `now` by more than the safety margin.
/// A missing or unparsable expiry counts as expired.
fn is_fresh(expires_at: Option<&str>, now: DateTime<Utc>) -> bool {
    let margin = Duration::seconds(ACCESS_TOKEN_REFRESH_MARGIN_SECS);
    expires_at
        .and_then(parse_timestamp)
        .is_some_and(|expires_at| now + margin < expires_at)
}

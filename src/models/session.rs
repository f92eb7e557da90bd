// SPDX-License-Identifier: MIT
// Copyright 2026 Trenvus Contributors

//! Persisted session record.

use crate::models::AuthResponse;
use serde::{Deserialize, Serialize};

/// Client session tokens, stored as one JSON record.
///
/// The session is authenticated only when both tokens are present and
/// non-empty. Identity
/// (email, nickname, roles) is never stored here; it is decoded from the
/// access token on every read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    #[serde(default)]
    pub access_token: Option<String>,
    /// Access token expiry (ISO 8601)
    #[serde(default)]
    pub access_expires_at: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some() && self.refresh_token().is_some()
    }

    /// The access token, with an empty string read as absent.
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|t| !t.is_empty())
    }

    /// The refresh token, with an empty string read as absent.
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref().filter(|t| !t.is_empty())
    }
}

impl From<AuthResponse> for SessionState {
    fn from(payload: AuthResponse) -> Self {
        Self {
            access_token: Some(payload.access_token),
            access_expires_at: Some(payload.access_expires_at),
            refresh_token: Some(payload.refresh_token),
        }
    }
}

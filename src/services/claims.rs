// SPDX-License-Identifier: MIT
// Copyright 2026 Trenvus Contributors

//! Identity claims decoded from an access token, for DISPLAY ONLY.
//!
//! The signature is not verified. Nothing here may gate access: the backend
//! enforces roles on every request. These claims only decide what the UI
//! shows (the user's e-mail, whether to render the admin menu).

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde_json::{Map, Value};

/// Role name the backend assigns to administrators.
pub const ADMIN_ROLE: &str = "ADMIN";

/// Identity fields read from the token payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityClaims {
    pub email: Option<String>,
    pub nickname: Option<String>,
    pub roles: Vec<String>,
}

impl IdentityClaims {
    /// Whether to show admin UI. Exact, case-sensitive match on `ADMIN`.
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|r| r == ADMIN_ROLE)
    }
}

/// Why a token's claims could not be read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClaimsError {
    #[error("no access token")]
    Missing,

    #[error("token does not have a payload segment")]
    Malformed,

    #[error("payload is not valid base64url: {0}")]
    Encoding(String),

    #[error("payload is not a JSON object: {0}")]
    Payload(String),
}

/// Decode the payload segment of a JWT-shaped token.
///
/// Fields with an unexpected type are treated as absent rather than failing
/// the whole decode: a numeric `email` yields no email, a `roles` value that
/// is neither a string nor an array yields no roles.
pub fn decode_identity_claims(token: Option<&str>) -> Result<IdentityClaims, ClaimsError> {
    let token = token.filter(|t| !t.is_empty()).ok_or(ClaimsError::Missing)?;

    let mut segments = token.split('.');
    let payload = match (segments.next(), segments.next()) {
        (Some(_), Some(payload)) if !payload.is_empty() => payload,
        _ => return Err(ClaimsError::Malformed),
    };

    // Tokens may carry base64 padding; the URL-safe alphabet is otherwise strict.
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| ClaimsError::Encoding(e.to_string()))?;

    let claims: Map<String, Value> =
        serde_json::from_slice(&bytes).map_err(|e| ClaimsError::Payload(e.to_string()))?;

    Ok(IdentityClaims {
        email: string_claim(&claims, "email"),
        nickname: string_claim(&claims, "nickname"),
        roles: roles_claim(&claims),
    })
}

fn string_claim(claims: &Map<String, Value>, name: &str) -> Option<String> {
    claims.get(name).and_then(Value::as_str).map(str::to_string)
}

fn roles_claim(claims: &Map<String, Value>) -> Vec<String> {
    match claims.get("roles") {
        Some(Value::String(role)) => vec![role.clone()],
        Some(Value::Array(roles)) => roles
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

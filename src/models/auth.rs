// SPDX-License-Identifier: MIT
// Copyright 2026 Trenvus Contributors

//! Authentication payloads.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Token bundle returned by login, registration, test login and refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(feature = "binding-generation", ts(export))]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token expiry (ISO 8601)
    pub access_expires_at: String,
    pub refresh_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 64))]
    pub nickname: Option<String>,
    /// E.164 phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub(crate) struct TestLoginRequest {
    #[validate(range(min = 1))]
    pub id: u32,
}

/// Body for both refresh and logout.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RefreshTokenRequest<'a> {
    pub refresh_token: &'a str,
}

/// Demo account availability, for the login page's test-account buttons.
#[derive(Debug, Clone, Deserialize)]
pub struct TestAccountsStatus {
    pub enabled: bool,
    pub count: u32,
    #[serde(default)]
    pub accounts: Vec<TestAccountInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TestAccountInfo {
    pub email: String,
    pub role: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "binding-generation")]
    #[test]
    fn test_bindings_land_in_default_export_dir() {
        use std::path::Path;

        assert_eq!(
            AuthResponse::output_path().as_deref(),
            Some(Path::new("AuthResponse.ts"))
        );
        assert_eq!(
            crate::models::WalletResponse::output_path().as_deref(),
            Some(Path::new("WalletResponse.ts"))
        );
    }

    #[test]
    fn test_auth_response_wire_format() {
        let raw = r#"{"accessToken":"a","accessExpiresAt":"2026-01-01T00:00:00Z","refreshToken":"r"}"#;
        let parsed: AuthResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.access_token, "a");
        assert_eq!(parsed.refresh_token, "r");
        assert_eq!(parsed.token_type, "Bearer");
    }

    #[test]
    fn test_login_request_validation() {
        let ok = LoginRequest {
            email: "ana@example.com".to_string(),
            password: "secret".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad = LoginRequest {
            email: "not-an-email".to_string(),
            password: String::new(),
        };
        let errors = bad.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
        assert!(errors.field_errors().contains_key("password"));
    }
}

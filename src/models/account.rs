// SPDX-License-Identifier: MIT
// Copyright 2026 Trenvus Contributors

//! Account self-service payloads.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Current user profile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub email: String,
    pub nickname: Option<String>,
    /// E.164 phone number
    pub phone: Option<String>,
    /// Avatar image as a `data:` URL
    pub avatar_data_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdatePhoneRequest<'a> {
    pub phone: &'a str,
}

#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1))]
    pub current_password: String,
    #[validate(length(min = 4))]
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct DeleteAccountRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Trenvus Contributors

//! Client error types with consistent, user-displayable messages.

use crate::config::ConfigError;
use crate::money::AmountError;
use crate::storage::StorageError;

/// Fallback message when an error response carries no usable body.
pub const GENERIC_REQUEST_ERROR: &str = "Request error";

/// Client error type. Every variant renders to a message a page can show inline.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// No session is present; raised locally without a network call.
    #[error("Not authenticated")]
    Unauthenticated,

    /// The backend answered with a non-success status.
    #[error("{message}")]
    Api {
        status: u16,
        url: String,
        message: String,
        body: String,
    },

    /// The request never produced a response.
    #[error("Network error accessing API")]
    Network { url: String, message: String },

    /// A success response whose body was not the expected JSON.
    #[error("Invalid API response")]
    ResponseParse { url: String, body: String },

    #[error(transparent)]
    InvalidAmount(#[from] AmountError),

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A payment bridge flow ended without crediting the wallet.
    #[error("{0}")]
    Payment(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ClientError {
    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for a 401 from the backend or a missing local session.
    ///
    /// Callers use this to decide whether to force a logout.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthenticated) || self.status() == Some(401)
    }

    /// True for failures that happened before any response arrived.
    pub fn is_network(&self) -> bool {
        matches!(self, ClientError::Network { .. })
    }
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        let mut fields: Vec<&str> = field_errors.keys().map(|k| k.as_ref()).collect();
        fields.sort_unstable();
        ClientError::Validation(format!("invalid fields: {}", fields.join(", ")))
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

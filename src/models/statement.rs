// SPDX-License-Identifier: MIT
// Copyright 2026 Trenvus Contributors

//! Statement payloads.

use serde::{Deserialize, Serialize};

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub has_next: bool,
}

/// Statement listing as sent by the backend: either a [`Page`] or a bare
/// array with no continuation flag.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum StatementListing<T> {
    Page(Page<T>),
    List(Vec<T>),
}

impl<T> StatementListing<T> {
    pub(crate) fn is_empty(&self) -> bool {
        match self {
            StatementListing::Page(page) => page.items.is_empty(),
            StatementListing::List(items) => items.is_empty(),
        }
    }
}

/// Private statement entry. Only values are exposed, never counterparties.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivateStatementItem {
    pub id: i64,
    /// Backend-assigned transaction code
    pub tec: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub created_at: Option<String>,
    #[serde(default)]
    pub values: Vec<StatementValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatementValue {
    pub currency: String,
    pub cents: i64,
    #[serde(default)]
    pub fee: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SendStatementRequest<'a> {
    pub pdf_base64: &'a str,
    pub file_name: &'a str,
    pub language: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatementEmailResponse {
    pub status: String,
    pub message: String,
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Trenvus Contributors

//! Admin console payloads.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AdminUserSummary {
    pub id: i64,
    pub email: Option<String>,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStatementItem {
    pub id: i64,
    pub tec: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub created_at: Option<String>,
    pub usd_amount_cents: Option<i64>,
    pub trv_amount_cents: Option<i64>,
    pub fee_usd_cents: Option<i64>,
    pub source_user_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminFeeIncomeItem {
    pub id: i64,
    pub tec: String,
    pub created_at: Option<String>,
    pub usd_cents: i64,
    pub source_user_id: Option<i64>,
    pub source_email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminFeeIncomeResponse {
    pub total_usd_cents: i64,
    #[serde(default)]
    pub items: Vec<AdminFeeIncomeItem>,
}

/// Absolute balances to set; amounts in the strict `"0.00"` wire format.
#[derive(Debug, Serialize)]
pub(crate) struct SetWalletRequest<'a> {
    pub usd: &'a str,
    pub trv: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct SetRoleRequest<'a> {
    pub role: &'a str,
}

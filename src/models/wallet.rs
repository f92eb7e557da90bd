// SPDX-License-Identifier: MIT
// Copyright 2026 Trenvus Contributors

//! Wallet, conversion and transfer payloads.
//!
//! All amounts are integer minor units as reported by the backend.

use crate::money::format_cents;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Wallet balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(feature = "binding-generation", ts(export))]
pub struct WalletResponse {
    pub usd_cents: i64,
    /// Older backends call the token balance `vpsCents`
    #[serde(alias = "vpsCents")]
    pub trv_cents: i64,
}

impl WalletResponse {
    /// USD balance as shown to the user, e.g. `"10.00"`.
    pub fn usd_display(&self) -> String {
        format_cents(self.usd_cents)
    }

    pub fn trv_display(&self) -> String {
        format_cents(self.trv_cents)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletOperationResponse {
    #[serde(flatten)]
    pub wallet: WalletResponse,
    pub transaction_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertResponse {
    #[serde(flatten)]
    pub wallet: WalletResponse,
    pub transaction_id: Option<i64>,
    pub fee_usd_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferResponse {
    #[serde(flatten)]
    pub wallet: WalletResponse,
    pub transaction_id: Option<i64>,
    pub fee_trv_cents: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UsdAmountRequest<'a> {
    pub amount_usd: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TrvAmountRequest<'a> {
    pub amount_trv: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TransferRequest<'a> {
    /// Recipient e-mail or nickname
    pub to_identifier: &'a str,
    pub amount_trv: &'a str,
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Trenvus Contributors

//! QR-code invoice payloads.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceQrResponse {
    /// Opaque payload encoded into the QR image
    pub qr_payload: String,
    pub qr_code_id: String,
    pub amount: String,
    pub currency: String,
    pub recipient_email: String,
    pub recipient_nickname: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatedInvoicePayment {
    pub simulated_payer_id: i64,
    pub simulated_payer_email: String,
    pub recipient_id: i64,
    pub amount: String,
    pub currency: String,
    pub new_balance_cents: i64,
}

#[derive(Debug, Serialize)]
pub(crate) struct GenerateInvoiceRequest<'a> {
    pub amount: &'a str,
    pub currency: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PayInvoiceRequest<'a> {
    pub qr_payload: &'a str,
    pub amount: &'a str,
    pub currency: &'a str,
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Trenvus Contributors

//! Third-party payment bridge payloads.

use serde::{Deserialize, Serialize};

/// Order created on the PayPal side; the user approves it at `approval_url`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayPalOrder {
    pub order_id: String,
    pub approval_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PayPalCapture {
    pub status: String,
}

impl PayPalCapture {
    pub fn is_completed(&self) -> bool {
        self.status == "COMPLETED"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MercadoPagoPreference {
    pub preference_id: Option<String>,
    pub init_point: Option<String>,
    pub sandbox_init_point: Option<String>,
}

impl MercadoPagoPreference {
    /// Checkout URL, preferring the sandbox one.
    pub fn checkout_url(&self) -> Option<&str> {
        self.sandbox_init_point
            .as_deref()
            .or(self.init_point.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MercadoPagoPaymentStatus {
    pub status: String,
    pub status_detail: Option<String>,
}

/// Providers take the amount as a JSON number.
#[derive(Debug, Serialize)]
pub(crate) struct ProviderAmountRequest {
    pub amount: f64,
}

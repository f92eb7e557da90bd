// SPDX-License-Identifier: MIT
// Copyright 2026 Trenvus Contributors

//! Third-party payment bridges (PayPal, MercadoPago).
//!
//! Both flows leave the client for a provider checkout page and come back
//! later, possibly in a fresh process. The order id and amount travel across
//! that redirect in durable storage and are removed once the flow ends.

use crate::error::{ClientError, Result};
use crate::i18n::{lookup, Locale};
use crate::models::WalletOperationResponse;
use crate::money::{format_cents, parse_amount_strict};
use crate::services::api::ApiClient;
use crate::services::session::SessionManager;
use crate::storage::{keys, Storage};
use std::sync::Arc;

/// Result of a started PayPal checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayPalCheckout {
    pub order_id: String,
    /// Where to send the user to approve the order
    pub approval_url: String,
}

/// A provider payment that was credited to the wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedPayment {
    /// Deposited amount in the strict `"10.00"` form
    pub amount_usd: String,
    pub deposit: WalletOperationResponse,
}

/// How the provider sent the user back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnStatus {
    Approved,
    Cancelled,
    Rejected,
    Pending,
    Unknown,
}

impl ReturnStatus {
    /// Interpret a provider's return query value (`paypal`,
    /// `collection_status` or `mercadopago` parameter).
    pub fn from_query(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("success" | "approved") => ReturnStatus::Approved,
            Some("cancel" | "cancelled") => ReturnStatus::Cancelled,
            Some("failure" | "rejected") => ReturnStatus::Rejected,
            Some("pending" | "in_process") => ReturnStatus::Pending,
            _ => ReturnStatus::Unknown,
        }
    }
}

/// Drives provider checkouts and credits the wallet afterwards.
pub struct PaymentFlows {
    api: Arc<ApiClient>,
    session: Arc<SessionManager>,
    storage: Arc<dyn Storage>,
}

impl PaymentFlows {
    pub fn new(api: Arc<ApiClient>, session: Arc<SessionManager>, storage: Arc<dyn Storage>) -> Self {
        Self {
            api,
            session,
            storage,
        }
    }

    // ─── PayPal ──────────────────────────────────────────────────────────────

    /// Create a PayPal order for `amount_usd` and remember it for the return trip.
    pub async fn start_paypal(&self, amount_usd: &str, locale: Locale) -> Result<PayPalCheckout> {
        let cents = parse_amount_strict(amount_usd)?;
        let token = self.session.get_valid_access_token().await?;

        let order = self.api.paypal_create_order(&token, provider_amount(cents)).await?;
        let approval_url = order
            .approval_url
            .filter(|url| !url.is_empty())
            .ok_or_else(|| ClientError::Payment(lookup(locale, "payment.missingCheckoutUrl")))?;

        self.storage.set(keys::PAYPAL_ORDER_ID, &order.order_id)?;
        self.storage.set(keys::PAYPAL_AMOUNT, &format_cents(cents))?;
        tracing::info!(order_id = %order.order_id, "PayPal order created");

        Ok(PayPalCheckout {
            order_id: order.order_id,
            approval_url,
        })
    }

    /// Finish a PayPal checkout after the provider redirect.
    ///
    /// Captures the stored order and, when PayPal reports it `COMPLETED`,
    /// deposits the stored amount. The stored order is forgotten however the
    /// flow ends.
    pub async fn complete_paypal(
        &self,
        status: ReturnStatus,
        locale: Locale,
    ) -> Result<CompletedPayment> {
        let result = self.capture_paypal(status, locale).await;
        self.forget(&[keys::PAYPAL_ORDER_ID, keys::PAYPAL_AMOUNT]);
        if let Err(e) = &result {
            tracing::warn!(error = %e, "PayPal payment not credited");
        }
        result
    }

    async fn capture_paypal(&self, status: ReturnStatus, locale: Locale) -> Result<CompletedPayment> {
        if status == ReturnStatus::Cancelled {
            return Err(ClientError::Payment(lookup(locale, "payment.cancelled")));
        }

        let order_id = self.storage.get(keys::PAYPAL_ORDER_ID)?;
        let order_id = match order_id {
            Some(id) if status == ReturnStatus::Approved && !id.is_empty() => id,
            _ => return Err(ClientError::Payment(lookup(locale, "payment.error"))),
        };
        let amount_usd = self.stored_amount(keys::PAYPAL_AMOUNT, locale)?;

        let token = self.session.get_valid_access_token().await?;
        let capture = self.api.paypal_capture(&token, &order_id).await?;
        if !capture.is_completed() {
            tracing::info!(order_id = %order_id, status = %capture.status, "PayPal order not completed");
            return Err(ClientError::Payment(lookup(locale, "payment.notCompleted")));
        }

        let deposit = self.api.deposit_usd(&token, &amount_usd).await?;
        tracing::info!(order_id = %order_id, "PayPal payment credited");
        Ok(CompletedPayment {
            amount_usd,
            deposit,
        })
    }

    // ─── MercadoPago ─────────────────────────────────────────────────────────

    /// Create a MercadoPago preference and return the checkout URL.
    pub async fn start_mercadopago(&self, amount_usd: &str, locale: Locale) -> Result<String> {
        let cents = parse_amount_strict(amount_usd)?;
        let token = self.session.get_valid_access_token().await?;

        let preference = self
            .api
            .mercadopago_create_preference(&token, provider_amount(cents))
            .await?;
        let url = preference
            .checkout_url()
            .filter(|url| !url.is_empty())
            .map(str::to_string)
            .ok_or_else(|| ClientError::Payment(lookup(locale, "payment.missingCheckoutUrl")))?;

        self.storage.set(keys::MERCADOPAGO_AMOUNT, &format_cents(cents))?;
        tracing::info!(preference_id = ?preference.preference_id, "MercadoPago preference created");
        Ok(url)
    }

    /// Finish a MercadoPago checkout by depositing the stored amount.
    ///
    /// A pending payment keeps the stored amount so a later return can still
    /// credit it; any other outcome forgets it.
    pub async fn complete_mercadopago(
        &self,
        status: ReturnStatus,
        locale: Locale,
    ) -> Result<CompletedPayment> {
        match status {
            ReturnStatus::Pending => {
                return Err(ClientError::Payment(lookup(locale, "payment.pending")));
            }
            ReturnStatus::Rejected | ReturnStatus::Cancelled => {
                self.forget(&[keys::MERCADOPAGO_AMOUNT]);
                return Err(ClientError::Payment(lookup(locale, "payment.rejected")));
            }
            ReturnStatus::Approved | ReturnStatus::Unknown => {}
        }

        let result = self.deposit_mercadopago(locale).await;
        self.forget(&[keys::MERCADOPAGO_AMOUNT]);
        if let Err(e) = &result {
            tracing::warn!(error = %e, "MercadoPago payment not credited");
        }
        result
    }

    async fn deposit_mercadopago(&self, locale: Locale) -> Result<CompletedPayment> {
        let amount_usd = self.stored_amount(keys::MERCADOPAGO_AMOUNT, locale)?;
        let token = self.session.get_valid_access_token().await?;
        let deposit = self.api.deposit_usd(&token, &amount_usd).await?;
        tracing::info!("MercadoPago payment credited");
        Ok(CompletedPayment {
            amount_usd,
            deposit,
        })
    }

    // ─── Helpers ─────────────────────────────────────────────────────────────

    /// Read a stored amount back in strict form.
    fn stored_amount(&self, key: &str, locale: Locale) -> Result<String> {
        let invalid = || ClientError::Payment(lookup(locale, "payment.invalidAmount"));
        let raw = self.storage.get(key)?.ok_or_else(invalid)?;
        let cents = parse_amount_strict(&raw).map_err(|_| invalid())?;
        Ok(format_cents(cents))
    }

    fn forget(&self, flow_keys: &[&str]) {
        for key in flow_keys {
            if let Err(e) = self.storage.remove(key) {
                tracing::warn!(key = *key, error = %e, "Failed to remove payment flow key");
            }
        }
    }
}

/// Providers take amounts as JSON numbers.
fn provider_amount(cents: i64) -> f64 {
    cents as f64 / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_return_status_from_query() {
        assert_eq!(ReturnStatus::from_query(Some("success")), ReturnStatus::Approved);
        assert_eq!(ReturnStatus::from_query(Some("approved")), ReturnStatus::Approved);
        assert_eq!(ReturnStatus::from_query(Some("cancel")), ReturnStatus::Cancelled);
        assert_eq!(ReturnStatus::from_query(Some("rejected")), ReturnStatus::Rejected);
        assert_eq!(ReturnStatus::from_query(Some("in_process")), ReturnStatus::Pending);
        assert_eq!(ReturnStatus::from_query(Some("whatever")), ReturnStatus::Unknown);
        assert_eq!(ReturnStatus::from_query(None), ReturnStatus::Unknown);
    }

    #[test]
    fn test_provider_amount() {
        assert_eq!(provider_amount(1000), 10.0);
        assert_eq!(provider_amount(1234), 12.34);
    }
}

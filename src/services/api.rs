// SPDX-License-Identifier: MIT
// Copyright 2026 Trenvus Contributors

//! Wallet REST API client.
//!
//! Handles:
//! - URL building from the configured base
//! - Bearer and idempotency headers
//! - Mapping non-2xx responses to `ClientError::Api` with the backend message
//! - Retrying auth POSTs through transient gateway failures

use crate::config::Config;
use crate::error::{ClientError, Result, GENERIC_REQUEST_ERROR};
use crate::models::account::{ChangePasswordRequest, DeleteAccountRequest, UpdatePhoneRequest};
use crate::models::admin::{SetRoleRequest, SetWalletRequest};
use crate::models::auth::{RefreshTokenRequest, TestLoginRequest};
use crate::models::invoice::{GenerateInvoiceRequest, PayInvoiceRequest};
use crate::models::payment::{MercadoPagoPaymentStatus, ProviderAmountRequest};
use crate::models::statement::{SendStatementRequest, StatementListing};
use crate::models::wallet::{TransferRequest, TrvAmountRequest, UsdAmountRequest};
use crate::models::{
    AdminFeeIncomeResponse, AdminStatementItem, AdminUserSummary, AuthResponse, CandlePoint,
    ConvertResponse, InvoiceQrResponse, LoginRequest, MarketTicker, MeResponse,
    MercadoPagoPreference, OrderBook, Page, PayPalCapture, PayPalOrder, PrivateStatementItem,
    RegisterRequest, SimulatedInvoicePayment, StatementEmailResponse, TestAccountsStatus,
    TransferResponse, WalletOperationResponse, WalletResponse,
};
use crate::money::parse_amount_strict;
use anyhow::Context;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use urlencoding::encode;
use validator::Validate;

/// Header carrying the client-generated idempotency key on conversion writes.
pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

/// Auth POSTs get this many attempts in total.
const AUTH_MAX_ATTEMPTS: u32 = 5;
const AUTH_RETRY_DELAY: Duration = Duration::from_millis(600);

/// Wallet REST API client.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    retry_delay: Duration,
}

/// Request body variants the client sends.
enum Body {
    Empty,
    Json(Vec<u8>),
}

impl ApiClient {
    /// Create a client for the configured API base URL.
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .context("failed building API HTTP client")?;

        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
            retry_delay: AUTH_RETRY_DELAY,
        })
    }

    /// Override the pause between auth retries (tests use a short one).
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ─── Auth ────────────────────────────────────────────────────────────────

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        request.validate()?;
        self.post_json("/auth/register", None, request).await
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse> {
        request.validate()?;
        self.post_json("/auth/login", None, request).await
    }

    /// Log into one of the backend's demo accounts.
    pub async fn login_test_account(&self, id: u32) -> Result<AuthResponse> {
        let request = TestLoginRequest { id };
        request.validate()?;
        self.post_json("/auth/test-login", None, &request).await
    }

    pub async fn login_admin(&self) -> Result<AuthResponse> {
        self.post_json("/auth/admin-login", None, &serde_json::json!({}))
            .await
    }

    /// Exchange a refresh token for a new token bundle.
    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthResponse> {
        self.post_json("/auth/refresh", None, &RefreshTokenRequest { refresh_token })
            .await
    }

    /// Invalidate a refresh token server-side.
    pub async fn logout(&self, refresh_token: &str) -> Result<()> {
        self.post_empty("/auth/logout", None, &RefreshTokenRequest { refresh_token })
            .await
    }

    pub async fn test_accounts_status(&self) -> Result<TestAccountsStatus> {
        self.get_json("/auth/test-accounts-status", None).await
    }

    // ─── Wallet ──────────────────────────────────────────────────────────────

    pub async fn get_wallet(&self, access_token: &str) -> Result<WalletResponse> {
        self.get_json("/wallet", Some(access_token)).await
    }

    /// Deposit USD. `amount_usd` must be in the strict `"10.00"` form.
    pub async fn deposit_usd(
        &self,
        access_token: &str,
        amount_usd: &str,
    ) -> Result<WalletOperationResponse> {
        parse_amount_strict(amount_usd)?;
        self.post_json(
            "/wallet/deposit",
            Some(access_token),
            &UsdAmountRequest { amount_usd },
        )
        .await
    }

    // ─── Exchange ────────────────────────────────────────────────────────────

    pub async fn convert_usd_to_trv(
        &self,
        access_token: &str,
        amount_usd: &str,
        idempotency_key: Option<&str>,
    ) -> Result<ConvertResponse> {
        parse_amount_strict(amount_usd)?;
        let body = json_body(&UsdAmountRequest { amount_usd })?;
        let raw = self
            .execute(
                Method::POST,
                "/exchange/convert",
                Some(access_token),
                body,
                idempotency_key,
            )
            .await?;
        parse_body(&self.url("/exchange/convert"), raw)
    }

    pub async fn convert_trv_to_usd(
        &self,
        access_token: &str,
        amount_trv: &str,
        idempotency_key: Option<&str>,
    ) -> Result<ConvertResponse> {
        parse_amount_strict(amount_trv)?;
        let path = "/exchange/convert-trv-to-usd";
        let body = json_body(&TrvAmountRequest { amount_trv })?;
        let raw = self
            .execute(Method::POST, path, Some(access_token), body, idempotency_key)
            .await?;
        parse_body(&self.url(path), raw)
    }

    // ─── Transfer ────────────────────────────────────────────────────────────

    /// Send TRV to another user by e-mail or nickname.
    pub async fn transfer_trv(
        &self,
        access_token: &str,
        to_identifier: &str,
        amount_trv: &str,
    ) -> Result<TransferResponse> {
        if to_identifier.trim().is_empty() {
            return Err(ClientError::Validation("recipient is required".to_string()));
        }
        parse_amount_strict(amount_trv)?;
        self.post_json(
            "/transfer/trv",
            Some(access_token),
            &TransferRequest {
                to_identifier: to_identifier.trim(),
                amount_trv,
            },
        )
        .await
    }

    // ─── Account ─────────────────────────────────────────────────────────────

    pub async fn get_me(&self, access_token: &str) -> Result<MeResponse> {
        self.get_json("/me", Some(access_token)).await
    }

    pub async fn update_my_phone(&self, access_token: &str, phone: &str) -> Result<MeResponse> {
        let body = json_body(&UpdatePhoneRequest { phone })?;
        let raw = self
            .execute(Method::PUT, "/me/phone", Some(access_token), body, None)
            .await?;
        parse_body(&self.url("/me/phone"), raw)
    }

    pub async fn change_my_password(
        &self,
        access_token: &str,
        request: &ChangePasswordRequest,
    ) -> Result<()> {
        request.validate()?;
        let body = json_body(request)?;
        self.execute(Method::PUT, "/me/password", Some(access_token), body, None)
            .await?;
        Ok(())
    }

    pub async fn delete_account(
        &self,
        access_token: &str,
        request: &DeleteAccountRequest,
    ) -> Result<()> {
        request.validate()?;
        self.post_empty("/me/delete", Some(access_token), request)
            .await
    }

    /// Upload an avatar image as multipart form data.
    pub async fn upload_my_avatar(
        &self,
        access_token: &str,
        file_name: &str,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> Result<MeResponse> {
        let url = self.url("/me/avatar");
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime_type)
            .map_err(|e| ClientError::Validation(format!("invalid mime type: {}", e)))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let mut builder = self.http.post(&url);
        if !access_token.is_empty() {
            builder = builder.bearer_auth(access_token);
        }
        let response = builder
            .multipart(form)
            .send()
            .await
            .map_err(|e| network_error(&url, e))?;

        let raw = read_response(&url, response).await?;
        parse_body(&url, raw)
    }

    // ─── Statement ───────────────────────────────────────────────────────────

    pub async fn get_private_statement(
        &self,
        access_token: &str,
        page: u32,
        size: u32,
    ) -> Result<Page<PrivateStatementItem>> {
        let path = format!("/transactions/private?page={}&size={}", page, size);
        let listing: StatementListing<PrivateStatementItem> =
            self.get_json(&path, Some(access_token)).await?;

        match listing {
            StatementListing::Page(page) => Ok(page),
            StatementListing::List(items) if items.is_empty() => Ok(Page {
                items,
                has_next: false,
            }),
            StatementListing::List(items) => {
                // Bare arrays say nothing about what follows: probe the first
                // row of the next page (with size 1, page index == row index)
                let next_row = page.saturating_add(1).saturating_mul(size);
                let probe = format!("/transactions/private?page={}&size=1", next_row);
                let next: StatementListing<PrivateStatementItem> =
                    self.get_json(&probe, Some(access_token)).await?;
                Ok(Page {
                    items,
                    has_next: !next.is_empty(),
                })
            }
        }
    }

    /// Ask the backend to e-mail a rendered statement document.
    ///
    /// Returns `None` when the backend accepts the request without a body.
    pub async fn send_statement_email(
        &self,
        access_token: &str,
        document_base64: &str,
        file_name: &str,
        language: &str,
    ) -> Result<Option<StatementEmailResponse>> {
        let path = "/transactions/send-statement-email";
        let body = json_body(&SendStatementRequest {
            pdf_base64: document_base64,
            file_name,
            language,
        })?;
        let raw = self
            .execute(Method::POST, path, Some(access_token), body, None)
            .await?;
        parse_optional_body(&self.url(path), raw)
    }

    // ─── Admin ───────────────────────────────────────────────────────────────

    pub async fn admin_list_users(
        &self,
        access_token: &str,
        query: Option<&str>,
        limit: u32,
    ) -> Result<Vec<AdminUserSummary>> {
        let mut path = format!("/admin/users?limit={}", limit);
        if let Some(q) = query.map(str::trim).filter(|q| !q.is_empty()) {
            path.push_str(&format!("&q={}", encode(q)));
        }
        self.get_json(&path, Some(access_token)).await
    }

    pub async fn admin_get_user_wallet(
        &self,
        access_token: &str,
        user_id: i64,
    ) -> Result<WalletResponse> {
        self.get_json(&format!("/admin/users/{}/wallet", user_id), Some(access_token))
            .await
    }

    /// Set absolute balances. Amounts are `"0.00"`-style strings; zero is allowed.
    pub async fn admin_set_user_wallet(
        &self,
        access_token: &str,
        user_id: i64,
        usd: &str,
        trv: &str,
    ) -> Result<WalletResponse> {
        let path = format!("/admin/users/{}/wallet", user_id);
        let body = json_body(&SetWalletRequest { usd, trv })?;
        let raw = self
            .execute(Method::PUT, &path, Some(access_token), body, None)
            .await?;
        parse_body(&self.url(&path), raw)
    }

    pub async fn admin_set_user_role(
        &self,
        access_token: &str,
        user_id: i64,
        role: &str,
    ) -> Result<AdminUserSummary> {
        let path = format!("/admin/users/{}/role", user_id);
        let body = json_body(&SetRoleRequest { role })?;
        let raw = self
            .execute(Method::PUT, &path, Some(access_token), body, None)
            .await?;
        parse_body(&self.url(&path), raw)
    }

    pub async fn admin_get_user_fee_income(
        &self,
        access_token: &str,
        user_id: i64,
        size: u32,
    ) -> Result<AdminFeeIncomeResponse> {
        let path = format!("/admin/users/{}/fees?size={}", user_id, size);
        self.get_json(&path, Some(access_token)).await
    }

    pub async fn admin_get_user_statement(
        &self,
        access_token: &str,
        user_id: i64,
        page: u32,
        size: u32,
    ) -> Result<Page<AdminStatementItem>> {
        let path = format!(
            "/admin/users/{}/statement?page={}&size={}",
            user_id, page, size
        );
        self.get_json(&path, Some(access_token)).await
    }

    // ─── Market ──────────────────────────────────────────────────────────────

    pub async fn get_market_tickers(&self, access_token: &str) -> Result<Vec<MarketTicker>> {
        self.get_json("/market/tickers", Some(access_token)).await
    }

    pub async fn get_crypto_tickers(&self, access_token: &str) -> Result<Vec<MarketTicker>> {
        self.get_json("/market/tickers/crypto", Some(access_token))
            .await
    }

    pub async fn get_fiat_tickers(&self, access_token: &str) -> Result<Vec<MarketTicker>> {
        self.get_json("/market/tickers/fiat", Some(access_token))
            .await
    }

    pub async fn get_market_order_book(
        &self,
        access_token: &str,
        inst_id: &str,
        size: u32,
    ) -> Result<OrderBook> {
        let path = format!("/market/orderbook?instId={}&size={}", encode(inst_id), size);
        self.get_json(&path, Some(access_token)).await
    }

    pub async fn get_market_candles(
        &self,
        access_token: &str,
        inst_id: &str,
        bar: &str,
        limit: u32,
    ) -> Result<Vec<CandlePoint>> {
        let path = format!(
            "/market/candles?instId={}&bar={}&limit={}",
            encode(inst_id),
            encode(bar),
            limit
        );
        self.get_json(&path, Some(access_token)).await
    }

    // ─── Invoices ────────────────────────────────────────────────────────────

    pub async fn generate_invoice(
        &self,
        access_token: &str,
        amount: &str,
        currency: &str,
        description: Option<&str>,
    ) -> Result<InvoiceQrResponse> {
        self.post_json(
            "/invoices/generate",
            Some(access_token),
            &GenerateInvoiceRequest {
                amount,
                currency,
                description,
            },
        )
        .await
    }

    pub async fn pay_invoice(
        &self,
        access_token: &str,
        qr_payload: &str,
        amount: &str,
        currency: &str,
    ) -> Result<WalletResponse> {
        self.post_json(
            "/invoices/pay",
            Some(access_token),
            &PayInvoiceRequest {
                qr_payload,
                amount,
                currency,
            },
        )
        .await
    }

    /// Have a backend test account pay an invoice (demo mode).
    pub async fn simulate_pay_invoice(
        &self,
        access_token: &str,
        qr_payload: &str,
        amount: &str,
        currency: &str,
    ) -> Result<SimulatedInvoicePayment> {
        self.post_json(
            "/invoices/simulate-pay",
            Some(access_token),
            &PayInvoiceRequest {
                qr_payload,
                amount,
                currency,
            },
        )
        .await
    }

    // ─── Payment bridges ─────────────────────────────────────────────────────

    pub async fn paypal_create_order(
        &self,
        access_token: &str,
        amount: f64,
    ) -> Result<PayPalOrder> {
        self.post_json(
            "/paypal/create-order",
            Some(access_token),
            &ProviderAmountRequest { amount },
        )
        .await
    }

    pub async fn paypal_capture(&self, access_token: &str, order_id: &str) -> Result<PayPalCapture> {
        let path = format!("/paypal/capture/{}", encode(order_id));
        self.post_json(&path, Some(access_token), &serde_json::json!({}))
            .await
    }

    pub async fn mercadopago_create_preference(
        &self,
        access_token: &str,
        amount: f64,
    ) -> Result<MercadoPagoPreference> {
        self.post_json(
            "/mercadopago/create-preference",
            Some(access_token),
            &ProviderAmountRequest { amount },
        )
        .await
    }

    pub async fn mercadopago_payment(
        &self,
        access_token: &str,
        payment_id: i64,
    ) -> Result<MercadoPagoPaymentStatus> {
        self.get_json(
            &format!("/mercadopago/payment/{}", payment_id),
            Some(access_token),
        )
        .await
    }

    // ─── Plumbing ────────────────────────────────────────────────────────────

    /// Generic GET request with JSON response.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        access_token: Option<&str>,
    ) -> Result<T> {
        let raw = self
            .execute(Method::GET, path, access_token, Body::Empty, None)
            .await?;
        parse_body(&self.url(path), raw)
    }

    /// Generic POST request with JSON body and JSON response.
    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        access_token: Option<&str>,
        body: &B,
    ) -> Result<T> {
        let raw = self
            .execute(Method::POST, path, access_token, json_body(body)?, None)
            .await?;
        parse_body(&self.url(path), raw)
    }

    /// POST whose response body, if any, is ignored.
    async fn post_empty<B: Serialize>(
        &self,
        path: &str,
        access_token: Option<&str>,
        body: &B,
    ) -> Result<()> {
        self.execute(Method::POST, path, access_token, json_body(body)?, None)
            .await?;
        Ok(())
    }

    /// Send a request and return the success body, `None` when empty.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        access_token: Option<&str>,
        body: Body,
        idempotency_key: Option<&str>,
    ) -> Result<Option<String>> {
        let url = self.url(path);
        let max_attempts = if method == Method::POST && path.starts_with("/auth/") {
            AUTH_MAX_ATTEMPTS
        } else {
            1
        };

        let mut attempt = 0;
        let response = loop {
            attempt += 1;

            let mut builder = self
                .http
                .request(method.clone(), &url)
                .header(CONTENT_TYPE, "application/json");
            if let Some(token) = access_token.filter(|t| !t.is_empty()) {
                builder = builder.bearer_auth(token);
            }
            if let Some(key) = idempotency_key {
                builder = builder.header(IDEMPOTENCY_KEY_HEADER, key);
            }
            if let Body::Json(bytes) = &body {
                builder = builder.body(bytes.clone());
            }

            match builder.send().await {
                Ok(response) if is_gateway_error(response.status()) && attempt < max_attempts => {
                    tracing::warn!(
                        url = %url,
                        status = %response.status(),
                        attempt,
                        "Gateway error, retrying"
                    );
                }
                Ok(response) => break response,
                Err(e) if attempt < max_attempts => {
                    tracing::warn!(url = %url, error = %e, attempt, "Request failed, retrying");
                }
                Err(e) => return Err(network_error(&url, e)),
            }
            tokio::time::sleep(self.retry_delay).await;
        };

        read_response(&url, response).await
    }
}

fn json_body<B: Serialize>(body: &B) -> Result<Body> {
    let bytes = serde_json::to_vec(body).context("failed serializing request body")?;
    Ok(Body::Json(bytes))
}

fn is_gateway_error(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT
    )
}

fn network_error(url: &str, e: reqwest::Error) -> ClientError {
    tracing::warn!(url = %url, error = %e, "Network error accessing API");
    ClientError::Network {
        url: url.to_string(),
        message: e.to_string(),
    }
}

/// Check response status and return the body, or an error if not successful.
async fn read_response(url: &str, response: reqwest::Response) -> Result<Option<String>> {
    let status = response.status();
    let raw = response.text().await.unwrap_or_default();

    if !status.is_success() {
        let message = error_message(&raw);
        tracing::debug!(url = %url, status = status.as_u16(), message = %message, "API error");
        return Err(ClientError::Api {
            status: status.as_u16(),
            url: url.to_string(),
            message,
            body: raw,
        });
    }

    if status == StatusCode::NO_CONTENT || raw.is_empty() {
        return Ok(None);
    }
    Ok(Some(raw))
}

/// Pick the user-facing message out of an error body.
///
/// A JSON `message` field wins; otherwise the raw text; otherwise a generic
/// message. Other body shapes are treated as unstructured text.
pub(crate) fn error_message(raw: &str) -> String {
    if raw.trim().is_empty() {
        return GENERIC_REQUEST_ERROR.to_string();
    }
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Object(map)) => match map.get("message") {
            Some(serde_json::Value::String(s)) if !s.is_empty() => s.clone(),
            Some(serde_json::Value::Number(n)) => n.to_string(),
            _ => raw.to_string(),
        },
        _ => raw.to_string(),
    }
}

fn parse_body<T: DeserializeOwned>(url: &str, raw: Option<String>) -> Result<T> {
    let raw = raw.unwrap_or_default();
    serde_json::from_str(&raw).map_err(|e| {
        tracing::warn!(url = %url, error = %e, "Invalid API response");
        ClientError::ResponseParse {
            url: url.to_string(),
            body: raw,
        }
    })
}

/// Like `parse_body`, but an empty success body is `None` rather than an error.
fn parse_optional_body<T: DeserializeOwned>(url: &str, raw: Option<String>) -> Result<Option<T>> {
    match raw {
        Some(raw) if !raw.trim().is_empty() => parse_body(url, Some(raw)).map(Some),
        _ => Ok(None),
    }
}

/// Generate a random idempotency key in UUIDv4 form.
pub fn create_idempotency_key() -> String {
    use ring::rand::{SecureRandom, SystemRandom};

    let mut bytes = [0u8; 16];
    if SystemRandom::new().fill(&mut bytes).is_err() {
        // No CSPRNG available: time-based key, still unique per call in practice
        let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
        return format!("{:x}-{:x}", nanos / 1_000_000, nanos);
    }

    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    format!(
        "{}-{}-{}-{}-{}",
        hex::encode(&bytes[0..4]),
        hex::encode(&bytes[4..6]),
        hex::encode(&bytes[6..8]),
        hex::encode(&bytes[8..10]),
        hex::encode(&bytes[10..16])
    )
}

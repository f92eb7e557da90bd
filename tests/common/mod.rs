// SPDX-License-Identifier: MIT
// Copyright 2026 Trenvus Contributors

//! In-process mock of the wallet backend for integration tests.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU16, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use trenvus_client::config::Config;
use trenvus_client::storage::{MemoryStorage, Storage};
use trenvus_client::WalletClient;

#[allow(dead_code)]
pub const REVOKED_REFRESH_TOKEN: &str = "revoked";

#[derive(Debug, Serialize)]
struct TestClaims<'a> {
    sub: &'a str,
    email: &'a str,
    nickname: &'a str,
    roles: Vec<&'a str>,
    exp: i64,
    jti: usize,
}

/// Mint an HS256 token shaped like the backend's.
#[allow(dead_code)]
pub fn mint_token(email: &str, nickname: &str, roles: &[&str], serial: usize) -> String {
    let claims = TestClaims {
        sub: "42",
        email,
        nickname,
        roles: roles.to_vec(),
        exp: (Utc::now() + Duration::minutes(15)).timestamp(),
        jti: serial,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"test-signing-key"),
    )
    .expect("Failed to mint test token")
}

/// Knobs and counters shared with the mock routes.
#[allow(dead_code)]
pub struct MockState {
    pub login_calls: AtomicUsize,
    pub refresh_calls: AtomicUsize,
    pub logout_calls: AtomicUsize,
    pub deposit_calls: AtomicUsize,
    /// Number of upcoming logins answered with 503
    pub login_gateway_failures: AtomicUsize,
    /// Status returned by logout
    pub logout_status: AtomicU16,
    /// Lifetime of minted access tokens; negative mints already-expired ones
    pub access_ttl_secs: AtomicI64,
    pub usd_cents: AtomicI64,
    pub trv_cents: AtomicI64,
    pub capture_status: Mutex<String>,
    /// Answer statement e-mails with 204 and no body
    pub statement_email_no_content: AtomicBool,
    /// Raw Authorization header of the last wallet read
    pub last_wallet_authorization: Mutex<Option<String>>,
    pub last_deposit: Mutex<Option<String>>,
    pub last_idempotency_key: Mutex<Option<String>>,
    pub last_statement_email: Mutex<Option<Value>>,
    pub statement: Mutex<Vec<Value>>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            login_calls: AtomicUsize::new(0),
            refresh_calls: AtomicUsize::new(0),
            logout_calls: AtomicUsize::new(0),
            deposit_calls: AtomicUsize::new(0),
            login_gateway_failures: AtomicUsize::new(0),
            logout_status: AtomicU16::new(204),
            access_ttl_secs: AtomicI64::new(900),
            usd_cents: AtomicI64::new(0),
            trv_cents: AtomicI64::new(0),
            capture_status: Mutex::new("COMPLETED".to_string()),
            statement_email_no_content: AtomicBool::new(false),
            last_wallet_authorization: Mutex::new(None),
            last_deposit: Mutex::new(None),
            last_idempotency_key: Mutex::new(None),
            last_statement_email: Mutex::new(None),
            statement: Mutex::new(Vec::new()),
        }
    }
}

impl MockState {
    fn bundle(&self, roles: &[&str]) -> Value {
        let serial = self.login_calls.load(Ordering::SeqCst) + self.refresh_calls.load(Ordering::SeqCst);
        let ttl = self.access_ttl_secs.load(Ordering::SeqCst);
        json!({
            "accessToken": mint_token("ana@example.com", "ana", roles, serial),
            "accessExpiresAt": (Utc::now() + Duration::seconds(ttl)).to_rfc3339(),
            "refreshToken": format!("refresh-{}", serial),
            "tokenType": "Bearer",
        })
    }

    fn wallet(&self) -> Value {
        json!({
            "usdCents": self.usd_cents.load(Ordering::SeqCst),
            "trvCents": self.trv_cents.load(Ordering::SeqCst),
        })
    }
}

type Shared = State<Arc<MockState>>;

fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "message": text }))).into_response()
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("Bearer ") && v.len() > "Bearer ".len())
}

async fn login(State(state): Shared, Json(body): Json<Value>) -> Response {
    if state
        .login_gateway_failures
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok()
    {
        return (StatusCode::SERVICE_UNAVAILABLE, "Service Unavailable").into_response();
    }
    state.login_calls.fetch_add(1, Ordering::SeqCst);
    if body["password"] == "wrong" {
        return message(StatusCode::UNAUTHORIZED, "Credenciais inválidas");
    }
    Json(state.bundle(&["USER"])).into_response()
}

async fn admin_login(State(state): Shared) -> Response {
    state.login_calls.fetch_add(1, Ordering::SeqCst);
    Json(state.bundle(&["USER", "ADMIN"])).into_response()
}

async fn refresh(State(state): Shared, Json(body): Json<Value>) -> Response {
    state.refresh_calls.fetch_add(1, Ordering::SeqCst);
    if body["refreshToken"] == REVOKED_REFRESH_TOKEN {
        return message(StatusCode::UNAUTHORIZED, "Refresh token inválido");
    }
    // Refreshed tokens are always long-lived
    state.access_ttl_secs.store(900, Ordering::SeqCst);
    Json(state.bundle(&["USER"])).into_response()
}

async fn logout(State(state): Shared) -> Response {
    state.logout_calls.fetch_add(1, Ordering::SeqCst);
    let status = StatusCode::from_u16(state.logout_status.load(Ordering::SeqCst))
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    status.into_response()
}

async fn wallet(State(state): Shared, headers: HeaderMap) -> Response {
    *state.last_wallet_authorization.lock().unwrap() = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(state.wallet()).into_response()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DepositBody {
    amount_usd: String,
}

async fn deposit(State(state): Shared, headers: HeaderMap, Json(body): Json<DepositBody>) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    state.deposit_calls.fetch_add(1, Ordering::SeqCst);
    let Some((whole, frac)) = body.amount_usd.split_once('.') else {
        return message(StatusCode::BAD_REQUEST, "Valor inválido");
    };
    let cents = whole.parse::<i64>().unwrap_or(0) * 100 + frac.parse::<i64>().unwrap_or(0);
    state.usd_cents.fetch_add(cents, Ordering::SeqCst);
    *state.last_deposit.lock().unwrap() = Some(body.amount_usd);

    let mut response = state.wallet();
    response["transactionId"] = json!(state.deposit_calls.load(Ordering::SeqCst));
    Json(response).into_response()
}

async fn convert(State(state): Shared, headers: HeaderMap) -> Response {
    *state.last_idempotency_key.lock().unwrap() = headers
        .get("idempotency-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let mut response = state.wallet();
    response["transactionId"] = json!(1);
    response["feeUsdCents"] = json!(0);
    Json(response).into_response()
}

async fn tickers() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response()
}

async fn me() -> Response {
    message(StatusCode::BAD_REQUEST, "Saldo insuficiente")
}

async fn paypal_create(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(json!({
        "orderId": "ORDER-1",
        "approvalUrl": format!("https://paypal.test/approve?amount={}", body["amount"]),
    }))
    .into_response()
}

async fn paypal_capture(State(state): Shared, Path(order_id): Path<String>) -> Response {
    if order_id != "ORDER-1" {
        return message(StatusCode::NOT_FOUND, "Pedido não encontrado");
    }
    let status = state.capture_status.lock().unwrap().clone();
    Json(json!({ "status": status })).into_response()
}

async fn mercadopago_create() -> Response {
    Json(json!({
        "preferenceId": "PREF-1",
        "initPoint": "https://mp.test/checkout",
        "sandboxInitPoint": "https://sandbox.mp.test/checkout",
    }))
    .into_response()
}

async fn private_statement(State(state): Shared, Query(query): Query<HashMap<String, usize>>) -> Response {
    let page = query.get("page").copied().unwrap_or(0);
    let size = query.get("size").copied().unwrap_or(5).max(1);
    let all = state.statement.lock().unwrap().clone();
    // Bare array, the way the backend sends it
    let items: Vec<Value> = all.into_iter().skip(page * size).take(size).collect();
    Json(items).into_response()
}

async fn send_statement_email(State(state): Shared, Json(body): Json<Value>) -> Response {
    *state.last_statement_email.lock().unwrap() = Some(body);
    if state.statement_email_no_content.load(Ordering::SeqCst) {
        return StatusCode::NO_CONTENT.into_response();
    }
    Json(json!({ "status": "sent", "message": "Extrato enviado" })).into_response()
}

fn router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/admin-login", post(admin_login))
        .route("/api/auth/refresh", post(refresh))
        .route("/api/auth/logout", post(logout))
        .route("/api/wallet", get(wallet))
        .route("/api/wallet/deposit", post(deposit))
        .route("/api/exchange/convert", post(convert))
        .route("/api/market/tickers", get(tickers))
        .route("/api/me", get(me))
        .route("/api/paypal/create-order", post(paypal_create))
        .route("/api/paypal/capture/{order_id}", post(paypal_capture))
        .route("/api/mercadopago/create-preference", post(mercadopago_create))
        .route("/api/transactions/private", get(private_statement))
        .route(
            "/api/transactions/send-statement-email",
            post(send_statement_email),
        )
        .with_state(state)
}

/// Start the mock backend on an ephemeral port.
/// Returns the API base URL and the shared state.
#[allow(dead_code)]
pub async fn spawn_mock_backend() -> (String, Arc<MockState>) {
    let state = Arc::new(MockState::default());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock backend");
    let addr = listener.local_addr().expect("Failed to read mock address");
    let app = router(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock backend failed");
    });
    (format!("http://{}/api", addr), state)
}

/// Build a client against `base_url` over the given storage.
#[allow(dead_code)]
pub fn test_client(base_url: &str, storage: Arc<MemoryStorage>) -> WalletClient {
    let mut config = Config::with_base_url(base_url);
    config.system_language = Some("en_US.UTF-8".to_string());
    WalletClient::new(config, storage as Arc<dyn Storage>).expect("Failed to build client")
}

/// Address nothing listens on.
#[allow(dead_code)]
pub async fn closed_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to read address");
    drop(listener);
    format!("http://{}/api", addr)
}

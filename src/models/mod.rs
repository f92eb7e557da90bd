// SPDX-License-Identifier: MIT
// Copyright 2026 Trenvus Contributors

//! Data models exchanged with the wallet REST API.

pub mod account;
pub mod admin;
pub mod auth;
pub mod invoice;
pub mod market;
pub mod payment;
pub mod session;
pub mod statement;
pub mod wallet;

pub use account::MeResponse;
pub use admin::{AdminFeeIncomeItem, AdminFeeIncomeResponse, AdminStatementItem, AdminUserSummary};
pub use auth::{AuthResponse, LoginRequest, RegisterRequest, TestAccountsStatus};
pub use invoice::{InvoiceQrResponse, SimulatedInvoicePayment};
pub use market::{CandlePoint, MarketTicker, OrderBook, OrderBookLevel};
pub use payment::{MercadoPagoPaymentStatus, MercadoPagoPreference, PayPalCapture, PayPalOrder};
pub use session::SessionState;
pub use statement::{Page, PrivateStatementItem, StatementEmailResponse, StatementValue};
pub use wallet::{ConvertResponse, TransferResponse, WalletOperationResponse, WalletResponse};

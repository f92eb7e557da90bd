// SPDX-License-Identifier: MIT
// Copyright 2026 Trenvus Contributors

//! Services module - API access and client-side session logic.

pub mod api;
pub mod claims;
pub mod payments;
pub mod session;
pub mod statement;

pub use api::{create_idempotency_key, ApiClient};
pub use claims::{decode_identity_claims, ClaimsError, IdentityClaims};
pub use payments::{CompletedPayment, PayPalCheckout, PaymentFlows, ReturnStatus};
pub use session::{AuthBackend, SessionManager};
pub use statement::{StatementPage, StatementRow, StatementService};

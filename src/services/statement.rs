// SPDX-License-Identifier: MIT
// Copyright 2026 Trenvus Contributors

//! Private statement: display rows, plain-text export and e-mail delivery.

use crate::error::Result;
use crate::i18n::{interpolate, lookup, Locale};
use crate::models::{PrivateStatementItem, StatementEmailResponse, StatementValue};
use crate::money::format_cents_localized;
use crate::services::api::ApiClient;
use crate::services::session::SessionManager;
use crate::time_utils::{format_display_datetime, parse_timestamp};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Rows per statement page.
pub const STATEMENT_PAGE_SIZE: u32 = 5;

/// A statement entry ready to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementRow {
    pub id: i64,
    pub tec: String,
    pub type_label: String,
    /// Localized date, `None` when the backend sent none or an unreadable one
    pub when: Option<String>,
    /// Signed amounts such as `+10.00 USD`, fee lines suffixed
    pub values: Vec<String>,
}

/// One loaded page of rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementPage {
    pub page: u32,
    pub rows: Vec<StatementRow>,
    pub has_next: bool,
}

/// Localized label for a backend transaction type. Unknown types show as-is.
pub fn type_label(kind: &str, locale: Locale) -> String {
    let key = match kind {
        "DEPOSIT_USD" => "statement.type.deposit",
        "CONVERT_USD_TO_TRV" => "statement.type.convertUsdToTrv",
        "CONVERT_TRV_TO_USD" => "statement.type.convertTrvToUsd",
        "TRANSFER_TRV_OUT" => "statement.type.transferOut",
        "TRANSFER_TRV_IN" => "statement.type.transferIn",
        "FEE_INCOME_USD" => "statement.type.feeIncome",
        "ADMIN_ADJUST_WALLET" => "statement.type.adminAdjust",
        other => return other.to_string(),
    };
    lookup(locale, key)
}

/// `+12.34 USD` / `-0.50 TRV (fee)`.
pub fn format_value(value: &StatementValue, locale: Locale) -> String {
    let sign = if value.cents >= 0 { '+' } else { '-' };
    let amount = format_cents_localized(value.cents.saturating_abs(), locale);
    let mut line = format!("{}{} {}", sign, amount, value.currency);
    if value.fee {
        line.push_str(&format!(" ({})", lookup(locale, "statement.fee")));
    }
    line
}

pub fn build_rows(items: &[PrivateStatementItem], locale: Locale) -> Vec<StatementRow> {
    items
        .iter()
        .map(|item| StatementRow {
            id: item.id,
            tec: item.tec.clone(),
            type_label: type_label(&item.kind, locale),
            when: item
                .created_at
                .as_deref()
                .and_then(parse_timestamp)
                .map(|date| format_display_datetime(date, locale)),
            values: item.values.iter().map(|v| format_value(v, locale)).collect(),
        })
        .collect()
}

/// Plain-text statement document.
pub fn render_document(rows: &[StatementRow], locale: Locale, generated_at: DateTime<Utc>) -> String {
    let mut doc = String::new();
    doc.push_str(&lookup(locale, "statement.title"));
    doc.push('\n');
    let date = format_display_datetime(generated_at, locale);
    doc.push_str(&interpolate(
        &lookup(locale, "statement.generatedAt"),
        &[("date", &date)],
    ));
    doc.push('\n');
    doc.push_str(&lookup(locale, "statement.subtitle"));
    doc.push_str("\n\n");

    if rows.is_empty() {
        doc.push_str(&lookup(locale, "statement.empty"));
        doc.push('\n');
        return doc;
    }

    doc.push_str(&lookup(locale, "statement.columns"));
    doc.push('\n');
    for row in rows {
        doc.push_str(&format!(
            "{} | {} | {} | {}\n",
            row.when.as_deref().unwrap_or("-"),
            row.tec,
            row.type_label,
            row.values.join(", ")
        ));
    }
    doc
}

/// File name for an exported statement, e.g. `trenvus-statement-2026-03-01.txt`.
pub fn statement_file_name(generated_at: DateTime<Utc>) -> String {
    format!("trenvus-statement-{}.txt", generated_at.format("%Y-%m-%d"))
}

/// Statement pages for the signed-in user.
pub struct StatementService {
    api: Arc<ApiClient>,
    session: Arc<SessionManager>,
}

impl StatementService {
    pub fn new(api: Arc<ApiClient>, session: Arc<SessionManager>) -> Self {
        Self { api, session }
    }

    pub async fn load_page(&self, page: u32, locale: Locale) -> Result<StatementPage> {
        let token = self.session.get_valid_access_token().await?;
        let listing = self
            .api
            .get_private_statement(&token, page, STATEMENT_PAGE_SIZE)
            .await?;

        Ok(StatementPage {
            page,
            rows: build_rows(&listing.items, locale),
            has_next: listing.has_next,
        })
    }

    /// Render `rows` and ask the backend to e-mail them to the user.
    ///
    /// `None` means the backend accepted the request with an empty reply.
    pub async fn send_by_email(
        &self,
        rows: &[StatementRow],
        locale: Locale,
    ) -> Result<Option<StatementEmailResponse>> {
        let now = Utc::now();
        let document = render_document(rows, locale, now);
        let encoded = STANDARD.encode(document.as_bytes());
        let file_name = statement_file_name(now);

        let token = self.session.get_valid_access_token().await?;
        let response = self
            .api
            .send_statement_email(&token, &encoded, &file_name, locale.tag())
            .await?;
        tracing::info!(file_name = %file_name, rows = rows.len(), "Statement e-mail requested");
        Ok(response)
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Trenvus Contributors

//! Amount parsing and cents formatting.
//!
//! Balances arrive from the backend as integer minor units. This module never
//! does arithmetic on them beyond splitting into whole and fractional parts
//! for display.

use crate::i18n::Locale;

/// Amount validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("Amount is required")]
    Empty,

    #[error("Amount must have exactly two decimal places")]
    Format,

    #[error("Amount must be greater than zero")]
    NotPositive,

    #[error("Amount is too large")]
    TooLarge,
}

/// Parse a user-entered amount such as `"10.00"` into minor units.
///
/// Exactly two decimal digits are required: `"10"`, `"10.0"` and `"10.005"`
/// are rejected. Signs, separators other than a single `.`, and zero are
/// rejected too.
pub fn parse_amount_strict(input: &str) -> Result<i64, AmountError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(AmountError::Empty);
    }

    let (whole, frac) = input.split_once('.').ok_or(AmountError::Format)?;
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(whole) || frac.len() != 2 || !all_digits(frac) {
        return Err(AmountError::Format);
    }

    let whole: i64 = whole.parse().map_err(|_| AmountError::TooLarge)?;
    let frac: i64 = frac.parse().map_err(|_| AmountError::Format)?;
    let cents = whole
        .checked_mul(100)
        .and_then(|c| c.checked_add(frac))
        .ok_or(AmountError::TooLarge)?;

    if cents == 0 {
        return Err(AmountError::NotPositive);
    }
    Ok(cents)
}

/// Format minor units as a plain decimal string: `1234` → `"12.34"`.
///
/// This is also the wire format the backend accepts for amounts.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

/// Format minor units with the locale's grouping and decimal separators.
///
/// `en`: `1,234.56`; `pt-BR`: `1.234,56`.
pub fn format_cents_localized(cents: i64, locale: Locale) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let (group, decimal) = separators(locale);
    format!(
        "{}{}{}{:02}",
        sign,
        group_thousands(&(abs / 100).to_string(), group),
        decimal,
        abs % 100
    )
}

/// Result of the digit-mask amount input helper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedAmount {
    /// Display text, e.g. `1.234,56` for pt-BR
    pub formatted: String,
    /// Value in minor units
    pub cents: i64,
    /// Wire form accepted by the backend, e.g. `1234.56`
    pub plain: String,
}

/// Interpret free-form keystrokes as a cents amount, the way the amount
/// inputs behave: every digit shifts in from the right.
///
/// Non-digits are ignored. Returns `None` for empty, zero or oversized input.
pub fn format_money_digits(input: &str, locale: Locale) -> Option<MaskedAmount> {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        return None;
    }

    let cents: i64 = trimmed.parse().ok()?;
    Some(MaskedAmount {
        formatted: format_cents_localized(cents, locale),
        cents,
        plain: format_cents(cents),
    })
}

fn separators(locale: Locale) -> (char, char) {
    match locale {
        Locale::PtBr => ('.', ','),
        Locale::En => (',', '.'),
    }
}

fn group_thousands(digits: &str, sep: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(c);
    }
    out
}

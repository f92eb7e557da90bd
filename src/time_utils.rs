// SPDX-License-Identifier: MIT
// Copyright 2026 Trenvus Contributors

//! Shared helpers for date/time parsing and formatting.

use crate::i18n::Locale;
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse a backend timestamp.
///
/// Accepts RFC3339 with any offset, and offset-less ISO-8601 which is read
/// as UTC. Anything else is `None`.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Short date-time for statement rows, in the locale's customary order.
pub fn format_display_datetime(date: DateTime<Utc>, locale: Locale) -> String {
    match locale {
        Locale::PtBr => date.format("%d/%m/%Y %H:%M").to_string(),
        Locale::En => date.format("%m/%d/%Y %H:%M").to_string(),
    }
}

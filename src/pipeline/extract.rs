// Copyright (c) Bankpipe Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Row extraction: map a tokenized data row through a file's [`ColumnMap`]
//! into the dialect-independent [`RawRecord`] the classifier consumes.
//! Zero-amount rows (balance snapshots, card holds) are dropped here.

use chrono::{Local, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

use super::detect::ColumnMap;

/// Canonical intermediate record, one per surviving data row.
#[derive(Debug, Clone, Default)]
pub struct RawRecord {
    pub date_raw: String,
    pub description_raw: String,
    pub payee: String,
    pub amount: Decimal,
    pub currency_raw: String,
    pub transaction_type: String,
    pub status: String,
    pub account_number: String,
    pub beneficiary_account: String,
    pub balance: String,
}

/// Extract one row. Returns `None` when the amount is absent, unparseable,
/// or exactly zero.
pub fn extract_row(cols: &ColumnMap, row: &[String]) -> Option<RawRecord> {
    let field = |idx: Option<usize>| -> String {
        idx.and_then(|i| row.get(i)).cloned().unwrap_or_default()
    };

    let amount = strip_amount(&field(cols.amount))?;
    Some(RawRecord {
        date_raw: field(cols.date),
        description_raw: field(cols.description),
        payee: field(cols.payee),
        amount,
        currency_raw: field(cols.currency),
        transaction_type: field(cols.transaction_type),
        status: field(cols.status),
        account_number: field(cols.account_number),
        beneficiary_account: field(cols.beneficiary),
        balance: field(cols.balance),
    })
}

static NON_NUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9.\-]").expect("valid regex"));

/// Reduce a display amount ("$1,234.56", "−45.00 USD") to something Decimal
/// can parse by stripping everything except digits, '.', and '-'. Zero and
/// unparseable amounts yield `None`; such rows are noise, not transactions.
///
/// Known limitation, kept deliberately: comma-decimal locales lose their
/// separator, so "1.234,56" parses as 1.23456.
pub fn strip_amount(raw: &str) -> Option<Decimal> {
    let cleaned = NON_NUMERIC.replace_all(raw, "");
    let value = cleaned.parse::<Decimal>().ok()?;
    if value.is_zero() {
        return None;
    }
    Some(value)
}

/// Parse a statement date, tolerating the formats seen in real exports.
/// The fallback chain is ordered and must stay that way: ISO first, then
/// ambiguous numeric triplets, then a handful of textual formats, and
/// finally today's date with `fell_back = true` so the importer can attach
/// a per-row warning.
pub fn parse_flexible_date(raw: &str) -> (NaiveDate, bool) {
    let s = raw.trim();
    // ISO, with or without a time component (Revolut and Mercury emit
    // "YYYY-MM-DD hh:mm:ss" timestamps).
    let date_part = s.split_whitespace().next().unwrap_or(s);
    if let Ok(d) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        return (d, false);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return (dt.date(), false);
    }
    if let Some(d) = parse_triplet(date_part) {
        return (d, false);
    }
    for fmt in ["%m/%d/%Y", "%d %b %Y", "%b %d, %Y", "%d %B %Y", "%B %d, %Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return (d, false);
        }
    }
    (Local::now().date_naive(), true)
}

/// `A/B/C` or `A-B-C`: the 4-digit component is the year; of the remaining
/// two, a leading component over 12 must be the day, otherwise month-first
/// is assumed.
fn parse_triplet(s: &str) -> Option<NaiveDate> {
    let parts: Vec<i64> = s
        .split(['/', '-'])
        .map(|p| p.trim().parse::<i64>())
        .collect::<Result<_, _>>()
        .ok()?;
    if parts.len() != 3 {
        return None;
    }
    let (a, b, c) = (parts[0], parts[1], parts[2]);
    let (year, first, second) = if a > 1000 {
        (a, b, c)
    } else if c > 1000 {
        (c, a, b)
    } else {
        return None;
    };
    let (month, day) = if first > 12 { (second, first) } else { (first, second) };
    NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32)
}

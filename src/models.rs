// Copyright (c) Bankpipe Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Categories that ship with the schema and cannot be deleted. `Other` is the
/// universal fallback; `Payroll` is tied to the payroll report.
pub const PROTECTED_CATEGORIES: [&str; 2] = ["Other", "Payroll"];

/// Economic direction of a ledger entry. `Internal` entries are moves between
/// accounts the team controls and never count toward profit or loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxnType {
    Income,
    Expense,
    Internal,
}

impl TxnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxnType::Income => "income",
            TxnType::Expense => "expense",
            TxnType::Internal => "internal",
        }
    }

    pub fn parse(s: &str) -> Option<TxnType> {
        match s.trim().to_lowercase().as_str() {
            "income" => Some(TxnType::Income),
            "expense" => Some(TxnType::Expense),
            "internal" => Some(TxnType::Internal),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    Contains,
    StartsWith,
    Exact,
}

impl MatchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchType::Contains => "contains",
            MatchType::StartsWith => "starts_with",
            MatchType::Exact => "exact",
        }
    }

    pub fn parse(s: &str) -> Option<MatchType> {
        match s.trim().to_lowercase().as_str() {
            "contains" => Some(MatchType::Contains),
            "starts_with" => Some(MatchType::StartsWith),
            "exact" => Some(MatchType::Exact),
            _ => None,
        }
    }
}

/// Canonical ledger entry, post-pipeline. `amount` is always in the reporting
/// currency; `original_amount`/`original_currency` are set only when the
/// source row was denominated in something else. `account` keeps the source
/// currency label, which for multi-currency banks may be a subcurrency name
/// rather than a plain ISO code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    pub description: String,
    pub reference: String,
    pub bank: String,
    pub account: String,
    pub r#type: TxnType,
    pub category: String,
    pub amount: Decimal,
    pub currency: String,
    pub original_amount: Option<Decimal>,
    pub original_currency: Option<String>,
    pub period: String,
    pub payee: Option<String>,
    pub account_number: Option<String>,
    pub transaction_type: Option<String>,
    pub status: Option<String>,
    pub balance: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub base_salary: Decimal,
    pub beneficiary_account: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    pub id: i64,
    pub keyword: String,
    pub category: String,
    pub match_type: MatchType,
    pub priority: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub color: String,
}

// Copyright (c) Bankpipe Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Bank CSV fingerprinting. Detection is a pure function of the header row:
//! each supported provider leaves a distinctive column in its export, and an
//! unrecognized layout falls back to best-effort substring lookup. One
//! dialect is chosen per file; files in the same upload are detected
//! independently.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dialect {
    Relay,
    Revolut,
    Mercury,
    Generic,
}

impl Dialect {
    /// The `bank` value stored on every transaction produced from this file.
    /// Set once at detection time, never changed afterwards.
    pub fn bank_label(&self) -> &'static str {
        match self {
            Dialect::Relay => "Relay",
            Dialect::Revolut => "Revolut",
            Dialect::Mercury => "Mercury",
            Dialect::Generic => "Imported",
        }
    }
}

/// Column indexes for one file, computed once from its header. `None` means
/// the column is absent from this export.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    pub dialect: Dialect,
    pub date: Option<usize>,
    pub description: Option<usize>,
    pub payee: Option<usize>,
    pub amount: Option<usize>,
    pub currency: Option<usize>,
    pub transaction_type: Option<usize>,
    pub status: Option<usize>,
    pub account_number: Option<usize>,
    pub beneficiary: Option<usize>,
    pub balance: Option<usize>,
}

pub fn detect(headers: &[String]) -> ColumnMap {
    let h: Vec<String> = headers
        .iter()
        .map(|s| s.trim().to_lowercase())
        .collect();

    // Relay: names the counterparty and carries an explicit transaction type.
    let payee_col = find_exact(&h, &["counterparty name", "payee", "to/from"]);
    let relay_type = find_exact(&h, &["transaction type"]);
    if payee_col.is_some() && relay_type.is_some() {
        return ColumnMap {
            dialect: Dialect::Relay,
            date: find_contains(&h, &["date"]),
            description: find_exact(&h, &["description", "memo"]),
            payee: payee_col,
            amount: find_exact(&h, &["amount"]),
            currency: find_contains(&h, &["currency"]),
            transaction_type: relay_type,
            status: find_exact(&h, &["status"]),
            account_number: find_contains(&h, &["account number"]),
            beneficiary: None,
            balance: find_contains(&h, &["balance"]),
        };
    }

    // Revolut: "date completed"/"date started" timestamps plus a bare type.
    let rev_date = find_contains(&h, &["date completed", "completed date"])
        .or_else(|| find_contains(&h, &["date started", "started date"]));
    let rev_type = find_exact(&h, &["type"]);
    if rev_date.is_some() && rev_type.is_some() {
        return ColumnMap {
            dialect: Dialect::Revolut,
            date: rev_date,
            description: find_exact(&h, &["description", "reference"]),
            payee: find_exact(&h, &["payer", "payee"]),
            amount: find_exact(&h, &["amount"]),
            currency: find_contains(&h, &["payment currency"])
                .or_else(|| find_exact(&h, &["currency"])),
            transaction_type: rev_type,
            status: find_exact(&h, &["state", "status"]),
            account_number: find_contains(&h, &["account"]),
            beneficiary: find_contains(&h, &["beneficiary account", "beneficiary"]),
            balance: find_contains(&h, &["balance"]),
        };
    }

    // Mercury: the only export with a separate bank-side description column.
    if find_contains(&h, &["bank description"]).is_some() {
        return ColumnMap {
            dialect: Dialect::Mercury,
            date: find_contains(&h, &["date"]),
            description: find_exact(&h, &["description"])
                .or_else(|| find_contains(&h, &["bank description"])),
            payee: find_contains(&h, &["source account"]),
            amount: find_exact(&h, &["amount"]),
            currency: find_contains(&h, &["currency"]),
            transaction_type: None,
            status: find_exact(&h, &["status"]),
            account_number: find_contains(&h, &["account number"]),
            beneficiary: None,
            balance: find_contains(&h, &["balance"]),
        };
    }

    // Unknown provider: locate the usual suspects by substring.
    ColumnMap {
        dialect: Dialect::Generic,
        date: find_contains(&h, &["date"]),
        description: find_contains(&h, &["description", "memo"]),
        payee: find_contains(&h, &["payee", "merchant", "name"]),
        amount: find_contains(&h, &["amount", "value"]),
        currency: find_contains(&h, &["currency"]),
        transaction_type: find_contains(&h, &["type"]),
        status: find_contains(&h, &["status", "state"]),
        account_number: find_contains(&h, &["account number"]),
        beneficiary: None,
        balance: find_contains(&h, &["balance"]),
    }
}

fn find_exact(headers: &[String], names: &[&str]) -> Option<usize> {
    names
        .iter()
        .find_map(|n| headers.iter().position(|h| h == n))
}

fn find_contains(headers: &[String], needles: &[&str]) -> Option<usize> {
    needles
        .iter()
        .find_map(|n| headers.iter().position(|h| h.contains(n)))
}

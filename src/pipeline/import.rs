// Copyright (c) Bankpipe Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Import orchestration: run each uploaded file through the pipeline stages
//! and assemble one in-memory batch plus a preview summary. Persisting the
//! batch is a separate step so a dry run can stop after the preview.

use anyhow::{Result, bail};
use chrono::NaiveDate;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeSet;

use super::categorize;
use super::classify;
use super::csv;
use super::describe;
use super::detect;
use super::extract;
use super::rates::{RateMap, convert};
use crate::models::{Rule, TeamMember, TxnType};

/// One uploaded file: display name plus full text, already read into memory.
pub struct ImportFile {
    pub name: String,
    pub text: String,
}

/// A ledger entry ready for insertion; `id` is assigned by the store.
#[derive(Debug, Clone, Serialize)]
pub struct NewTransaction {
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

#[derive(Debug, Clone, Serialize, Default)]
pub struct ImportSummary {
    pub total: usize,
    pub income_count: usize,
    pub income_total: Decimal,
    pub expense_count: usize,
    pub expense_total: Decimal,
    pub internal_count: usize,
    pub internal_total: Decimal,
    pub categories: Vec<String>,
}

pub struct ImportBatch {
    pub transactions: Vec<NewTransaction>,
    pub warnings: Vec<String>,
    pub summary: ImportSummary,
}

/// Run the pipeline over a set of files. Every produced transaction carries
/// the same `period` label regardless of its own date. A batch with zero
/// valid rows across all files is the one user-visible import error.
pub fn run_import(
    files: &[ImportFile],
    period: &str,
    members: &[TeamMember],
    rules: &[Rule],
    base: &str,
    rates: &RateMap,
) -> Result<ImportBatch> {
    let mut transactions = Vec::new();
    let mut warnings = Vec::new();

    for file in files {
        import_file(file, period, members, rules, base, rates, &mut transactions, &mut warnings);
    }
    if transactions.is_empty() {
        bail!("No valid transactions found");
    }

    let summary = summarize(&transactions);
    Ok(ImportBatch {
        transactions,
        warnings,
        summary,
    })
}

#[allow(clippy::too_many_arguments)]
fn import_file(
    file: &ImportFile,
    period: &str,
    members: &[TeamMember],
    rules: &[Rule],
    base: &str,
    rates: &RateMap,
    out: &mut Vec<NewTransaction>,
    warnings: &mut Vec<String>,
) {
    let mut lines = file.text.lines().filter(|l| !l.trim().is_empty());
    let Some(header_line) = lines.next() else {
        warnings.push(format!("{}: empty file, skipped", file.name));
        return;
    };
    let headers = csv::header_fields(header_line);
    let cols = detect::detect(&headers);
    let bank = cols.dialect.bank_label();

    let mut rows_seen = 0usize;
    for (line_no, line) in lines.enumerate() {
        let row = csv::split_line(line);
        if row.is_empty() {
            continue;
        }
        rows_seen += 1;
        let Some(rec) = extract::extract_row(&cols, &row) else {
            continue; // zero or unparseable amount: noise, not a transaction
        };

        let (date, fell_back) = extract::parse_flexible_date(&rec.date_raw);
        if fell_back {
            warnings.push(format!(
                "{}: row {}: unparseable date '{}', substituted today",
                file.name,
                line_no + 2,
                rec.date_raw
            ));
        }

        let classified = classify::classify(cols.dialect, &rec, members);
        let txn_type = classified.txn_type;
        let mut category = classified.category;
        let description = describe::clean_description(&rec.description_raw, &rec.payee);

        // User rules only override where the classifier deferred to keyword
        // categorization; forced categories (Payroll, Transfer, Fees) and
        // income branches stay as classified.
        if classified.deferred {
            if let Some(cat) = categorize::user_category(rules, &description, &rec.payee) {
                category = cat;
            }
        }

        // Sign follows economic direction; display formatting flips expenses
        // positive later.
        let original = match txn_type {
            TxnType::Income => rec.amount.abs(),
            TxnType::Expense => -rec.amount.abs(),
            TxnType::Internal => rec.amount,
        };
        let source_ccy = if rec.currency_raw.trim().is_empty() {
            base.to_string()
        } else {
            rec.currency_raw.trim().to_string()
        };
        let amount = convert(original, &source_ccy, base, rates);
        let foreign = !source_ccy.eq_ignore_ascii_case(base);

        out.push(NewTransaction {
            date,
            description,
            reference: rec.description_raw.trim().to_string(),
            bank: bank.to_string(),
            account: source_ccy.clone(),
            r#type: txn_type,
            category,
            amount,
            currency: base.to_string(),
            original_amount: foreign.then_some(original),
            original_currency: foreign.then_some(source_ccy),
            period: period.to_string(),
            payee: non_empty(&rec.payee),
            account_number: non_empty(&rec.account_number),
            transaction_type: non_empty(&rec.transaction_type),
            status: non_empty(&rec.status),
            balance: non_empty(&rec.balance),
        });
    }

    if rows_seen == 0 {
        warnings.push(format!("{}: no data rows", file.name));
    }
}

fn non_empty(s: &str) -> Option<String> {
    let t = s.trim();
    (!t.is_empty()).then(|| t.to_string())
}

fn summarize(transactions: &[NewTransaction]) -> ImportSummary {
    let mut s = ImportSummary {
        total: transactions.len(),
        ..Default::default()
    };
    let mut categories = BTreeSet::new();
    for t in transactions {
        match t.r#type {
            TxnType::Income => {
                s.income_count += 1;
                s.income_total += t.amount;
            }
            TxnType::Expense => {
                s.expense_count += 1;
                s.expense_total += t.amount;
            }
            TxnType::Internal => {
                s.internal_count += 1;
                s.internal_total += t.amount;
            }
        }
        categories.insert(t.category.clone());
    }
    s.categories = categories.into_iter().collect();
    s
}

/// Replace-then-insert persistence. The only dedup rule in the system:
/// re-importing a (period, bank) pair deletes what was there before, inside
/// one store transaction.
pub fn persist_batch(conn: &mut Connection, batch: &ImportBatch) -> Result<usize> {
    let tx = conn.transaction()?;
    let pairs: BTreeSet<(String, String)> = batch
        .transactions
        .iter()
        .map(|t| (t.period.clone(), t.bank.clone()))
        .collect();
    for (period, bank) in &pairs {
        tx.execute(
            "DELETE FROM transactions WHERE period=?1 AND bank=?2",
            params![period, bank],
        )?;
    }
    for t in &batch.transactions {
        tx.execute(
            "INSERT INTO transactions(date, description, reference, bank, account, type,
                category, amount, currency, original_amount, original_currency, period,
                payee, account_number, transaction_type, status, balance)
             VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13,?14,?15,?16,?17)",
            params![
                t.date.to_string(),
                t.description,
                t.reference,
                t.bank,
                t.account,
                t.r#type.as_str(),
                t.category,
                t.amount.to_string(),
                t.currency,
                t.original_amount.map(|a| a.to_string()),
                t.original_currency,
                t.period,
                t.payee,
                t.account_number,
                t.transaction_type,
                t.status,
                t.balance,
            ],
        )?;
    }
    tx.commit()?;
    Ok(batch.transactions.len())
}

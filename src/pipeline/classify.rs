// Copyright (c) Bankpipe Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Economic classification. Each provider encodes transfer intent in its own
//! vocabulary, so each dialect gets its own branch set; these branches are
//! business rules and changing them silently degrades categorization of real
//! statements. Unknown type strings always fall through to the sign-based
//! default, never to an error.

use rust_decimal::Decimal;

use super::categorize;
use super::detect::Dialect;
use super::extract::RawRecord;
use crate::models::{TeamMember, TxnType};

/// Our own accounts at sibling providers. A Relay "receive" from one of
/// these names is an inter-account hop, not revenue.
pub const SIBLING_BANKS: [&str; 3] = ["relay", "revolut", "mercury"];

/// The Relay checking account number our Revolut account sends sweeps to.
/// A Revolut TRANSFER with this beneficiary is an own-account move.
pub const OWN_RELAY_ACCOUNT: &str = "202405780921";

pub const CATEGORY_TRANSFER: &str = "Transfer";
pub const CATEGORY_SALES: &str = "Sales";
pub const CATEGORY_REFUNDS: &str = "Refunds";
pub const CATEGORY_FEES: &str = "Fees";
pub const CATEGORY_PAYROLL: &str = "Payroll";
pub const CATEGORY_OTHER: &str = "Other";

/// Outcome of classification. `deferred` marks the branches that handed
/// category choice to the keyword categorizer; only those may be overridden
/// by user rules at import time. Forced categories (Payroll, Transfer,
/// Fees, Refunds, Sales) are not.
#[derive(Debug, Clone)]
pub struct Classification {
    pub txn_type: TxnType,
    pub category: String,
    pub deferred: bool,
}

impl Classification {
    fn forced(txn_type: TxnType, category: &str) -> Self {
        Classification {
            txn_type,
            category: category.to_string(),
            deferred: false,
        }
    }

    fn deferred_expense(rec: &RawRecord) -> Self {
        Classification {
            txn_type: TxnType::Expense,
            category: categorize::fixed_category(&rec.payee, &rec.description_raw),
            deferred: true,
        }
    }
}

/// Decide type and initial category for one record.
pub fn classify(dialect: Dialect, rec: &RawRecord, members: &[TeamMember]) -> Classification {
    match dialect {
        Dialect::Relay => classify_relay(rec),
        Dialect::Revolut => classify_revolut(rec, members),
        Dialect::Mercury | Dialect::Generic => sign_fallback(rec),
    }
}

fn classify_relay(rec: &RawRecord) -> Classification {
    let ttype = rec.transaction_type.trim().to_lowercase();
    if ttype == "spend" {
        return Classification::deferred_expense(rec);
    }
    if ttype == "receive" {
        // Inflows from our sibling-bank accounts are hops; everything else
        // arriving on Relay is sales revenue.
        let payee = rec.payee.trim().to_lowercase();
        if SIBLING_BANKS.iter().any(|b| *b == payee) {
            return Classification::forced(TxnType::Internal, CATEGORY_TRANSFER);
        }
        return Classification::forced(TxnType::Income, CATEGORY_SALES);
    }
    if ttype.contains("transfer") {
        return Classification::forced(TxnType::Internal, CATEGORY_TRANSFER);
    }
    sign_fallback(rec)
}

fn classify_revolut(rec: &RawRecord, members: &[TeamMember]) -> Classification {
    let ttype = rec.transaction_type.trim().to_uppercase();
    match ttype.as_str() {
        "CARD_PAYMENT" => Classification::deferred_expense(rec),
        "FEE" => Classification::forced(TxnType::Expense, CATEGORY_FEES),
        "TOPUP" => Classification::forced(TxnType::Income, CATEGORY_SALES),
        "REFUND" | "CARD_REFUND" => Classification::forced(TxnType::Income, CATEGORY_REFUNDS),
        "EXCHANGE" => Classification::forced(TxnType::Internal, CATEGORY_TRANSFER),
        "TRANSFER" => {
            let beneficiary = rec.beneficiary_account.trim();
            if beneficiary.is_empty() || beneficiary == OWN_RELAY_ACCOUNT {
                return Classification::forced(TxnType::Internal, CATEGORY_TRANSFER);
            }
            let is_payroll = members.iter().any(|m| {
                m.beneficiary_account
                    .as_deref()
                    .is_some_and(|acct| acct == beneficiary)
            });
            if is_payroll {
                Classification::forced(TxnType::Expense, CATEGORY_PAYROLL)
            } else {
                Classification::forced(TxnType::Expense, CATEGORY_OTHER)
            }
        }
        _ => sign_fallback(rec),
    }
}

/// Default when the type field is missing or unrecognized: positive in,
/// negative out.
fn sign_fallback(rec: &RawRecord) -> Classification {
    if rec.amount > Decimal::ZERO {
        Classification::forced(TxnType::Income, CATEGORY_SALES)
    } else {
        Classification::deferred_expense(rec)
    }
}

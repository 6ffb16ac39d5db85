// Copyright (c) Bankpipe Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Description cleanup: turn raw statement text into a short human label.
//! Never returns an empty string.

const BOILERPLATE_PREFIXES: [&str; 6] = [
    "payment to",
    "payment from",
    "direct debit",
    "card payment",
    "pos",
    "purchase",
];

const MAX_LEN: usize = 80;

pub fn clean_description(raw: &str, payee: &str) -> String {
    let mut text = raw.trim().to_string();
    if text.is_empty() || text.eq_ignore_ascii_case("unknown") {
        text = payee.trim().to_string();
    }
    if text.is_empty() {
        text = "Transaction".to_string();
    }

    // SHOUTING bank descriptions read badly in lists.
    if text.len() > 3 && text.chars().all(|c| !c.is_lowercase()) {
        text = title_case(&text);
    }

    let lower = text.to_lowercase();
    for prefix in BOILERPLATE_PREFIXES {
        if lower.starts_with(prefix) {
            if let Some(rest) = text.get(prefix.len()..) {
                text = rest.trim_start().to_string();
            }
            break;
        }
    }
    if text.is_empty() {
        text = payee.trim().to_string();
    }
    if text.is_empty() {
        text = "Transaction".to_string();
    }

    if text.chars().count() > MAX_LEN {
        text = text.chars().take(MAX_LEN).collect();
    }
    text
}

/// Capitalize the first letter of each whitespace-separated token and lower
/// the rest.
fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

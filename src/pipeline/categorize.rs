// Copyright (c) Bankpipe Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Two-layer keyword categorization. Layer one is a fixed, ordered vendor
//! table (first match wins) that gives new imports a sensible default.
//! Layer two is the user-defined rule store, consulted after the fixed
//! table at import time and by the retroactive applier over the whole
//! ledger. The two layers stay distinct because their trigger conditions
//! differ.

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::Connection;

use crate::models::{MatchType, Rule};

/// Fixed vendor table, checked in order against `payee + " " + description`.
static FIXED_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (
            r"(?i)facebook|fb\.me|meta ads|instagram|google ads|adwords|tiktok ads|linkedin ads|twitter ads",
            "Ads",
        ),
        (
            r"(?i)\baws\b|amazon web services|google cloud|digitalocean|heroku|vercel|netlify|cloudflare|github|gitlab|slack|notion|figma|zoom|atlassian|openai|anthropic",
            "Software",
        ),
        (
            r"(?i)\bdhl\b|fedex|\bups\b|usps|shipstation|easypost|royal mail|freight|courier",
            "Shipping",
        ),
        (r"(?i)\bfees?\b|service charge|commission|surcharge", "Fees"),
        (r"(?i)refund|chargeback|reversal", "Refunds"),
        (
            r"(?i)\boffice\b|\brent\b|wework|staples|ikea|stationery|supplies",
            "Office",
        ),
    ]
    .into_iter()
    .map(|(pat, cat)| (Regex::new(pat).expect("valid fixed rule pattern"), cat))
    .collect()
});

/// Default category for a new expense row: first fixed rule matching the
/// payee/description text, else "Other".
pub fn fixed_category(payee: &str, description: &str) -> String {
    let hay = format!("{} {}", payee, description);
    for (re, cat) in FIXED_RULES.iter() {
        if re.is_match(&hay) {
            return (*cat).to_string();
        }
    }
    "Other".to_string()
}

/// Does this rule match the lower-cased `description + " " + payee` text?
pub fn rule_matches(rule: &Rule, text: &str) -> bool {
    let keyword = rule.keyword.trim().to_lowercase();
    if keyword.is_empty() {
        return false;
    }
    match rule.match_type {
        MatchType::Contains => text.contains(&keyword),
        MatchType::StartsWith => text.starts_with(&keyword),
        MatchType::Exact => text == keyword,
    }
}

/// First user rule matching the transaction text, highest priority first.
pub fn user_category(rules: &[Rule], description: &str, payee: &str) -> Option<String> {
    let text = format!("{} {}", description, payee).trim().to_lowercase();
    rules
        .iter()
        .find(|r| rule_matches(r, &text))
        .map(|r| r.category.clone())
}

/// Load user rules in evaluation order. Ties on priority keep insertion
/// order so "last rule applied wins" stays deterministic.
pub fn load_rules(conn: &Connection) -> Result<Vec<Rule>> {
    let mut stmt = conn.prepare(
        "SELECT id, keyword, category, match_type, priority FROM rules
         ORDER BY priority DESC, id ASC",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, i64>(4)?,
        ))
    })?;
    let mut rules = Vec::new();
    for row in rows {
        let (id, keyword, category, match_type, priority) = row?;
        let match_type = MatchType::parse(&match_type).unwrap_or(MatchType::Contains);
        rules.push(Rule {
            id,
            keyword: keyword.trim().to_lowercase(),
            category,
            match_type,
            priority,
        });
    }
    Ok(rules)
}

// Copyright (c) Bankpipe Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Quote-aware CSV line splitting. Bank exports quote fields that contain
//! commas but do not reliably escape embedded quotes, so this splitter only
//! tracks quoting state: a doubled quote toggles twice and is kept verbatim,
//! never unescaped. Numeric and date interpretation happen downstream.

/// Split one raw line into trimmed fields. An empty or whitespace-only line
/// yields no fields and is skipped by the caller.
pub fn split_line(line: &str) -> Vec<String> {
    if line.trim().is_empty() {
        return Vec::new();
    }
    let mut fields = Vec::new();
    let mut cur = String::new();
    let mut in_quotes = false;
    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                cur.push(ch);
            }
            ',' if !in_quotes => {
                fields.push(clean_field(&cur));
                cur.clear();
            }
            _ => cur.push(ch),
        }
    }
    fields.push(clean_field(&cur));
    fields
}

/// Trim, then strip at most one leading and one trailing quote character.
fn clean_field(raw: &str) -> String {
    let t = raw.trim();
    let t = t.strip_prefix('"').unwrap_or(t);
    let t = t.strip_suffix('"').unwrap_or(t);
    t.trim().to_string()
}

/// Lower-cased, trimmed header fields, used for dialect detection.
pub fn header_fields(line: &str) -> Vec<String> {
    split_line(line)
        .into_iter()
        .map(|f| f.to_lowercase())
        .collect()
}

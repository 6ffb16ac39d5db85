// Copyright (c) Bankpipe Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use rusqlite::Connection;
use std::fs;

use crate::commands::team::load_members;
use crate::pipeline::categorize::load_rules;
use crate::pipeline::import::{ImportBatch, ImportFile, persist_batch, run_import};
use crate::pipeline::rates;
use crate::utils::{get_base_currency, maybe_print_json, parse_period, pretty_table};

pub fn handle(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let paths: Vec<String> = sub
        .get_many::<String>("files")
        .map(|vals| vals.map(|s| s.trim().to_string()).collect())
        .unwrap_or_default();
    let period = parse_period(sub.get_one::<String>("period").map(String::as_str).unwrap_or(""))?;
    let dry_run = sub.get_flag("dry-run");
    let offline = sub.get_flag("offline");
    let json_flag = sub.get_flag("json");

    let mut files = Vec::new();
    for path in &paths {
        let text =
            fs::read_to_string(path).with_context(|| format!("Read statement {}", path))?;
        files.push(ImportFile {
            name: path.clone(),
            text,
        });
    }

    let members = load_members(conn)?;
    let rules = load_rules(conn)?;
    let base = get_base_currency(conn)?;

    // One rate lookup per batch; row processing never blocks on the network.
    let rate_map = {
        let mut cache = rates::SHARED
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        cache.get_rates(&base, offline)
    };

    let batch = run_import(&files, &period, &members, &rules, &base, &rate_map)?;

    for warning in &batch.warnings {
        eprintln!("warning: {}", warning);
    }
    if !maybe_print_json(json_flag, false, &batch.summary)? {
        print_summary(&batch, &base);
    }

    if dry_run {
        println!("Dry run: nothing persisted.");
        return Ok(());
    }
    let inserted = persist_batch(conn, &batch).context("Persist import batch")?;
    println!("Imported {} transactions for {}", inserted, period);
    Ok(())
}

fn print_summary(batch: &ImportBatch, base: &str) {
    let s = &batch.summary;
    let rows = vec![
        vec![
            "Income".to_string(),
            s.income_count.to_string(),
            format!("{} {}", base, s.income_total.round_dp(2)),
        ],
        vec![
            "Expenses".to_string(),
            s.expense_count.to_string(),
            format!("{} {}", base, s.expense_total.abs().round_dp(2)),
        ],
        vec![
            "Internal".to_string(),
            s.internal_count.to_string(),
            format!("{} {}", base, s.internal_total.round_dp(2)),
        ],
        vec![
            "Total".to_string(),
            s.total.to_string(),
            format!(
                "{} {}",
                base,
                (s.income_total + s.expense_total).round_dp(2)
            ),
        ],
    ];
    println!("{}", pretty_table(&["", "Count", "Sum"], rows));
    println!("Categories: {}", s.categories.join(", "));
}

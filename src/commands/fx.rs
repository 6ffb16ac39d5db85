// Copyright (c) Bankpipe Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::pipeline::rates;
use crate::utils::{get_base_currency, pretty_table, set_base_currency};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => {
            let offline = sub.get_flag("offline");
            let base = get_base_currency(conn)?;
            let mut cache = rates::SHARED
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if sub.get_flag("refresh") {
                // Force the TTL check to miss.
                *cache = rates::RateCache::new();
            }
            let map = cache.get_rates(&base, offline);
            let mut rows: Vec<Vec<String>> = map
                .iter()
                .map(|(ccy, rate)| vec![ccy.clone(), rate.round_dp(4).to_string()])
                .collect();
            rows.sort();
            let header = format!("Per 1 {}", base);
            println!("{}", pretty_table(&["Currency", header.as_str()], rows));
        }
        Some(("set-base", sub)) => {
            let ccy = sub.get_one::<String>("currency").unwrap().trim().to_uppercase();
            set_base_currency(conn, &ccy)?;
            println!("Reporting currency set to {}", ccy);
        }
        _ => {}
    }
    Ok(())
}

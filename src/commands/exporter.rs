// Copyright (c) Bankpipe Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let mut stmt = conn.prepare(
        "SELECT date, description, reference, bank, account, type, category, amount, currency,
                original_amount, original_currency, period, payee
         FROM transactions ORDER BY date, id",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, String>(5)?,
            r.get::<_, String>(6)?,
            r.get::<_, String>(7)?,
            r.get::<_, String>(8)?,
            r.get::<_, Option<String>>(9)?,
            r.get::<_, Option<String>>(10)?,
            r.get::<_, String>(11)?,
            r.get::<_, Option<String>>(12)?,
        ))
    })?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "date",
                "description",
                "reference",
                "bank",
                "account",
                "type",
                "category",
                "amount",
                "currency",
                "original_amount",
                "original_currency",
                "period",
                "payee",
            ])?;
            for row in rows {
                let (d, desc, refr, bank, acct, ty, cat, amt, ccy, oamt, occy, period, payee) =
                    row?;
                wtr.write_record([
                    d,
                    desc,
                    refr,
                    bank,
                    acct,
                    ty,
                    cat,
                    amt,
                    ccy,
                    oamt.unwrap_or_default(),
                    occy.unwrap_or_default(),
                    period,
                    payee.unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let mut items = Vec::new();
            for row in rows {
                let (d, desc, refr, bank, acct, ty, cat, amt, ccy, oamt, occy, period, payee) =
                    row?;
                items.push(json!({
                    "date": d, "description": desc, "reference": refr, "bank": bank,
                    "account": acct, "type": ty, "category": cat, "amount": amt,
                    "currency": ccy, "originalAmount": oamt, "originalCurrency": occy,
                    "period": period, "payee": payee
                }));
            }
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
            return Ok(());
        }
    }
    println!("Exported transactions to {}", out);
    Ok(())
}

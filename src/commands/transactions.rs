// Copyright (c) Bankpipe Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use rusqlite::{Connection, params};
use serde::Serialize;

use crate::models::TxnType;
use crate::utils::{category_exists, maybe_print_json, parse_period, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(conn, sub)?,
        Some(("set-category", sub)) => set_category(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub description: String,
    pub bank: String,
    pub r#type: String,
    pub category: String,
    pub amount: String,
    pub currency: String,
    pub period: String,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.description.clone(),
                    r.bank.clone(),
                    r.r#type.clone(),
                    r.category.clone(),
                    r.amount.clone(),
                    r.currency.clone(),
                    r.period.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "ID", "Date", "Description", "Bank", "Type", "Category", "Amount", "CCY",
                    "Period"
                ],
                rows,
            )
        );
    }
    Ok(())
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let mut sql = String::from(
        "SELECT id, date, description, bank, type, category, amount, currency, period
         FROM transactions WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();

    if let Some(period) = sub.get_one::<String>("period") {
        sql.push_str(" AND period=?");
        params_vec.push(parse_period(period)?);
    }
    if let Some(raw) = sub.get_one::<String>("type") {
        let ttype = TxnType::parse(raw)
            .ok_or_else(|| anyhow!("Invalid type '{}' (use income|expense|internal)", raw))?;
        sql.push_str(" AND type=?");
        params_vec.push(ttype.as_str().to_string());
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        sql.push_str(" AND category=? COLLATE NOCASE");
        params_vec.push(cat.trim().to_string());
    }
    if let Some(bank) = sub.get_one::<String>("bank") {
        sql.push_str(" AND bank=?");
        params_vec.push(bank.trim().to_string());
    }
    sql.push_str(" ORDER BY date DESC, id DESC");
    if let Some(limit) = sub.get_one::<usize>("limit") {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(params))?;

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        data.push(TransactionRow {
            id: r.get(0)?,
            date: r.get(1)?,
            description: r.get(2)?,
            bank: r.get(3)?,
            r#type: r.get(4)?,
            category: r.get(5)?,
            amount: r.get(6)?,
            currency: r.get(7)?,
            period: r.get(8)?,
        });
    }
    Ok(data)
}

/// Category is the only field a transaction ever has edited after creation.
fn set_category(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub
        .get_one::<String>("id")
        .map(String::as_str)
        .unwrap_or("")
        .trim()
        .parse::<i64>()?;
    let category = sub.get_one::<String>("category").unwrap().trim();
    if !category_exists(conn, category)? {
        return Err(anyhow!("Category '{}' not found", category));
    }
    let changed = conn.execute(
        "UPDATE transactions SET category=?1 WHERE id=?2",
        params![category, id],
    )?;
    if changed == 0 {
        return Err(anyhow!("Transaction {} not found", id));
    }
    println!("Transaction {} -> {}", id, category);
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    if sub.get_flag("all") {
        let n = conn.execute("DELETE FROM transactions", [])?;
        println!("Removed {} transactions", n);
        return Ok(());
    }
    let period = sub
        .get_one::<String>("period")
        .ok_or_else(|| anyhow!("Pass --period with --bank, or --all"))?;
    let bank = sub
        .get_one::<String>("bank")
        .ok_or_else(|| anyhow!("Pass --period with --bank, or --all"))?;
    let period = parse_period(period)?;
    let n = conn.execute(
        "DELETE FROM transactions WHERE period=?1 AND bank=?2",
        params![period, bank.trim()],
    )?;
    println!("Removed {} transactions for {} / {}", n, period, bank.trim());
    Ok(())
}

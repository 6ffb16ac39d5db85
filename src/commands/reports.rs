// Copyright (c) Bankpipe Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;

use crate::utils::{get_base_currency, parse_decimal, parse_period, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("profit", sub)) => profit(conn, sub)?,
        Some(("categories", sub)) => categories(conn, sub)?,
        Some(("payroll", sub)) => payroll(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// Income vs. expenses. Internal transfers never contribute.
fn profit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let base = get_base_currency(conn)?;
    let (filter, period_param) = period_filter(sub)?;
    let sql = format!(
        "SELECT type, amount FROM transactions WHERE type != 'internal'{}",
        filter
    );
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = match &period_param {
        Some(p) => stmt.query(params![p])?,
        None => stmt.query([])?,
    };

    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    while let Some(r) = rows.next()? {
        let ttype: String = r.get(0)?;
        let amount = parse_decimal(&r.get::<_, String>(1)?)?;
        if ttype == "income" {
            income += amount;
        } else {
            expense += amount;
        }
    }
    let data = vec![
        vec!["Income".to_string(), fmt(&income, &base)],
        vec!["Expenses".to_string(), fmt(&expense.abs(), &base)],
        vec!["Net".to_string(), fmt(&(income + expense), &base)],
    ];
    println!("{}", pretty_table(&["", "Amount"], data));
    Ok(())
}

/// Expense totals by category, largest first.
fn categories(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let base = get_base_currency(conn)?;
    let (filter, period_param) = period_filter(sub)?;
    let sql = format!(
        "SELECT category, amount FROM transactions WHERE type = 'expense'{}",
        filter
    );
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = match &period_param {
        Some(p) => stmt.query(params![p])?,
        None => stmt.query([])?,
    };

    let mut totals: Vec<(String, Decimal)> = Vec::new();
    while let Some(r) = rows.next()? {
        let category: String = r.get(0)?;
        let amount = parse_decimal(&r.get::<_, String>(1)?)?.abs();
        match totals.iter_mut().find(|(c, _)| *c == category) {
            Some((_, sum)) => *sum += amount,
            None => totals.push((category, amount)),
        }
    }
    totals.sort_by(|a, b| b.1.cmp(&a.1));
    let data = totals
        .into_iter()
        .map(|(c, sum)| vec![c, fmt(&sum, &base)])
        .collect();
    println!("{}", pretty_table(&["Category", "Spent"], data));
    Ok(())
}

/// Payroll view for one period: fixed base plus recorded variable comp per
/// member, alongside what the ledger actually booked as Payroll.
fn payroll(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let base = get_base_currency(conn)?;
    let period = parse_period(sub.get_one::<String>("period").unwrap())?;

    let mut stmt = conn.prepare(
        "SELECT m.name, m.role, m.base_salary, COALESCE(c.variable, '0'), COALESCE(c.note, '')
         FROM team_members m
         LEFT JOIN compensation c ON c.member_id = m.id AND c.period = ?1
         ORDER BY m.name",
    )?;
    let mut rows = stmt.query(params![period])?;
    let mut data = Vec::new();
    let mut planned = Decimal::ZERO;
    while let Some(r) = rows.next()? {
        let name: String = r.get(0)?;
        let role: String = r.get(1)?;
        let salary = parse_decimal(&r.get::<_, String>(2)?)?;
        let variable = parse_decimal(&r.get::<_, String>(3)?)?;
        let note: String = r.get(4)?;
        planned += salary + variable;
        data.push(vec![
            name,
            role,
            fmt(&salary, &base),
            fmt(&variable, &base),
            fmt(&(salary + variable), &base),
            note,
        ]);
    }
    println!(
        "{}",
        pretty_table(&["Name", "Role", "Base", "Variable", "Total", "Note"], data)
    );

    let mut stmt = conn.prepare(
        "SELECT amount FROM transactions WHERE period=?1 AND type='expense' AND category='Payroll'",
    )?;
    let mut rows = stmt.query(params![period])?;
    let mut booked = Decimal::ZERO;
    while let Some(r) = rows.next()? {
        booked += parse_decimal(&r.get::<_, String>(0)?)?;
    }
    println!("Planned payroll: {}", fmt(&planned, &base));
    println!("Booked payroll:  {}", fmt(&booked.abs(), &base));
    Ok(())
}

fn period_filter(sub: &clap::ArgMatches) -> Result<(String, Option<String>)> {
    match sub.get_one::<String>("period") {
        Some(p) => Ok((" AND period=?1".to_string(), Some(parse_period(p)?))),
        None => Ok((String::new(), None)),
    }
}

fn fmt(d: &Decimal, ccy: &str) -> String {
    format!("{} {}", ccy, d.round_dp(2))
}

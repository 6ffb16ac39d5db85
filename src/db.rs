// Copyright (c) Bankpipe Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("io.bankpipe", "Bankpipe", "bankpipe"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("bankpipe.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT NOT NULL,
        description TEXT NOT NULL,
        reference TEXT NOT NULL,
        bank TEXT NOT NULL,
        account TEXT NOT NULL,
        type TEXT NOT NULL CHECK(type IN ('income','expense','internal')),
        category TEXT NOT NULL DEFAULT 'Other',
        amount TEXT NOT NULL,
        currency TEXT NOT NULL,
        original_amount TEXT,
        original_currency TEXT,
        period TEXT NOT NULL,
        payee TEXT,
        account_number TEXT,
        transaction_type TEXT,
        status TEXT,
        balance TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
    CREATE INDEX IF NOT EXISTS idx_transactions_period ON transactions(period, bank);

    CREATE TABLE IF NOT EXISTS team_members(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        role TEXT NOT NULL,
        base_salary TEXT NOT NULL DEFAULT '0',
        beneficiary_account TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    -- Per-period variable compensation, edited explicitly by the user.
    -- The import pipeline never writes here.
    CREATE TABLE IF NOT EXISTS compensation(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        member_id INTEGER NOT NULL,
        period TEXT NOT NULL,
        variable TEXT NOT NULL DEFAULT '0',
        note TEXT,
        UNIQUE(member_id, period),
        FOREIGN KEY(member_id) REFERENCES team_members(id) ON DELETE CASCADE
    );

    CREATE TABLE IF NOT EXISTS categories(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE COLLATE NOCASE,
        color TEXT NOT NULL DEFAULT '#8884d8'
    );
    INSERT OR IGNORE INTO categories(name, color) VALUES('Other', '#9e9e9e');
    INSERT OR IGNORE INTO categories(name, color) VALUES('Payroll', '#4caf50');

    CREATE TABLE IF NOT EXISTS rules(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        keyword TEXT NOT NULL,
        category TEXT NOT NULL,
        match_type TEXT NOT NULL DEFAULT 'contains'
            CHECK(match_type IN ('contains','starts_with','exact')),
        priority INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    )?;
    Ok(())
}

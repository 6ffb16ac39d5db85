// Copyright (c) Bankpipe Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use bankpipe::models::{MatchType, Rule};
use bankpipe::pipeline::apply::apply_rules;
use bankpipe::pipeline::categorize::{rule_matches, user_category};
use bankpipe::{cli, commands::rules, db};
use rusqlite::Connection;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn rule(keyword: &str, category: &str, match_type: MatchType, priority: i64) -> Rule {
    Rule {
        id: 0,
        keyword: keyword.into(),
        category: category.into(),
        match_type,
        priority,
    }
}

fn insert_txn(conn: &Connection, description: &str, payee: &str, category: &str) {
    conn.execute(
        "INSERT INTO transactions(date, description, reference, bank, account, type, category,
            amount, currency, period)
         VALUES ('2026-03-05', ?1, ?1, 'Relay', 'USD', 'expense', ?3, '-10', 'USD', 'Mar 2026')",
        rusqlite::params![description, description, category],
    )
    .unwrap();
    conn.execute(
        "UPDATE transactions SET payee=?1 WHERE description=?2",
        rusqlite::params![payee, description],
    )
    .unwrap();
}

#[test]
fn match_type_semantics() {
    let text = "github monthly bill github inc";
    assert!(rule_matches(&rule("github", "Software", MatchType::Contains, 0), text));
    assert!(rule_matches(&rule("github m", "Software", MatchType::StartsWith, 0), text));
    assert!(!rule_matches(&rule("monthly", "Software", MatchType::StartsWith, 0), text));
    assert!(rule_matches(
        &rule("github monthly bill github inc", "Software", MatchType::Exact, 0),
        text
    ));
    assert!(!rule_matches(&rule("github monthly", "Software", MatchType::Exact, 0), text));
}

#[test]
fn user_category_prefers_first_rule_in_order() {
    let rules = vec![
        rule("acme", "Office", MatchType::Contains, 10),
        rule("acme", "Software", MatchType::Contains, 0),
    ];
    let got = user_category(&rules, "ACME subscription", "Acme Inc");
    assert_eq!(got.as_deref(), Some("Office"));
}

#[test]
fn rule_add_requires_existing_category() {
    let conn = setup();
    let matches = cli::build_cli().get_matches_from([
        "bankpipe", "rule", "add", "--keyword", "github", "--category", "Nonexistent",
    ]);
    if let Some(("rule", sub)) = matches.subcommand() {
        let err = rules::handle(&conn, sub).unwrap_err();
        assert!(err.to_string().contains("Category 'Nonexistent' not found"));
    } else {
        panic!("rule command not parsed");
    }
}

#[test]
fn rule_add_lowercases_keyword() {
    let conn = setup();
    let matches = cli::build_cli().get_matches_from([
        "bankpipe", "rule", "add", "--keyword", "  GitHub  ", "--category", "Other",
    ]);
    if let Some(("rule", sub)) = matches.subcommand() {
        rules::handle(&conn, sub).unwrap();
    } else {
        panic!("rule command not parsed");
    }
    let keyword: String = conn
        .query_row("SELECT keyword FROM rules", [], |r| r.get(0))
        .unwrap();
    assert_eq!(keyword, "github");
}

#[test]
fn retroactive_apply_updates_disagreeing_rows_only() {
    let conn = setup();
    conn.execute("INSERT INTO categories(name) VALUES('Software')", [])
        .unwrap();
    conn.execute(
        "INSERT INTO rules(keyword, category, match_type, priority)
         VALUES ('github', 'Software', 'contains', 0)",
        [],
    )
    .unwrap();

    insert_txn(&conn, "github invoice", "GitHub", "Other");
    insert_txn(&conn, "github invoice feb", "GitHub", "Software");
    insert_txn(&conn, "office chairs", "Staples", "Office");

    let updated = apply_rules(&conn).unwrap();
    assert_eq!(updated, 1);

    let category: String = conn
        .query_row(
            "SELECT category FROM transactions WHERE description='github invoice'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(category, "Software");
    // The non-matching row keeps its category.
    let category: String = conn
        .query_row(
            "SELECT category FROM transactions WHERE description='office chairs'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(category, "Office");
}

#[test]
fn retroactive_apply_is_idempotent() {
    let conn = setup();
    conn.execute("INSERT INTO categories(name) VALUES('Software')", [])
        .unwrap();
    conn.execute(
        "INSERT INTO rules(keyword, category, match_type, priority)
         VALUES ('github', 'Software', 'contains', 0)",
        [],
    )
    .unwrap();
    insert_txn(&conn, "github invoice", "GitHub", "Other");

    assert_eq!(apply_rules(&conn).unwrap(), 1);
    assert_eq!(apply_rules(&conn).unwrap(), 0);
}

#[test]
fn retroactive_apply_without_rules_touches_nothing() {
    let conn = setup();
    insert_txn(&conn, "github invoice", "GitHub", "Other");
    assert_eq!(apply_rules(&conn).unwrap(), 0);
}

#[test]
fn higher_priority_rule_wins_at_apply_time() {
    let conn = setup();
    conn.execute("INSERT INTO categories(name) VALUES('Software')", [])
        .unwrap();
    conn.execute("INSERT INTO categories(name) VALUES('Office')", [])
        .unwrap();
    conn.execute(
        "INSERT INTO rules(keyword, category, match_type, priority)
         VALUES ('github', 'Software', 'contains', 0)",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO rules(keyword, category, match_type, priority)
         VALUES ('github', 'Office', 'contains', 5)",
        [],
    )
    .unwrap();
    insert_txn(&conn, "github invoice", "GitHub", "Other");

    apply_rules(&conn).unwrap();
    let category: String = conn
        .query_row("SELECT category FROM transactions LIMIT 1", [], |r| r.get(0))
        .unwrap();
    assert_eq!(category, "Office");
}

#[test]
fn rule_rm_trims_id_argument() {
    let conn = setup();
    conn.execute(
        "INSERT INTO rules(keyword, category, match_type, priority)
         VALUES ('foo', 'Other', 'contains', 0)",
        [],
    )
    .unwrap();

    let matches =
        cli::build_cli().get_matches_from(["bankpipe", "rule", "rm", "--id", " 1 "]);
    if let Some(("rule", sub)) = matches.subcommand() {
        rules::handle(&conn, sub).unwrap();
    } else {
        panic!("rule command not parsed");
    }
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM rules", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

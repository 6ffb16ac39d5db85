// Copyright (c) Bankpipe Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use rusqlite::{Connection, params};

use crate::models::MatchType;
use crate::pipeline::apply::apply_rules;
use crate::utils::{category_exists, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let keyword = sub
                .get_one::<String>("keyword")
                .unwrap()
                .trim()
                .to_lowercase();
            if keyword.is_empty() {
                return Err(anyhow!("Rule keyword cannot be empty"));
            }
            let category = sub.get_one::<String>("category").unwrap().trim();
            if !category_exists(conn, category)? {
                return Err(anyhow!("Category '{}' not found", category));
            }
            let match_type = match sub.get_one::<String>("match-type") {
                Some(raw) => MatchType::parse(raw)
                    .ok_or_else(|| anyhow!("Invalid match type '{}' (use contains|starts_with|exact)", raw))?,
                None => MatchType::Contains,
            };
            let priority = sub.get_one::<i64>("priority").copied().unwrap_or(0);
            conn.execute(
                "INSERT INTO rules(keyword, category, match_type, priority) VALUES (?1,?2,?3,?4)",
                params![keyword, category, match_type.as_str(), priority],
            )?;
            println!(
                "Added rule: '{}' ({}) -> {}",
                keyword,
                match_type.as_str(),
                category
            );
        }
        Some(("list", _)) => {
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
            let mut data = Vec::new();
            for row in rows {
                let (id, keyword, category, match_type, priority) = row?;
                data.push(vec![
                    id.to_string(),
                    keyword,
                    match_type,
                    category,
                    priority.to_string(),
                ]);
            }
            println!(
                "{}",
                pretty_table(&["ID", "Keyword", "Match", "Category", "Priority"], data)
            );
        }
        Some(("rm", sub)) => {
            let raw = sub.get_one::<String>("id").unwrap();
            let id = raw.trim().parse::<i64>()?;
            let n = conn.execute("DELETE FROM rules WHERE id=?1", params![id])?;
            if n == 0 {
                return Err(anyhow!("Rule {} not found", id));
            }
            println!("Removed rule {}", id);
        }
        Some(("apply", _)) => {
            let updated = apply_rules(conn)?;
            println!("Updated {} transactions", updated);
        }
        _ => {}
    }
    Ok(())
}

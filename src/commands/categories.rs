// Copyright (c) Bankpipe Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use rusqlite::{Connection, params};

use crate::models::PROTECTED_CATEGORIES;
use crate::utils::pretty_table;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            if name.is_empty() {
                return Err(anyhow!("Category name cannot be empty"));
            }
            let color = sub
                .get_one::<String>("color")
                .map(String::as_str)
                .unwrap_or("#8884d8");
            conn.execute(
                "INSERT INTO categories(name, color) VALUES (?1, ?2)",
                params![name, color],
            )?;
            println!("Added category '{}'", name);
        }
        Some(("list", _)) => {
            let mut stmt = conn.prepare("SELECT name, color FROM categories ORDER BY name")?;
            let rows = stmt.query_map([], |r| {
                Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?))
            })?;
            let mut data = Vec::new();
            for row in rows {
                let (name, color) = row?;
                let tag = if PROTECTED_CATEGORIES
                    .iter()
                    .any(|p| p.eq_ignore_ascii_case(&name))
                {
                    "protected"
                } else {
                    ""
                };
                data.push(vec![name, color, tag.to_string()]);
            }
            println!("{}", pretty_table(&["Category", "Color", ""], data));
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            if PROTECTED_CATEGORIES
                .iter()
                .any(|p| p.eq_ignore_ascii_case(name))
            {
                return Err(anyhow!("Category '{}' is protected and cannot be removed", name));
            }
            // Orphaned transactions fall back to Other rather than keeping a
            // dangling label.
            conn.execute(
                "UPDATE transactions SET category='Other' WHERE category=?1 COLLATE NOCASE",
                params![name],
            )?;
            let n = conn.execute(
                "DELETE FROM categories WHERE name=?1 COLLATE NOCASE",
                params![name],
            )?;
            if n == 0 {
                return Err(anyhow!("Category '{}' not found", name));
            }
            println!("Removed category '{}'", name);
        }
        _ => {}
    }
    Ok(())
}

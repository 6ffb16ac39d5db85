// Copyright (c) Bankpipe Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use rusqlite::{Connection, params};

use crate::models::TeamMember;
use crate::utils::{id_for_member, parse_decimal, parse_period, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            let role = sub.get_one::<String>("role").unwrap().trim();
            let salary = parse_decimal(sub.get_one::<String>("salary").unwrap().trim())?;
            let beneficiary = sub
                .get_one::<String>("beneficiary")
                .map(|s| s.trim())
                .filter(|s| !s.is_empty());
            conn.execute(
                "INSERT INTO team_members(name, role, base_salary, beneficiary_account)
                 VALUES (?1, ?2, ?3, ?4)",
                params![name, role, salary.to_string(), beneficiary],
            )?;
            println!("Added team member '{}' ({})", name, role);
        }
        Some(("list", _)) => {
            let members = load_members(conn)?;
            let rows = members
                .into_iter()
                .map(|m| {
                    vec![
                        m.name,
                        m.role,
                        m.base_salary.round_dp(2).to_string(),
                        m.beneficiary_account.unwrap_or_default(),
                    ]
                })
                .collect();
            println!(
                "{}",
                pretty_table(&["Name", "Role", "Base Salary", "Beneficiary Account"], rows)
            );
        }
        Some(("set-account", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            let beneficiary = sub.get_one::<String>("beneficiary").unwrap().trim();
            let n = conn.execute(
                "UPDATE team_members SET beneficiary_account=?1 WHERE name=?2",
                params![beneficiary, name],
            )?;
            if n == 0 {
                return Err(anyhow!("Team member '{}' not found", name));
            }
            println!("Set beneficiary account for '{}'", name);
        }
        Some(("comp", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            let period = parse_period(sub.get_one::<String>("period").unwrap())?;
            let variable = parse_decimal(sub.get_one::<String>("variable").unwrap().trim())?;
            let note = sub
                .get_one::<String>("note")
                .map(|s| s.trim())
                .filter(|s| !s.is_empty());
            let member_id = id_for_member(conn, name)?;
            conn.execute(
                "INSERT INTO compensation(member_id, period, variable, note) VALUES (?1,?2,?3,?4)
                 ON CONFLICT(member_id, period) DO UPDATE
                 SET variable=excluded.variable, note=excluded.note",
                params![member_id, period, variable.to_string(), note],
            )?;
            println!("Recorded {} variable comp for '{}' ({})", variable, name, period);
        }
        _ => {}
    }
    Ok(())
}

/// All team members, used by the classifier to match payroll transfers by
/// beneficiary account.
pub fn load_members(conn: &Connection) -> Result<Vec<TeamMember>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, role, base_salary, beneficiary_account FROM team_members ORDER BY name",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, Option<String>>(4)?,
        ))
    })?;
    let mut members = Vec::new();
    for row in rows {
        let (id, name, role, salary_raw, beneficiary_account) = row?;
        members.push(TeamMember {
            id,
            name,
            role,
            base_salary: parse_decimal(&salary_raw)?,
            beneficiary_account,
        });
    }
    Ok(members)
}

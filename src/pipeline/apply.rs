// Copyright (c) Bankpipe Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Retroactive rule application: re-scan the whole ledger against the
//! current user rules and update categories that disagree. One read, one
//! write per changed row, no batch atomicity — the pass is idempotent, so a
//! partial failure is safely re-runnable and surfaces as a smaller count.

use anyhow::Result;
use rusqlite::{Connection, params};

use super::categorize;

/// Returns the number of transactions whose category changed. Running it a
/// second time with the same rules and ledger updates zero rows.
pub fn apply_rules(conn: &Connection) -> Result<usize> {
    let rules = categorize::load_rules(conn)?;
    if rules.is_empty() {
        return Ok(0);
    }

    let mut stmt =
        conn.prepare("SELECT id, description, payee, category FROM transactions")?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, Option<String>>(2)?,
            r.get::<_, String>(3)?,
        ))
    })?;

    let mut updated = 0usize;
    for row in rows {
        let (id, description, payee, current) = row?;
        let payee = payee.unwrap_or_default();
        let Some(target) = categorize::user_category(&rules, &description, &payee) else {
            continue;
        };
        if target != current {
            conn.execute(
                "UPDATE transactions SET category=?1 WHERE id=?2",
                params![target, id],
            )?;
            updated += 1;
        }
    }
    Ok(updated)
}

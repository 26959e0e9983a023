use crate::errors::AppResult;
use rusqlite::{Connection, params};
use std::collections::HashSet;

pub fn upsert_exclusion(conn: &Connection, scope: &str, user_id: i64, added_by: &str, created_ts: i64) -> AppResult<()> {
    conn.execute(
        "INSERT INTO ranking_excluded (scope_id, user_id, added_by, created_ts)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(scope_id, user_id)
         DO UPDATE SET added_by = excluded.added_by, created_ts = excluded.created_ts",
        params![scope, user_id, added_by, created_ts],
    )?;
    Ok(())
}

pub fn delete_exclusion(conn: &Connection, scope: &str, user_id: i64) -> AppResult<bool> {
    let n = conn.execute(
        "DELETE FROM ranking_excluded WHERE scope_id = ?1 AND user_id = ?2",
        params![scope, user_id],
    )?;
    Ok(n > 0)
}

/// Internal ids of the users hidden from rankings in `scope`.
pub fn excluded_user_ids(conn: &Connection, scope: &str) -> AppResult<HashSet<i64>> {
    let mut stmt = conn.prepare_cached("SELECT user_id FROM ranking_excluded WHERE scope_id = ?1")?;
    let rows = stmt.query_map([scope], |row| row.get::<_, i64>(0))?;

    let mut out = HashSet::new();
    for r in rows {
        out.insert(r?);
    }
    Ok(out)
}

/// External ids of excluded users, sorted.
pub fn list_exclusions(conn: &Connection, scope: &str) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare_cached(
        "SELECT u.external_id
         FROM ranking_excluded re
         JOIN users u ON u.id = re.user_id
         WHERE re.scope_id = ?1
         ORDER BY u.external_id ASC",
    )?;
    let rows = stmt.query_map([scope], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

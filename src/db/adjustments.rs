use crate::errors::AppResult;
use crate::models::adjustment::Adjustment;
use rusqlite::{Connection, params};
use std::collections::HashMap;

/// Append an adjustment row. Rows are never updated or deleted.
pub fn insert_adjustment(
    conn: &Connection,
    user_id: i64,
    scope: &str,
    delta_ms: i64,
    reason: Option<&str>,
    created_by: &str,
    created_ts: i64,
) -> AppResult<Adjustment> {
    conn.execute(
        "INSERT INTO adjustments (user_id, scope_id, delta_ms, reason, created_by, created_ts)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![user_id, scope, delta_ms, reason, created_by, created_ts],
    )?;

    Ok(Adjustment {
        id: conn.last_insert_rowid(),
        user_id,
        scope: scope.to_string(),
        delta_ms,
        reason: reason.map(str::to_string),
        created_by: created_by.to_string(),
        created_ts,
    })
}

/// Per-user sum of `delta_ms` for adjustments created at or after `since_ts`.
pub fn sum_adjustments(conn: &Connection, scope: &str, since_ts: i64) -> AppResult<HashMap<i64, (String, i64)>> {
    let mut stmt = conn.prepare_cached(
        "SELECT a.user_id, u.external_id, SUM(a.delta_ms) AS total
         FROM adjustments a
         JOIN users u ON a.user_id = u.id
         WHERE a.scope_id = ?1 AND a.created_ts >= ?2
         GROUP BY a.user_id",
    )?;

    let rows = stmt.query_map(params![scope, since_ts], |row| {
        let total: Option<i64> = row.get("total")?;
        Ok((
            row.get::<_, i64>("user_id")?,
            row.get::<_, String>("external_id")?,
            total.unwrap_or(0),
        ))
    })?;

    let mut out = HashMap::new();
    for r in rows {
        let (user_id, external_id, total) = r?;
        out.insert(user_id, (external_id, total));
    }
    Ok(out)
}

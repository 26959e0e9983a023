use crate::errors::AppResult;
use crate::models::justification::FullJustification;
use rusqlite::{Connection, OptionalExtension, params};

pub fn upsert_justification_full(
    conn: &Connection,
    user_id: i64,
    scope: &str,
    period_start: i64,
    reason: Option<&str>,
    created_by: &str,
    created_ts: i64,
) -> AppResult<()> {
    conn.execute(
        "INSERT INTO justified (user_id, scope_id, period_start_ts, reason, created_by, created_ts)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(user_id, scope_id, period_start_ts)
         DO UPDATE SET reason = excluded.reason,
                       created_by = excluded.created_by,
                       created_ts = excluded.created_ts",
        params![user_id, scope, period_start, reason, created_by, created_ts],
    )?;
    Ok(())
}

/// Returns true when a flag was actually removed.
pub fn delete_justification_full(conn: &Connection, user_id: i64, scope: &str, period_start: i64) -> AppResult<bool> {
    let n = conn.execute(
        "DELETE FROM justified
         WHERE user_id = ?1 AND scope_id = ?2 AND period_start_ts = ?3",
        params![user_id, scope, period_start],
    )?;
    Ok(n > 0)
}

pub fn get_justification_full(
    conn: &Connection,
    user_id: i64,
    scope: &str,
    period_start: i64,
) -> AppResult<Option<FullJustification>> {
    let mut stmt = conn.prepare_cached(
        "SELECT user_id, scope_id, period_start_ts, reason, created_by, created_ts
         FROM justified
         WHERE user_id = ?1 AND scope_id = ?2 AND period_start_ts = ?3",
    )?;

    let row = stmt
        .query_row(params![user_id, scope, period_start], |row| {
            Ok(FullJustification {
                user_id: row.get("user_id")?,
                scope: row.get("scope_id")?,
                period_start: row.get("period_start_ts")?,
                reason: row.get("reason")?,
                created_by: row.get("created_by")?,
                created_ts: row.get("created_ts")?,
            })
        })
        .optional()?;
    Ok(row)
}

#[allow(clippy::too_many_arguments)]
pub fn upsert_day_credits(
    conn: &Connection,
    user_id: i64,
    scope: &str,
    period_start: i64,
    days: i64,
    reason: Option<&str>,
    created_by: &str,
    created_ts: i64,
) -> AppResult<()> {
    conn.execute(
        "INSERT INTO justified_days_count
             (user_id, scope_id, period_start_ts, days, reason, created_by, created_ts)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
         ON CONFLICT(user_id, scope_id, period_start_ts)
         DO UPDATE SET days = excluded.days,
                       reason = excluded.reason,
                       created_by = excluded.created_by,
                       created_ts = excluded.created_ts",
        params![user_id, scope, period_start, days.max(0), reason, created_by, created_ts],
    )?;
    Ok(())
}

/// Stored day credits, 0 when no row exists.
pub fn get_day_credits(conn: &Connection, user_id: i64, scope: &str, period_start: i64) -> AppResult<i64> {
    let mut stmt = conn.prepare_cached(
        "SELECT days FROM justified_days_count
         WHERE user_id = ?1 AND scope_id = ?2 AND period_start_ts = ?3",
    )?;
    let days: Option<i64> = stmt
        .query_row(params![user_id, scope, period_start], |row| row.get(0))
        .optional()?;
    Ok(days.unwrap_or(0).max(0))
}

use crate::errors::{AppError, AppResult};
use crate::models::weekly::{GoalStatus, RankedRow, ReportEntry};
use rusqlite::{Connection, params};

/// Persist a reset report snapshot, one row per ranked user.
pub fn insert_report_rows(
    conn: &Connection,
    scope: &str,
    period_start: i64,
    rows: &[RankedRow],
    created_ts: i64,
) -> AppResult<usize> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO weekly_reports
             (scope_id, user_id, external_id, display_name, period_start,
              total_ms, status, base_goal, effective_goal, created_ts)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
    )?;

    for r in rows {
        stmt.execute(params![
            scope,
            r.user_id,
            r.external_id,
            r.display_name,
            period_start,
            r.total_ms,
            r.status.to_db_str(),
            r.base_goal,
            r.effective_goal,
            created_ts,
        ])?;
    }
    Ok(rows.len())
}

/// Stored report rows, newest reset first, best total first within a reset.
pub fn list_report_rows(conn: &Connection, scope: &str, limit: usize) -> AppResult<Vec<ReportEntry>> {
    let mut stmt = conn.prepare_cached(
        "SELECT period_start, created_ts, external_id, display_name, total_ms,
                status, base_goal, effective_goal
         FROM weekly_reports
         WHERE scope_id = ?1
         ORDER BY created_ts DESC, total_ms DESC, external_id ASC
         LIMIT ?2",
    )?;

    let rows = stmt.query_map(params![scope, limit as i64], |row| {
        let status_str: String = row.get("status")?;
        let status = GoalStatus::from_db_str(&status_str).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                5,
                rusqlite::types::Type::Text,
                Box::new(AppError::Other(format!("Invalid report status: {}", status_str))),
            )
        })?;

        Ok(ReportEntry {
            period_start: row.get("period_start")?,
            created_ts: row.get("created_ts")?,
            external_id: row.get("external_id")?,
            display_name: row.get("display_name")?,
            total_ms: row.get("total_ms")?,
            status,
            base_goal: row.get("base_goal")?,
            effective_goal: row.get("effective_goal")?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

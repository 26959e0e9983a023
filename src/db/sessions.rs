use crate::errors::AppResult;
use crate::models::session::{OpenSession, Session};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::collections::HashMap;

fn map_session(row: &Row) -> rusqlite::Result<Session> {
    Ok(Session {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        scope: row.get("scope_id")?,
        start_ts: row.get("start_ts")?,
        end_ts: row.get("end_ts")?,
    })
}

pub fn insert_session(conn: &Connection, user_id: i64, scope: &str, start_ts: i64) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO sessions (user_id, scope_id, start_ts, end_ts)
         VALUES (?1, ?2, ?3, NULL)",
        params![user_id, scope, start_ts],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find_open_session(conn: &Connection, user_id: i64, scope: &str) -> AppResult<Option<Session>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, user_id, scope_id, start_ts, end_ts FROM sessions
         WHERE user_id = ?1 AND scope_id = ?2 AND end_ts IS NULL",
    )?;
    let s = stmt.query_row(params![user_id, scope], map_session).optional()?;
    Ok(s)
}

pub fn get_session(conn: &Connection, session_id: i64) -> AppResult<Option<Session>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, user_id, scope_id, start_ts, end_ts FROM sessions WHERE id = ?1",
    )?;
    let s = stmt.query_row([session_id], map_session).optional()?;
    Ok(s)
}

/// Set `end_ts` on a still-open session of `scope`.
/// Returns false when nothing matched (missing, closed, or other scope).
pub fn close_session(conn: &Connection, session_id: i64, scope: &str, end_ts: i64) -> AppResult<bool> {
    let changed = conn.execute(
        "UPDATE sessions SET end_ts = ?1
         WHERE id = ?2 AND scope_id = ?3 AND end_ts IS NULL",
        params![end_ts, session_id, scope],
    )?;
    Ok(changed == 1)
}

/// Open sessions of a scope, oldest first.
pub fn list_open_sessions(conn: &Connection, scope: &str, limit: Option<usize>) -> AppResult<Vec<OpenSession>> {
    let limit = limit.map(|l| l as i64).unwrap_or(-1);
    let mut stmt = conn.prepare_cached(
        "SELECT s.id AS session_id, s.user_id, u.external_id, s.start_ts
         FROM sessions s
         JOIN users u ON s.user_id = u.id
         WHERE s.end_ts IS NULL AND s.scope_id = ?1
         ORDER BY s.start_ts ASC, s.id ASC
         LIMIT ?2",
    )?;

    let rows = stmt.query_map(params![scope, limit], |row| {
        Ok(OpenSession {
            session_id: row.get("session_id")?,
            user_id: row.get("user_id")?,
            external_id: row.get("external_id")?,
            start_ts: row.get("start_ts")?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count_open_sessions(conn: &Connection, user_id: i64, scope: &str) -> AppResult<i64> {
    let n = conn.query_row(
        "SELECT COUNT(*) FROM sessions
         WHERE user_id = ?1 AND scope_id = ?2 AND end_ts IS NULL",
        params![user_id, scope],
        |row| row.get(0),
    )?;
    Ok(n)
}

/// Per-user sum of closed session durations started at or after `since_ts`.
/// Keyed by internal user id, with the external id alongside.
pub fn sum_sessions(conn: &Connection, scope: &str, since_ts: i64) -> AppResult<HashMap<i64, (String, i64)>> {
    let mut stmt = conn.prepare_cached(
        "SELECT u.id AS user_id, u.external_id, SUM(s.end_ts - s.start_ts) AS total
         FROM sessions s
         JOIN users u ON s.user_id = u.id
         WHERE s.start_ts >= ?1 AND s.end_ts IS NOT NULL AND s.scope_id = ?2
         GROUP BY u.id",
    )?;

    let rows = stmt.query_map(params![since_ts, scope], |row| {
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

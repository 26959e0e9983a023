//! Key/value store for per-scope checkpoint state.
//!
//! Nothing here is cached: every read goes back to the database, so two
//! operations never act on a stale checkpoint.

use crate::errors::AppResult;
use crate::models::checkpoint::ResetBackup;
use rusqlite::{Connection, OptionalExtension, params};

pub fn meta_get(conn: &Connection, key: &str) -> AppResult<Option<String>> {
    let mut stmt = conn.prepare_cached("SELECT value FROM meta WHERE key = ?1")?;
    let v: Option<Option<String>> = stmt.query_row([key], |row| row.get(0)).optional()?;
    Ok(v.flatten())
}

pub fn meta_set(conn: &Connection, key: &str, value: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO meta (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn meta_delete(conn: &Connection, key: &str) -> AppResult<()> {
    conn.execute("DELETE FROM meta WHERE key = ?1", [key])?;
    Ok(())
}

fn last_reset_key(scope: &str) -> String {
    format!("last_reset_ts:{scope}")
}
fn prev_ts_key(scope: &str) -> String {
    format!("last_reset_prev_ts:{scope}")
}
fn prev_by_key(scope: &str) -> String {
    format!("last_reset_prev_by:{scope}")
}
fn prev_saved_at_key(scope: &str) -> String {
    format!("last_reset_prev_saved_at:{scope}")
}

/// Numeric meta value; missing or unparsable values read as 0.
fn meta_get_i64(conn: &Connection, key: &str) -> AppResult<i64> {
    Ok(meta_get(conn, key)?
        .and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(0))
}

/// Start of the current accounting period (0 = never reset).
pub fn last_reset_ts(conn: &Connection, scope: &str) -> AppResult<i64> {
    meta_get_i64(conn, &last_reset_key(scope))
}

pub fn set_last_reset_ts(conn: &Connection, scope: &str, ts: i64) -> AppResult<()> {
    meta_set(conn, &last_reset_key(scope), &ts.to_string())
}

pub fn reset_backup(conn: &Connection, scope: &str) -> AppResult<ResetBackup> {
    Ok(ResetBackup {
        prev_ts: meta_get_i64(conn, &prev_ts_key(scope))?,
        by: meta_get(conn, &prev_by_key(scope))?,
        saved_at: meta_get_i64(conn, &prev_saved_at_key(scope))?,
    })
}

pub fn set_reset_backup(conn: &Connection, scope: &str, prev_ts: i64, by: &str, saved_at: i64) -> AppResult<()> {
    meta_set(conn, &prev_ts_key(scope), &prev_ts.to_string())?;
    meta_set(conn, &prev_by_key(scope), by)?;
    meta_set(conn, &prev_saved_at_key(scope), &saved_at.to_string())?;
    Ok(())
}

pub fn clear_reset_backup(conn: &Connection, scope: &str) -> AppResult<()> {
    meta_delete(conn, &prev_ts_key(scope))?;
    meta_delete(conn, &prev_by_key(scope))?;
    meta_delete(conn, &prev_saved_at_key(scope))?;
    Ok(())
}

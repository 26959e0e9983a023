use crate::errors::AppResult;
use crate::models::user::User;
use rusqlite::{Connection, OptionalExtension, Row, params};

fn map_user(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get("id")?,
        external_id: row.get("external_id")?,
        scope: row.get("scope_id")?,
    })
}

pub fn find_user(conn: &Connection, external_id: &str, scope: &str) -> AppResult<Option<User>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, external_id, scope_id FROM users
         WHERE external_id = ?1 AND scope_id = ?2",
    )?;
    let user = stmt
        .query_row(params![external_id, scope], map_user)
        .optional()?;
    Ok(user)
}

/// Fetch the user for `(external_id, scope)`, creating it on first sight.
/// Users are never modified afterwards.
pub fn get_or_create_user(conn: &Connection, external_id: &str, scope: &str) -> AppResult<User> {
    if let Some(user) = find_user(conn, external_id, scope)? {
        return Ok(user);
    }

    conn.execute(
        "INSERT INTO users (external_id, scope_id) VALUES (?1, ?2)
         ON CONFLICT(external_id, scope_id) DO NOTHING",
        params![external_id, scope],
    )?;

    let user = conn.query_row(
        "SELECT id, external_id, scope_id FROM users
         WHERE external_id = ?1 AND scope_id = ?2",
        params![external_id, scope],
        map_user,
    )?;
    Ok(user)
}

pub fn get_user_by_id(conn: &Connection, user_id: i64) -> AppResult<Option<User>> {
    let mut stmt = conn.prepare_cached("SELECT id, external_id, scope_id FROM users WHERE id = ?1")?;
    let user = stmt.query_row([user_id], map_user).optional()?;
    Ok(user)
}

use crate::db::meta::last_reset_ts;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::time::fmt_datetime;
use rusqlite::Connection;
use std::fs;

/// Row counts of the ledger tables, optionally restricted to one scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerCounts {
    pub users: i64,
    pub sessions: i64,
    pub open_sessions: i64,
    pub adjustments: i64,
    pub report_rows: i64,
}

fn count(conn: &Connection, sql: &str, scope: &str) -> rusqlite::Result<i64> {
    conn.query_row(sql, [scope], |row| row.get(0))
}

pub fn ledger_counts(conn: &Connection, scope: &str) -> AppResult<LedgerCounts> {
    Ok(LedgerCounts {
        users: count(conn, "SELECT COUNT(*) FROM users WHERE scope_id = ?1", scope)?,
        sessions: count(conn, "SELECT COUNT(*) FROM sessions WHERE scope_id = ?1", scope)?,
        open_sessions: count(
            conn,
            "SELECT COUNT(*) FROM sessions WHERE scope_id = ?1 AND end_ts IS NULL",
            scope,
        )?,
        adjustments: count(conn, "SELECT COUNT(*) FROM adjustments WHERE scope_id = ?1", scope)?,
        report_rows: count(conn, "SELECT COUNT(*) FROM weekly_reports WHERE scope_id = ?1", scope)?,
    })
}

pub fn print_db_info(pool: &mut DbPool, db_path: &str, scope: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);
    println!("{}• Scope:{} {}", CYAN, RESET, scope);

    //
    // 2) COUNTS
    //
    let c = ledger_counts(&pool.conn, scope)?;
    println!("{}• Users:{} {}{}{}", CYAN, RESET, GREEN, c.users, RESET);
    println!(
        "{}• Sessions:{} {}{}{} ({} open)",
        CYAN, RESET, GREEN, c.sessions, RESET, c.open_sessions
    );
    println!("{}• Adjustments:{} {}", CYAN, RESET, c.adjustments);
    println!("{}• Stored report rows:{} {}", CYAN, RESET, c.report_rows);

    //
    // 3) CHECKPOINT
    //
    let since = last_reset_ts(&pool.conn, scope)?;
    let since_fmt = if since > 0 {
        fmt_datetime(since)
    } else {
        format!("{GREY}never reset (all-time){RESET}")
    };
    println!("{}• Counting since:{} {}", CYAN, RESET, since_fmt);

    println!();
    Ok(())
}

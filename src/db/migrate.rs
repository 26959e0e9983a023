use crate::ui::messages::{success, warning};
use rusqlite::{Connection, OptionalExtension, Result, params};

/// Ensure that the `log` table exists with the modern schema.
/// Applied migrations are recorded in it, so it always comes first.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        params![version, message],
    )?;
    Ok(())
}

const BASE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    external_id TEXT NOT NULL,
    scope_id    TEXT NOT NULL,
    UNIQUE(external_id, scope_id)
);

CREATE TABLE IF NOT EXISTS sessions (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id   INTEGER NOT NULL,
    scope_id  TEXT NOT NULL,
    start_ts  INTEGER NOT NULL,
    end_ts    INTEGER,
    FOREIGN KEY(user_id) REFERENCES users(id)
);

CREATE TABLE IF NOT EXISTS meta (
    key   TEXT PRIMARY KEY,
    value TEXT
);

CREATE INDEX IF NOT EXISTS idx_sessions_scope_open ON sessions (scope_id, end_ts);
CREATE INDEX IF NOT EXISTS idx_sessions_user_scope ON sessions (user_id, scope_id);
CREATE INDEX IF NOT EXISTS idx_sessions_start ON sessions (scope_id, start_ts);
"#;

const ADJUSTMENTS_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS adjustments (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id     INTEGER NOT NULL,
    scope_id    TEXT NOT NULL,
    delta_ms    INTEGER NOT NULL,
    reason      TEXT,
    created_by  TEXT NOT NULL,
    created_ts  INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_adjust_scope_ts ON adjustments (scope_id, created_ts);
CREATE INDEX IF NOT EXISTS idx_adjust_user_scope ON adjustments (user_id, scope_id);
"#;

const JUSTIFICATIONS_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS justified (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id          INTEGER NOT NULL,
    scope_id         TEXT NOT NULL,
    period_start_ts  INTEGER NOT NULL,
    reason           TEXT,
    created_by       TEXT NOT NULL,
    created_ts       INTEGER NOT NULL,
    UNIQUE(user_id, scope_id, period_start_ts)
);

CREATE TABLE IF NOT EXISTS justified_days_count (
    user_id          INTEGER NOT NULL,
    scope_id         TEXT NOT NULL,
    period_start_ts  INTEGER NOT NULL,
    days             INTEGER NOT NULL CHECK(days >= 0),
    reason           TEXT,
    created_by       TEXT NOT NULL,
    created_ts       INTEGER NOT NULL,
    PRIMARY KEY (user_id, scope_id, period_start_ts)
);
"#;

const EXCLUSIONS_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS ranking_excluded (
    scope_id    TEXT NOT NULL,
    user_id     INTEGER NOT NULL,
    added_by    TEXT NOT NULL,
    created_ts  INTEGER NOT NULL,
    PRIMARY KEY (scope_id, user_id)
);
"#;

const WEEKLY_REPORTS_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS weekly_reports (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    scope_id        TEXT NOT NULL,
    user_id         INTEGER NOT NULL,
    external_id     TEXT NOT NULL,
    display_name    TEXT NOT NULL,
    period_start    INTEGER NOT NULL,
    total_ms        INTEGER NOT NULL,
    status          TEXT NOT NULL CHECK(status IN ('goal_met','justified','pending')),
    base_goal       REAL NOT NULL,
    effective_goal  REAL NOT NULL,
    created_ts      INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_weekly_reports_scope ON weekly_reports (scope_id, created_ts);
"#;

/// Close all but the newest open session of each (user, scope) so that the
/// uniqueness guard can be created. Closed duplicates get a zero duration.
fn close_duplicate_open_sessions(conn: &Connection) -> Result<usize> {
    conn.execute(
        "UPDATE sessions
         SET end_ts = start_ts
         WHERE end_ts IS NULL
           AND id NOT IN (
               SELECT MAX(id) FROM sessions
               WHERE end_ts IS NULL
               GROUP BY user_id, scope_id
           )",
        [],
    )
}

fn migrate_single_open_session_guard(conn: &Connection) -> Result<()> {
    let closed = close_duplicate_open_sessions(conn)?;
    if closed > 0 {
        warning(format!(
            "Closed {} duplicate open session(s) with zero duration.",
            closed
        ));
    }

    conn.execute_batch(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_sessions_single_open
         ON sessions (user_id, scope_id) WHERE end_ts IS NULL;",
    )?;
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Called from db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    let batches: [(&str, &str, &str); 5] = [
        (
            "20250901_0001_base_schema",
            BASE_SCHEMA,
            "Created users, sessions and meta tables",
        ),
        (
            "20250910_0002_adjustments",
            ADJUSTMENTS_SCHEMA,
            "Created adjustments table",
        ),
        (
            "20250918_0003_justifications",
            JUSTIFICATIONS_SCHEMA,
            "Created justified and justified_days_count tables",
        ),
        (
            "20250925_0004_ranking_exclusions",
            EXCLUSIONS_SCHEMA,
            "Created ranking_excluded table",
        ),
        (
            "20251012_0006_weekly_reports",
            WEEKLY_REPORTS_SCHEMA,
            "Created weekly_reports table",
        ),
    ];

    for (version, sql, message) in batches {
        if is_applied(conn, version)? {
            continue;
        }
        conn.execute_batch(sql)?;
        mark_applied(conn, version, message)?;
        success(format!("Migration applied: {}", version));
    }

    let guard = "20251005_0005_single_open_session_guard";
    if !is_applied(conn, guard)? {
        migrate_single_open_session_guard(conn)?;
        mark_applied(conn, guard, "Added unique index on open sessions")?;
        success(format!("Migration applied: {}", guard));
    }

    Ok(())
}

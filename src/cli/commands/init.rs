use crate::cli::RunContext;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log::ttlog;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use rusqlite::Connection;

/// Handle the `init` command
///
/// Creates the configuration file (skipped in test mode or when one exists),
/// the SQLite database and its schema.
pub fn handle(cfg: &Config, ctx: &RunContext) -> AppResult<()> {
    let db_path = cfg
        .init_all(&ctx.config_path, ctx.test)?
        .to_string_lossy()
        .to_string();

    println!("⚙️  Initializing rPunchcard…");
    if !ctx.test {
        println!("📄 Config file : {}", ctx.config_path.display());
    }
    println!("🗄️  Database   : {}", &db_path);

    let conn = Connection::open(&db_path)?;
    init_db(&conn)?;

    success(format!("Database initialized at {}", &db_path));

    if let Err(e) = ttlog(
        &conn,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", &db_path),
    ) {
        warning(format!("Failed to write internal log: {e}"));
    }

    Ok(())
}

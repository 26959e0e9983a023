use crate::cli::RunContext;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RED, RESET};

/// Maintenance on the ledger file. Flags run in the order
/// migrate, info, check, vacuum.
pub fn handle(cmd: &Commands, cfg: &Config, ctx: &RunContext) -> AppResult<()> {
    let Commands::Db {
        migrate,
        check,
        vacuum,
        info,
    } = cmd
    else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;

    if *migrate {
        println!("{CYAN}▶ Applying pending schema migrations…{RESET}");
        run_pending_migrations(&pool.conn)?;
        println!("{GREEN}✔ Schema is up to date.{RESET}\n");
    }

    if *info {
        stats::print_db_info(&mut pool, &cfg.database, &ctx.scope)?;
    }

    if *check {
        check_integrity(&pool)?;
    }

    if *vacuum {
        compact(&pool, &cfg.database)?;
    }

    Ok(())
}

fn check_integrity(pool: &DbPool) -> AppResult<bool> {
    println!("{CYAN}▶ Checking ledger integrity…{RESET}");
    let verdict: String = pool
        .conn
        .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

    let ok = verdict == "ok";
    if ok {
        println!("{GREEN}✔ Ledger integrity check passed.{RESET}\n");
    } else {
        println!("{RED}✘ Ledger integrity check failed:{RESET} {verdict}\n");
    }
    Ok(ok)
}

fn compact(pool: &DbPool, db_path: &str) -> AppResult<()> {
    println!("{CYAN}▶ Compacting ledger file…{RESET}");
    pool.conn.execute_batch("VACUUM;")?;
    ttlog(&pool.conn, "vacuum", db_path, "Ledger file compacted")?;
    println!("{GREEN}✔ Ledger file compacted.{RESET}\n");
    Ok(())
}

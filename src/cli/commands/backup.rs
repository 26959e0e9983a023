use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::db::initialize::open_ready;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup { file, compress } = cmd {
        let pool = open_ready(&cfg.database)?;
        let written = BackupLogic::backup(&pool, &cfg.database, file, *compress)?;
        success(format!("Backup created: {}", written.display()));
    }

    Ok(())
}

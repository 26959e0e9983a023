pub mod adjust;
pub mod backup;
pub mod config;
pub mod db;
pub mod exclusion;
pub mod export;
pub mod init;
pub mod justify;
pub mod log;
pub mod ranking;
pub mod reset;
pub mod session;

use crate::config::Config;
use crate::core::calculator::goal::GoalPolicy;
use crate::core::identity::ConfigDirectory;
use crate::core::notify::AuditLogSink;
use crate::db::initialize::open_ready;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

/// Everything a ledger command needs: the database, the audit sink, the
/// role directory and the goal tiers.
pub(crate) struct Ledger {
    pub pool: DbPool,
    pub sink: AuditLogSink,
    pub roles: ConfigDirectory,
    pub policy: GoalPolicy,
}

impl Ledger {
    pub fn open(cfg: &Config) -> AppResult<Self> {
        let pool = open_ready(&cfg.database)?;
        Ok(Self {
            pool,
            sink: AuditLogSink::open(&cfg.database)?,
            roles: ConfigDirectory::from_config(cfg),
            policy: GoalPolicy::from_config(&cfg.goals),
        })
    }
}

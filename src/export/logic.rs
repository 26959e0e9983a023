use super::csv::write_csv;
use super::fs_utils::ensure_writable;
use super::json::write_json;
use super::model::WeeklyExport;
use super::{ExportFormat, notify_export_success};
use crate::core::calculator::goal::GoalPolicy;
use crate::core::identity::RoleResolver;
use crate::core::weekly::WeeklyLogic;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Current weekly rows, evaluated, as export records.
    pub fn collect(
        pool: &DbPool,
        scope: &str,
        policy: &GoalPolicy,
        roles: &dyn RoleResolver,
    ) -> AppResult<Vec<WeeklyExport>> {
        let (ranked, since_ts) = WeeklyLogic::ranking(&pool.conn, scope, policy, roles)?;
        Ok(ranked
            .iter()
            .map(|r| WeeklyExport::from_row(r, since_ts))
            .collect())
    }

    /// Write the current ranking of `scope` to `file`. Returns the number of
    /// rows written; an empty ranking still produces a (header-only) file.
    pub fn export(
        pool: &DbPool,
        scope: &str,
        format: ExportFormat,
        file: &str,
        force: bool,
        policy: &GoalPolicy,
        roles: &dyn RoleResolver,
    ) -> AppResult<usize> {
        let path = Path::new(file);
        ensure_writable(path, force)?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let rows = Self::collect(pool, scope, policy, roles)?;
        match format {
            ExportFormat::Csv => write_csv(path, &rows)?,
            ExportFormat::Json => write_json(path, &rows)?,
        }

        ttlog(
            &pool.conn,
            "export",
            scope,
            &format!("{} rows exported as {} to {}", rows.len(), format.as_str(), file),
        )?;
        notify_export_success(&format.as_str().to_uppercase(), path);

        Ok(rows.len())
    }
}

use super::model::WeeklyExport;
use crate::errors::{AppError, AppResult};
use std::path::Path;

/// Pretty-printed JSON array.
pub(crate) fn write_json(path: &Path, rows: &[WeeklyExport]) -> AppResult<()> {
    let json = serde_json::to_string_pretty(rows).map_err(|e| AppError::Export(e.to_string()))?;
    std::fs::write(path, json)?;
    Ok(())
}

use super::model::{WeeklyExport, get_headers};
use crate::errors::{AppError, AppResult};
use csv::Writer;
use std::path::Path;

pub(crate) fn write_csv(path: &Path, rows: &[WeeklyExport]) -> AppResult<()> {
    let mut wtr = Writer::from_path(path).map_err(|e| AppError::Export(e.to_string()))?;

    wtr.write_record(get_headers())
        .map_err(|e| AppError::Export(e.to_string()))?;

    for r in rows {
        wtr.write_record(&[
            r.position.to_string(),
            r.user.clone(),
            r.name.clone(),
            r.total_ms.to_string(),
            r.total.clone(),
            format!("{:.2}", r.hours),
            r.base_goal.to_string(),
            r.effective_goal.to_string(),
            r.justified_days.to_string(),
            r.full_justified.to_string(),
            r.status.clone(),
            r.period_start.to_string(),
        ])
        .map_err(|e| AppError::Export(e.to_string()))?;
    }

    wtr.flush()?;
    Ok(())
}

// src/export/model.rs

use crate::models::weekly::{RankedRow, StatusView};
use crate::utils::time::{format_hm, hours_float};
use serde::Serialize;

/// Flat, serialisable view of one ranked row.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct WeeklyExport {
    pub position: usize,
    pub user: String,
    pub name: String,
    pub total_ms: i64,
    pub total: String,
    pub hours: f64,
    pub base_goal: f64,
    pub effective_goal: f64,
    pub justified_days: i64,
    pub full_justified: bool,
    pub status: String,
    pub period_start: i64,
}

impl WeeklyExport {
    pub fn from_row(row: &RankedRow, period_start: i64) -> Self {
        Self {
            position: row.position,
            user: row.external_id.clone(),
            name: row.display_name.clone(),
            total_ms: row.total_ms,
            total: format_hm(row.total_ms),
            hours: (hours_float(row.total_ms) * 100.0).round() / 100.0,
            base_goal: row.base_goal,
            effective_goal: row.effective_goal,
            justified_days: row.day_credits,
            full_justified: row.full_justified,
            status: row.status.label(StatusView::Live).to_string(),
            period_start,
        }
    }
}

pub(crate) fn get_headers() -> Vec<&'static str> {
    vec![
        "position",
        "user",
        "name",
        "total_ms",
        "total",
        "hours",
        "base_goal",
        "effective_goal",
        "justified_days",
        "full_justified",
        "status",
        "period_start",
    ]
}

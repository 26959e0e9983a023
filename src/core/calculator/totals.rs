use crate::models::weekly::WeeklyRow;
use std::collections::{HashMap, HashSet};

/// Merge per-user session and adjustment sums into weekly rows.
///
/// A user present in only one map still gets a row. Excluded users are
/// dropped. Rows are ordered by total (desc), then external id (asc).
pub fn merge_totals(
    sessions: HashMap<i64, (String, i64)>,
    adjustments: HashMap<i64, (String, i64)>,
    excluded: &HashSet<i64>,
) -> Vec<WeeklyRow> {
    let mut merged: HashMap<i64, WeeklyRow> = HashMap::new();

    for (user_id, (external_id, ms)) in sessions.into_iter().chain(adjustments) {
        merged
            .entry(user_id)
            .and_modify(|r| r.total_ms = r.total_ms.saturating_add(ms))
            .or_insert(WeeklyRow {
                user_id,
                external_id,
                total_ms: ms,
            });
    }

    let mut rows: Vec<WeeklyRow> = merged
        .into_values()
        .filter(|r| !excluded.contains(&r.user_id))
        .collect();

    rows.sort_by(|a, b| {
        b.total_ms
            .cmp(&a.total_ms)
            .then_with(|| a.external_id.cmp(&b.external_id))
    });
    rows
}

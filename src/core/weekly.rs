use crate::core::calculator::goal::{GoalPolicy, effective_goal};
use crate::core::calculator::status::classify;
use crate::core::calculator::totals::merge_totals;
use crate::core::identity::RoleResolver;
use crate::db::adjustments::sum_adjustments;
use crate::db::exclusions::excluded_user_ids;
use crate::db::justifications::{get_day_credits, get_justification_full};
use crate::db::meta::last_reset_ts;
use crate::db::sessions::sum_sessions;
use crate::errors::AppResult;
use crate::models::weekly::{RankedRow, WeeklyRows};
use rusqlite::Connection;

/// Weekly totals and their evaluation against goals.
///
/// Functions take a plain `Connection` so that a reset can compute its
/// report inside the transaction that moves the checkpoint.
pub struct WeeklyLogic;

impl WeeklyLogic {
    /// Per-user totals since the scope's checkpoint (0 = all time).
    ///
    /// Open sessions do not count. Totals are signed: debits larger than the
    /// tracked time give a negative total, which is kept as is.
    pub fn compute_rows(conn: &Connection, scope: &str) -> AppResult<WeeklyRows> {
        let since_ts = last_reset_ts(conn, scope)?;

        let sessions = sum_sessions(conn, scope, since_ts)?;
        let adjustments = sum_adjustments(conn, scope, since_ts)?;
        let excluded = excluded_user_ids(conn, scope)?;

        Ok(WeeklyRows {
            rows: merge_totals(sessions, adjustments, &excluded),
            since_ts,
        })
    }

    /// Attach goals, justifications and a status to each row, keeping order.
    pub fn evaluate(
        conn: &Connection,
        scope: &str,
        weekly: &WeeklyRows,
        policy: &GoalPolicy,
        roles: &dyn RoleResolver,
    ) -> AppResult<Vec<RankedRow>> {
        let period = weekly.since_ts;
        let mut out = Vec::with_capacity(weekly.rows.len());

        for (i, row) in weekly.rows.iter().enumerate() {
            let base_goal = policy.base_goal(roles, &row.external_id, scope);
            let day_credits = get_day_credits(conn, row.user_id, scope, period)?;
            let full_justified = get_justification_full(conn, row.user_id, scope, period)?.is_some();
            let effective = effective_goal(base_goal, day_credits);

            out.push(RankedRow {
                position: i + 1,
                user_id: row.user_id,
                external_id: row.external_id.clone(),
                display_name: roles.display_name(&row.external_id, scope),
                total_ms: row.total_ms,
                base_goal,
                effective_goal: effective,
                day_credits,
                full_justified,
                status: classify(row.total_ms, base_goal, effective, day_credits, full_justified),
            });
        }

        Ok(out)
    }

    /// Live ranking: rows evaluated against the current checkpoint.
    pub fn ranking(
        conn: &Connection,
        scope: &str,
        policy: &GoalPolicy,
        roles: &dyn RoleResolver,
    ) -> AppResult<(Vec<RankedRow>, i64)> {
        let weekly = Self::compute_rows(conn, scope)?;
        let ranked = Self::evaluate(conn, scope, &weekly, policy, roles)?;
        Ok((ranked, weekly.since_ts))
    }
}

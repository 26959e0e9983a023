//! Checkpoint moves and their one-level undo.
//!
//! Both operations run in an immediate transaction, so two resets of the same
//! scope are serialized and never read the same previous checkpoint.

use crate::core::calculator::goal::GoalPolicy;
use crate::core::identity::RoleResolver;
use crate::core::notify::{NotificationSink, notify};
use crate::core::weekly::WeeklyLogic;
use crate::db::meta::{clear_reset_backup, last_reset_ts, reset_backup, set_last_reset_ts, set_reset_backup};
use crate::db::pool::DbPool;
use crate::db::reports::insert_report_rows;
use crate::errors::{AppError, AppResult};
use crate::models::checkpoint::{ResetBackup, ResetOutcome};
use crate::models::notification::Notification;
use rusqlite::TransactionBehavior;
use tracing::info;

pub struct ResetLogic;

impl ResetLogic {
    /// Snapshot the ranking, store it, then start a new period at `now`.
    /// The previous checkpoint goes into the undo slot, replacing any older one.
    pub fn reset(
        pool: &mut DbPool,
        scope: &str,
        now: i64,
        actor: &str,
        policy: &GoalPolicy,
        roles: &dyn RoleResolver,
        sink: &dyn NotificationSink,
    ) -> AppResult<ResetOutcome> {
        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let weekly = WeeklyLogic::compute_rows(&tx, scope)?;
        let report = WeeklyLogic::evaluate(&tx, scope, &weekly, policy, roles)?;
        let previous_ts = weekly.since_ts;

        insert_report_rows(&tx, scope, previous_ts, &report, now)?;
        set_reset_backup(&tx, scope, previous_ts, actor, now)?;
        set_last_reset_ts(&tx, scope, now)?;
        tx.commit()?;

        info!(scope, actor, previous_ts, new_ts = now, rows = report.len(), "period reset");
        notify(
            sink,
            Notification::ResetPerformed {
                scope: scope.to_string(),
                actor: actor.to_string(),
                previous_ts,
                new_ts: now,
                rows: report.len(),
            },
        );

        Ok(ResetOutcome {
            previous_ts,
            new_ts: now,
            report,
        })
    }

    /// Restore the checkpoint saved by the last reset and empty the slot.
    /// Fails with `NoBackup` when the slot holds no earlier checkpoint.
    pub fn undo(
        pool: &mut DbPool,
        scope: &str,
        actor: &str,
        sink: &dyn NotificationSink,
    ) -> AppResult<i64> {
        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let backup = reset_backup(&tx, scope)?;
        if !backup.is_restorable() {
            return Err(AppError::NoBackup(scope.to_string()));
        }

        set_last_reset_ts(&tx, scope, backup.prev_ts)?;
        clear_reset_backup(&tx, scope)?;
        tx.commit()?;

        info!(scope, actor, restored_ts = backup.prev_ts, "reset undone");
        notify(
            sink,
            Notification::ResetUndone {
                scope: scope.to_string(),
                actor: actor.to_string(),
                restored_ts: backup.prev_ts,
            },
        );

        Ok(backup.prev_ts)
    }

    pub fn checkpoint(pool: &DbPool, scope: &str) -> AppResult<i64> {
        last_reset_ts(&pool.conn, scope)
    }

    pub fn backup(pool: &DbPool, scope: &str) -> AppResult<ResetBackup> {
        reset_backup(&pool.conn, scope)
    }
}

//! Per-period justifications: the "fully excused" flag and day credits.
//!
//! Every call works on an explicit `period_start`, normally the scope's
//! current checkpoint (see [`JustifyLogic::current_period`]).

use crate::core::notify::{NotificationSink, notify};
use crate::db::justifications::{
    delete_justification_full, get_day_credits, get_justification_full, upsert_day_credits,
    upsert_justification_full,
};
use crate::db::meta::last_reset_ts;
use crate::db::pool::DbPool;
use crate::db::users::{find_user, get_or_create_user};
use crate::errors::{AppError, AppResult};
use crate::models::justification::{AddDaysOutcome, ClearAllOutcome, RemoveDaysOutcome};
use crate::models::notification::Notification;
use rusqlite::TransactionBehavior;
use tracing::debug;

pub const MAX_GRANT_DAYS: i64 = 7;

/// Grants accept `0..=7`; 0 is a valid no-op request.
pub fn validate_grant_days(days: i64) -> AppResult<()> {
    if (0..=MAX_GRANT_DAYS).contains(&days) {
        Ok(())
    } else {
        Err(AppError::InvalidDays(format!(
            "days must be between 0 and {MAX_GRANT_DAYS} (got {days})"
        )))
    }
}

pub fn validate_removal_days(days: i64) -> AppResult<()> {
    if days >= 1 {
        Ok(())
    } else {
        Err(AppError::InvalidDays(format!(
            "days to remove must be at least 1 (got {days})"
        )))
    }
}

pub struct JustifyLogic;

impl JustifyLogic {
    pub fn current_period(pool: &DbPool, scope: &str) -> AppResult<i64> {
        last_reset_ts(&pool.conn, scope)
    }

    /// `(full flag, day credits)` for a user; unknown users have neither.
    pub fn credits(pool: &DbPool, user: &str, scope: &str, period_start: i64) -> AppResult<(bool, i64)> {
        let Some(u) = find_user(&pool.conn, user, scope)? else {
            return Ok((false, 0));
        };
        let full = get_justification_full(&pool.conn, u.id, scope, period_start)?.is_some();
        let days = get_day_credits(&pool.conn, u.id, scope, period_start)?;
        Ok((full, days))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn mark_full(
        pool: &mut DbPool,
        user: &str,
        scope: &str,
        period_start: i64,
        reason: Option<&str>,
        actor: &str,
        now: i64,
        sink: &dyn NotificationSink,
    ) -> AppResult<()> {
        let tx = pool.conn.transaction()?;
        let u = get_or_create_user(&tx, user, scope)?;
        upsert_justification_full(&tx, u.id, scope, period_start, reason, actor, now)?;
        tx.commit()?;

        debug!(user, scope, period_start, "full justification set");
        notify(
            sink,
            Notification::JustificationGranted {
                scope: scope.to_string(),
                actor: actor.to_string(),
                target: user.to_string(),
                period_start,
                days: None,
                reason: reason.map(str::to_string),
            },
        );
        Ok(())
    }

    /// Remove the full flag, leaving day credits alone. Returns false when
    /// there was none; nothing is notified in that case.
    pub fn clear_full(
        pool: &mut DbPool,
        user: &str,
        scope: &str,
        period_start: i64,
        reason: Option<&str>,
        actor: &str,
        sink: &dyn NotificationSink,
    ) -> AppResult<bool> {
        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let Some(u) = find_user(&tx, user, scope)? else {
            return Ok(false);
        };
        if !delete_justification_full(&tx, u.id, scope, period_start)? {
            return Ok(false);
        }
        let remaining_days = get_day_credits(&tx, u.id, scope, period_start)?;
        tx.commit()?;

        debug!(user, scope, period_start, "full justification cleared");
        notify(
            sink,
            Notification::JustificationRevoked {
                scope: scope.to_string(),
                actor: actor.to_string(),
                target: user.to_string(),
                period_start,
                days_removed: Some(0),
                remaining_days,
                reason: reason.map(str::to_string),
            },
        );
        Ok(true)
    }

    /// Add up to `requested` day credits, clamped to `cap`.
    ///
    /// Saturation is not an error: the outcome reports the increment actually
    /// applied, 0 meaning nothing changed. Range checks on `requested` are
    /// the caller's job ([`validate_grant_days`]).
    #[allow(clippy::too_many_arguments)]
    pub fn add_days(
        pool: &mut DbPool,
        user: &str,
        scope: &str,
        period_start: i64,
        requested: i64,
        cap: i64,
        reason: Option<&str>,
        actor: &str,
        now: i64,
        sink: &dyn NotificationSink,
    ) -> AppResult<AddDaysOutcome> {
        let cap = cap.max(0);
        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let u = get_or_create_user(&tx, user, scope)?;
        let previous = get_day_credits(&tx, u.id, scope, period_start)?;
        let applied = (cap.min(previous.saturating_add(requested.max(0))) - previous).max(0);

        let outcome = AddDaysOutcome {
            previous,
            applied,
            new_total: previous + applied,
            cap,
        };
        if outcome.is_noop() {
            return Ok(outcome);
        }

        upsert_day_credits(&tx, u.id, scope, period_start, outcome.new_total, reason, actor, now)?;
        tx.commit()?;

        debug!(user, scope, period_start, applied, new_total = outcome.new_total, "day credits granted");
        notify(
            sink,
            Notification::JustificationGranted {
                scope: scope.to_string(),
                actor: actor.to_string(),
                target: user.to_string(),
                period_start,
                days: Some(applied),
                reason: reason.map(str::to_string),
            },
        );
        Ok(outcome)
    }

    /// Remove up to `requested` day credits, never going below zero.
    #[allow(clippy::too_many_arguments)]
    pub fn remove_days(
        pool: &mut DbPool,
        user: &str,
        scope: &str,
        period_start: i64,
        requested: i64,
        reason: Option<&str>,
        actor: &str,
        now: i64,
        sink: &dyn NotificationSink,
    ) -> AppResult<RemoveDaysOutcome> {
        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let Some(u) = find_user(&tx, user, scope)? else {
            return Ok(RemoveDaysOutcome {
                previous: 0,
                removed: 0,
                new_total: 0,
            });
        };

        let previous = get_day_credits(&tx, u.id, scope, period_start)?;
        let removed = previous.min(requested.max(0));
        let outcome = RemoveDaysOutcome {
            previous,
            removed,
            new_total: previous - removed,
        };
        if removed == 0 {
            return Ok(outcome);
        }

        upsert_day_credits(&tx, u.id, scope, period_start, outcome.new_total, reason, actor, now)?;
        tx.commit()?;

        debug!(user, scope, period_start, removed, "day credits removed");
        notify(
            sink,
            Notification::JustificationRevoked {
                scope: scope.to_string(),
                actor: actor.to_string(),
                target: user.to_string(),
                period_start,
                days_removed: Some(removed),
                remaining_days: outcome.new_total,
                reason: reason.map(str::to_string),
            },
        );
        Ok(outcome)
    }

    /// Clear the full flag and zero the day credits in one transaction.
    #[allow(clippy::too_many_arguments)]
    pub fn clear_all(
        pool: &mut DbPool,
        user: &str,
        scope: &str,
        period_start: i64,
        reason: Option<&str>,
        actor: &str,
        now: i64,
        sink: &dyn NotificationSink,
    ) -> AppResult<ClearAllOutcome> {
        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let Some(u) = find_user(&tx, user, scope)? else {
            return Ok(ClearAllOutcome {
                had_full: false,
                previous_days: 0,
            });
        };

        let previous_days = get_day_credits(&tx, u.id, scope, period_start)?;
        let had_full = delete_justification_full(&tx, u.id, scope, period_start)?;
        let outcome = ClearAllOutcome {
            had_full,
            previous_days,
        };
        if outcome.is_noop() {
            return Ok(outcome);
        }

        if previous_days > 0 {
            upsert_day_credits(&tx, u.id, scope, period_start, 0, reason, actor, now)?;
        }
        tx.commit()?;

        debug!(user, scope, period_start, had_full, previous_days, "justifications cleared");
        notify(
            sink,
            Notification::JustificationRevoked {
                scope: scope.to_string(),
                actor: actor.to_string(),
                target: user.to_string(),
                period_start,
                days_removed: None,
                remaining_days: 0,
                reason: reason.map(str::to_string),
            },
        );
        Ok(outcome)
    }
}

use crate::core::notify::{NotificationSink, notify};
use crate::db::adjustments::insert_adjustment;
use crate::db::pool::DbPool;
use crate::db::users::get_or_create_user;
use crate::errors::{AppError, AppResult};
use crate::models::adjustment::{AdjustDirection, Adjustment};
use crate::models::notification::Notification;
use crate::utils::time::parts_to_ms;
use tracing::debug;

/// Turn non-negative hour/minute inputs into a signed delta.
/// `minutes` must stay below 60 and the delta must not be zero.
pub fn delta_from_parts(hours: i64, minutes: i64, direction: AdjustDirection) -> AppResult<i64> {
    if hours < 0 {
        return Err(AppError::InvalidDuration(format!(
            "hours must be >= 0 (got {hours})"
        )));
    }
    if !(0..60).contains(&minutes) {
        return Err(AppError::InvalidDuration(format!(
            "minutes must be between 0 and 59 (got {minutes})"
        )));
    }
    let magnitude = parts_to_ms(hours, minutes).ok_or_else(|| {
        AppError::InvalidDuration(format!("{hours}h {minutes}min is too large"))
    })?;
    if magnitude == 0 {
        return Err(AppError::InvalidDuration(
            "the adjustment must be at least one minute".into(),
        ));
    }
    Ok(direction.sign() * magnitude)
}

/// Append-only ledger of manual time corrections.
pub struct AdjustLogic;

impl AdjustLogic {
    /// Append an adjustment. The ledger accepts any signed delta; sign and
    /// magnitude policy belongs to the caller (see [`delta_from_parts`]).
    #[allow(clippy::too_many_arguments)]
    pub fn record(
        pool: &mut DbPool,
        user: &str,
        scope: &str,
        delta_ms: i64,
        reason: Option<&str>,
        actor: &str,
        now: i64,
        sink: &dyn NotificationSink,
    ) -> AppResult<Adjustment> {
        let tx = pool.conn.transaction()?;
        let u = get_or_create_user(&tx, user, scope)?;
        let adj = insert_adjustment(&tx, u.id, scope, delta_ms, reason, actor, now)?;
        tx.commit()?;

        debug!(user, scope, delta_ms, actor, "adjustment recorded");
        notify(
            sink,
            Notification::Adjustment {
                scope: scope.to_string(),
                actor: actor.to_string(),
                target: user.to_string(),
                delta_ms,
                reason: adj.reason.clone(),
                created_ts: now,
            },
        );

        Ok(adj)
    }
}

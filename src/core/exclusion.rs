use crate::db::exclusions::{delete_exclusion, list_exclusions, upsert_exclusion};
use crate::db::pool::DbPool;
use crate::db::users::{find_user, get_or_create_user};
use crate::errors::AppResult;
use tracing::debug;

/// Hide users from rankings and reports. Their sessions and adjustments are
/// untouched, so including them again restores their totals.
pub struct ExclusionLogic;

impl ExclusionLogic {
    pub fn exclude(pool: &mut DbPool, scope: &str, user: &str, actor: &str, now: i64) -> AppResult<()> {
        let tx = pool.conn.transaction()?;
        let u = get_or_create_user(&tx, user, scope)?;
        upsert_exclusion(&tx, scope, u.id, actor, now)?;
        tx.commit()?;

        debug!(scope, user, actor, "user excluded from ranking");
        Ok(())
    }

    /// Returns false when the user was not excluded.
    pub fn include(pool: &mut DbPool, scope: &str, user: &str) -> AppResult<bool> {
        let Some(u) = find_user(&pool.conn, user, scope)? else {
            return Ok(false);
        };
        let removed = delete_exclusion(&pool.conn, scope, u.id)?;
        debug!(scope, user, removed, "user included in ranking");
        Ok(removed)
    }

    pub fn list(pool: &DbPool, scope: &str) -> AppResult<Vec<String>> {
        list_exclusions(&pool.conn, scope)
    }
}

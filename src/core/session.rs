use crate::core::notify::{NotificationSink, notify};
use crate::db::pool::DbPool;
use crate::db::sessions::{close_session, find_open_session, get_session, insert_session, list_open_sessions};
use crate::db::users::{find_user, get_or_create_user, get_user_by_id};
use crate::errors::{AppError, AppResult};
use crate::models::notification::Notification;
use crate::models::session::{ClosedSession, OpenSession, Session};
use rusqlite::{ErrorCode, TransactionBehavior};
use tracing::debug;

/// Most open sessions offered to a moderator at once.
pub const OPEN_LIST_LIMIT: usize = 25;

fn is_constraint_violation(e: &AppError) -> bool {
    matches!(
        e,
        AppError::Db(rusqlite::Error::SqliteFailure(err, _)) if err.code == ErrorCode::ConstraintViolation
    )
}

/// Clock-in / clock-out and moderator closure of work sessions.
///
/// At most one open session exists per (user, scope): the existence check and
/// the insert run in one immediate transaction, and the store carries a
/// unique index on open sessions as a second line of defence.
pub struct SessionLogic;

impl SessionLogic {
    pub fn clock_in(
        pool: &mut DbPool,
        user: &str,
        scope: &str,
        now: i64,
        sink: &dyn NotificationSink,
    ) -> AppResult<Session> {
        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let u = get_or_create_user(&tx, user, scope)?;
        if find_open_session(&tx, u.id, scope)?.is_some() {
            return Err(AppError::AlreadyOpen(user.to_string()));
        }

        let id = insert_session(&tx, u.id, scope, now).map_err(|e| {
            if is_constraint_violation(&e) {
                AppError::AlreadyOpen(user.to_string())
            } else {
                e
            }
        })?;
        tx.commit()?;

        debug!(user, scope, session_id = id, "session opened");
        notify(
            sink,
            Notification::Entry {
                scope: scope.to_string(),
                user: user.to_string(),
                start_ts: now,
            },
        );

        Ok(Session {
            id,
            user_id: u.id,
            scope: scope.to_string(),
            start_ts: now,
            end_ts: None,
        })
    }

    /// Close the caller's open session and return the elapsed time.
    pub fn clock_out(
        pool: &mut DbPool,
        user: &str,
        scope: &str,
        now: i64,
        sink: &dyn NotificationSink,
    ) -> AppResult<ClosedSession> {
        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let open = match find_user(&tx, user, scope)? {
            Some(u) => find_open_session(&tx, u.id, scope)?,
            None => None,
        }
        .ok_or_else(|| AppError::NoOpenSession(user.to_string()))?;

        // A clock running backwards must not produce a negative session.
        let end_ts = now.max(open.start_ts);
        if !close_session(&tx, open.id, scope, end_ts)? {
            return Err(AppError::NoOpenSession(user.to_string()));
        }
        tx.commit()?;

        let closed = ClosedSession {
            session_id: open.id,
            start_ts: open.start_ts,
            end_ts,
            elapsed_ms: end_ts - open.start_ts,
        };

        debug!(user, scope, session_id = open.id, elapsed_ms = closed.elapsed_ms, "session closed");
        notify(
            sink,
            Notification::Exit {
                scope: scope.to_string(),
                user: user.to_string(),
                start_ts: closed.start_ts,
                end_ts: closed.end_ts,
                elapsed_ms: closed.elapsed_ms,
                closed_by: None,
            },
        );

        Ok(closed)
    }

    /// Administrative closure of a specific session by id.
    pub fn force_close(
        pool: &mut DbPool,
        session_id: i64,
        scope: &str,
        now: i64,
        actor: &str,
        sink: &dyn NotificationSink,
    ) -> AppResult<(ClosedSession, String)> {
        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let session = get_session(&tx, session_id)?
            .filter(|s| s.is_open() && s.scope == scope)
            .ok_or(AppError::NotFoundOrAlreadyClosed(session_id))?;

        let end_ts = now.max(session.start_ts);
        if !close_session(&tx, session.id, scope, end_ts)? {
            return Err(AppError::NotFoundOrAlreadyClosed(session_id));
        }

        let owner = get_user_by_id(&tx, session.user_id)?
            .map(|u| u.external_id)
            .unwrap_or_else(|| session.user_id.to_string());
        tx.commit()?;

        let closed = ClosedSession {
            session_id: session.id,
            start_ts: session.start_ts,
            end_ts,
            elapsed_ms: end_ts - session.start_ts,
        };

        debug!(actor, scope, session_id, owner = %owner, "session force-closed");
        notify(
            sink,
            Notification::Exit {
                scope: scope.to_string(),
                user: owner.clone(),
                start_ts: closed.start_ts,
                end_ts: closed.end_ts,
                elapsed_ms: closed.elapsed_ms,
                closed_by: Some(actor.to_string()),
            },
        );

        Ok((closed, owner))
    }

    /// All open sessions of `scope`, oldest first.
    pub fn list_open(pool: &DbPool, scope: &str) -> AppResult<Vec<OpenSession>> {
        list_open_sessions(&pool.conn, scope, None)
    }

    /// The oldest [`OPEN_LIST_LIMIT`] open sessions, for moderator choices.
    pub fn list_open_for_closing(pool: &DbPool, scope: &str) -> AppResult<Vec<OpenSession>> {
        list_open_sessions(&pool.conn, scope, Some(OPEN_LIST_LIMIT))
    }
}

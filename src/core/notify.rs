//! Best-effort delivery of ledger notifications.
//!
//! Sinks are called only after the state change is committed. A failing
//! sink is logged and otherwise ignored: it never rolls back or blocks the
//! operation that produced the notification.

use crate::db::log::ttlog;
use crate::errors::{AppError, AppResult};
use crate::models::notification::Notification;
use rusqlite::Connection;
use std::cell::RefCell;
use tracing::{info, warn};

pub trait NotificationSink {
    fn deliver(&self, notification: &Notification) -> AppResult<()>;
}

/// Hand `notification` to `sink`, swallowing (and logging) any failure.
pub fn notify(sink: &dyn NotificationSink, notification: Notification) {
    if let Err(e) = sink.deliver(&notification) {
        warn!(
            target: "rpunchcard::core::notify",
            kind = notification.kind(),
            scope = notification.scope(),
            error = %e,
            "notification not delivered"
        );
    }
}

/// Writes notifications into the internal `log` table.
///
/// Uses its own connection so that delivery happens outside the ledger
/// connection's transactions.
pub struct AuditLogSink {
    conn: Connection,
}

impl AuditLogSink {
    pub fn open(db_path: &str) -> AppResult<Self> {
        Ok(Self {
            conn: Connection::open(db_path)?,
        })
    }
}

impl NotificationSink for AuditLogSink {
    fn deliver(&self, notification: &Notification) -> AppResult<()> {
        let message = serde_json::to_string(notification)
            .map_err(|e| AppError::Notify(format!("serialization failed: {e}")))?;

        ttlog(&self.conn, notification.kind(), notification.scope(), &message)?;

        info!(
            target: "rpunchcard::core::notify",
            kind = notification.kind(),
            scope = notification.scope(),
            "notification delivered"
        );
        Ok(())
    }
}

/// Keeps notifications in memory; handy for embedding and tests.
#[derive(Default)]
pub struct MemorySink {
    delivered: RefCell<Vec<Notification>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.delivered.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.delivered.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.delivered.borrow().is_empty()
    }
}

impl NotificationSink for MemorySink {
    fn deliver(&self, notification: &Notification) -> AppResult<()> {
        self.delivered.borrow_mut().push(notification.clone());
        Ok(())
    }
}

use serde::Serialize;

/// Structured events handed to the notification sink after a state change
/// has been committed.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Notification {
    Entry {
        scope: String,
        user: String,
        start_ts: i64,
    },
    Exit {
        scope: String,
        user: String,
        start_ts: i64,
        end_ts: i64,
        elapsed_ms: i64,
        /// Set when a moderator closed someone else's session.
        closed_by: Option<String>,
    },
    Adjustment {
        scope: String,
        actor: String,
        target: String,
        delta_ms: i64,
        reason: Option<String>,
        created_ts: i64,
    },
    JustificationGranted {
        scope: String,
        actor: String,
        target: String,
        period_start: i64,
        /// None for a full-period justification.
        days: Option<i64>,
        reason: Option<String>,
    },
    JustificationRevoked {
        scope: String,
        actor: String,
        target: String,
        period_start: i64,
        /// None when everything (flag and days) was cleared, Some(0) when
        /// only the full flag was.
        days_removed: Option<i64>,
        remaining_days: i64,
        reason: Option<String>,
    },
    ResetPerformed {
        scope: String,
        actor: String,
        previous_ts: i64,
        new_ts: i64,
        rows: usize,
    },
    ResetUndone {
        scope: String,
        actor: String,
        restored_ts: i64,
    },
}

impl Notification {
    pub fn kind(&self) -> &'static str {
        match self {
            Notification::Entry { .. } => "entry",
            Notification::Exit { .. } => "exit",
            Notification::Adjustment { .. } => "adjustment",
            Notification::JustificationGranted { .. } => "justification_granted",
            Notification::JustificationRevoked { .. } => "justification_revoked",
            Notification::ResetPerformed { .. } => "reset_performed",
            Notification::ResetUndone { .. } => "reset_undone",
        }
    }

    pub fn scope(&self) -> &str {
        match self {
            Notification::Entry { scope, .. }
            | Notification::Exit { scope, .. }
            | Notification::Adjustment { scope, .. }
            | Notification::JustificationGranted { scope, .. }
            | Notification::JustificationRevoked { scope, .. }
            | Notification::ResetPerformed { scope, .. }
            | Notification::ResetUndone { scope, .. } => scope,
        }
    }
}

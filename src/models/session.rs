use serde::Serialize;

/// A clock-in/clock-out work session. `end_ts == None` means still open.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Session {
    pub id: i64,
    pub user_id: i64,
    pub scope: String,
    pub start_ts: i64,
    pub end_ts: Option<i64>,
}

impl Session {
    pub fn is_open(&self) -> bool {
        self.end_ts.is_none()
    }
}

/// An open session joined with the owner's external id, as shown to moderators.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OpenSession {
    pub session_id: i64,
    pub user_id: i64,
    pub external_id: String,
    pub start_ts: i64,
}

/// Result of closing a session (clock-out or forced closure).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClosedSession {
    pub session_id: i64,
    pub start_ts: i64,
    pub end_ts: i64,
    pub elapsed_ms: i64,
}

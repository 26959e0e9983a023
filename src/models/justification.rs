use serde::Serialize;

/// "Fully excused for this period" flag, keyed by (user, scope, period_start).
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FullJustification {
    pub user_id: i64,
    pub scope: String,
    pub period_start: i64,
    pub reason: Option<String>,
    pub created_by: String,
    pub created_ts: i64,
}

/// Outcome of granting justified days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddDaysOutcome {
    pub previous: i64,
    /// Increment actually applied after the cap clamp; 0 means no-op.
    pub applied: i64,
    pub new_total: i64,
    pub cap: i64,
}

impl AddDaysOutcome {
    pub fn is_noop(&self) -> bool {
        self.applied == 0
    }
}

/// Outcome of removing justified days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveDaysOutcome {
    pub previous: i64,
    pub removed: i64,
    pub new_total: i64,
}

/// What "remove everything" found before clearing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearAllOutcome {
    pub had_full: bool,
    pub previous_days: i64,
}

impl ClearAllOutcome {
    pub fn is_noop(&self) -> bool {
        !self.had_full && self.previous_days == 0
    }
}

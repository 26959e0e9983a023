use serde::Serialize;

/// Immutable signed correction of a user's tracked time.
/// Positive `delta_ms` credits time, negative debits it.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Adjustment {
    pub id: i64,
    pub user_id: i64,
    pub scope: String,
    pub delta_ms: i64,
    pub reason: Option<String>,
    pub created_by: String,
    pub created_ts: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustDirection {
    Add,
    Remove,
}

impl AdjustDirection {
    pub fn sign(self) -> i64 {
        match self {
            AdjustDirection::Add => 1,
            AdjustDirection::Remove => -1,
        }
    }

    pub fn default_reason(self) -> &'static str {
        match self {
            AdjustDirection::Add => "Manual adjustment (add)",
            AdjustDirection::Remove => "Manual adjustment (remove)",
        }
    }
}

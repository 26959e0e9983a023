use serde::Serialize;

/// Per-user total for the current accounting period.
/// `total_ms` is signed: debits may exceed tracked time.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WeeklyRow {
    pub user_id: i64,
    pub external_id: String,
    pub total_ms: i64,
}

/// Ordered rows plus the checkpoint they were computed against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyRows {
    pub rows: Vec<WeeklyRow>,
    /// 0 means "never reset", i.e. all-time.
    pub since_ts: i64,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    GoalMet,
    Justified,
    /// "in progress" in the live ranking, "not met" in a reset report.
    Pending,
}

/// Where a status is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusView {
    Live,
    Report,
}

impl GoalStatus {
    pub fn label(self, view: StatusView) -> &'static str {
        match (self, view) {
            (GoalStatus::GoalMet, _) => "goal met",
            (GoalStatus::Justified, _) => "justified",
            (GoalStatus::Pending, StatusView::Live) => "in progress",
            (GoalStatus::Pending, StatusView::Report) => "not met",
        }
    }

    pub fn to_db_str(self) -> &'static str {
        match self {
            GoalStatus::GoalMet => "goal_met",
            GoalStatus::Justified => "justified",
            GoalStatus::Pending => "pending",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "goal_met" => Some(GoalStatus::GoalMet),
            "justified" => Some(GoalStatus::Justified),
            "pending" => Some(GoalStatus::Pending),
            _ => None,
        }
    }
}

/// A weekly row evaluated against the user's goals and justifications.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RankedRow {
    pub position: usize,
    pub user_id: i64,
    pub external_id: String,
    pub display_name: String,
    pub total_ms: i64,
    pub base_goal: f64,
    pub effective_goal: f64,
    pub day_credits: i64,
    pub full_justified: bool,
    pub status: GoalStatus,
}

/// A row of a stored reset report.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReportEntry {
    pub period_start: i64,
    pub created_ts: i64,
    pub external_id: String,
    pub display_name: String,
    pub total_ms: i64,
    pub status: GoalStatus,
    pub base_goal: f64,
    pub effective_goal: f64,
}

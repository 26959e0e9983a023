/// One-level undo slot saved by each reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetBackup {
    pub prev_ts: i64,
    pub by: Option<String>,
    pub saved_at: i64,
}

impl ResetBackup {
    /// A backup only counts when it points at a real earlier checkpoint.
    pub fn is_restorable(&self) -> bool {
        self.prev_ts > 0
    }
}

/// What a reset did: where counting stood before and where it starts now.
#[derive(Debug, Clone, PartialEq)]
pub struct ResetOutcome {
    pub previous_ts: i64,
    pub new_ts: i64,
    pub report: Vec<super::weekly::RankedRow>,
}

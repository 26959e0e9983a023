use crate::models::weekly::GoalStatus;
use crate::utils::time::hours_float;

/// Classify a weekly total. First matching rule wins:
/// goal met, then justified, then pending.
pub fn classify(
    total_ms: i64,
    base_goal: f64,
    effective_goal: f64,
    day_credits: i64,
    full_justified: bool,
) -> GoalStatus {
    let hours = hours_float(total_ms);

    if hours >= base_goal {
        GoalStatus::GoalMet
    } else if full_justified || (day_credits > 0 && hours >= effective_goal) {
        GoalStatus::Justified
    } else {
        GoalStatus::Pending
    }
}

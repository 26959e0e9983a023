/// ANSI color helper utilities for terminal output.
use crate::models::weekly::GoalStatus;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Paint a status label: green when met, yellow when justified, red otherwise.
pub fn colorize_status(label: &str, status: GoalStatus) -> String {
    let color = match status {
        GoalStatus::GoalMet => GREEN,
        GoalStatus::Justified => YELLOW,
        GoalStatus::Pending => RED,
    };
    format!("{color}{label}{RESET}")
}

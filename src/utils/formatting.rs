//! Formatting utilities used for CLI and report outputs.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

pub fn pad_right(s: &str, width: usize) -> String {
    format!("{:<width$}", s, width = width)
}

/// 10-cell progress bar towards `goal_hours`.
/// Goals below a quarter hour count as 0.25h so an empty goal never divides by zero.
pub fn progress_bar(hours: f64, goal_hours: f64) -> String {
    let filled = ((hours / goal_hours.max(0.25)) * 10.0).floor();
    let filled = filled.clamp(0.0, 10.0) as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled))
}

/// Goal hours as `7h`, `3h30` etc.
pub fn format_goal(hours: f64) -> String {
    let total_minutes = (hours * 60.0).round() as i64;
    let (h, m) = (total_minutes / 60, total_minutes % 60);
    if m == 0 {
        format!("{}h", h)
    } else {
        format!("{}h{:02}", h, m)
    }
}

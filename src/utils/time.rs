//! Time utilities: epoch-millisecond clock, duration splitting and formatting.

use chrono::{DateTime, Local, TimeZone, Utc};

pub const MS_PER_MINUTE: i64 = 60_000;
pub const MS_PER_HOUR: i64 = 3_600_000;

pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Real-valued hours, floored at zero. Only used for goal comparisons,
/// never truncated before comparing.
pub fn hours_float(ms: i64) -> f64 {
    (ms as f64 / MS_PER_HOUR as f64).max(0.0)
}

/// Whole hours and remaining minutes for display.
/// Truncates toward zero and clamps negative totals to 0h 0min.
pub fn split_hm(ms: i64) -> (i64, i64) {
    if ms <= 0 {
        return (0, 0);
    }
    (ms / MS_PER_HOUR, (ms / MS_PER_MINUTE) % 60)
}

/// `Xh Ymin`
pub fn format_hm(ms: i64) -> String {
    let (h, m) = split_hm(ms);
    format!("{}h {}min", h, m)
}

/// `None` when the result does not fit in an `i64`.
pub fn parts_to_ms(hours: i64, minutes: i64) -> Option<i64> {
    hours
        .checked_mul(MS_PER_HOUR)?
        .checked_add(minutes.checked_mul(MS_PER_MINUTE)?)
}

fn local(ms: i64) -> Option<DateTime<Local>> {
    Local.timestamp_millis_opt(ms).single()
}

/// `dd/mm/YYYY HH:MM` in local time.
pub fn fmt_datetime(ms: i64) -> String {
    local(ms)
        .map(|dt| dt.format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_else(|| ms.to_string())
}

/// `HH:MM:SS` in local time.
pub fn fmt_time(ms: i64) -> String {
    local(ms)
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| ms.to_string())
}

//! Text rendering of rankings, reset reports and moderator lists.

use crate::db::pool::DbPool;
use crate::db::reports::list_report_rows;
use crate::errors::AppResult;
use crate::models::checkpoint::ResetOutcome;
use crate::models::session::OpenSession;
use crate::models::weekly::{RankedRow, ReportEntry, StatusView};
use crate::utils::colors::{GREY, RESET, colorize_status};
use crate::utils::formatting::{bold, format_goal, progress_bar};
use crate::utils::table::Table;
use crate::utils::time::{fmt_datetime, format_hm, hours_float};

pub const EMPTY_REPORT: &str = "Nobody logged hours this period.";

fn since_label(since_ts: i64) -> String {
    if since_ts > 0 {
        format!("since {}", fmt_datetime(since_ts))
    } else {
        "all time".to_string()
    }
}

/// Live weekly ranking with a progress bar towards each effective goal.
pub fn render_ranking(rows: &[RankedRow], since_ts: i64) -> String {
    if rows.is_empty() {
        return if since_ts > 0 {
            format!("Nobody logged hours since the last reset ({}).\n", fmt_datetime(since_ts))
        } else {
            "No hours logged yet.\n".to_string()
        };
    }

    let mut out = format!("{} ({})\n\n", bold("Weekly goals"), since_label(since_ts));
    for r in rows {
        let status = r.status.label(StatusView::Live);
        out.push_str(&format!(
            "{}. {}\n   {} {} / {} • {}\n",
            r.position,
            bold(&r.display_name),
            progress_bar(hours_float(r.total_ms), r.effective_goal),
            format_hm(r.total_ms),
            format_goal(r.effective_goal),
            colorize_status(status, r.status),
        ));
    }
    out
}

/// Numbered report lines, at most `limit`, plus an overflow line.
pub fn render_report_lines(rows: &[RankedRow], limit: usize) -> String {
    if rows.is_empty() {
        return format!("{EMPTY_REPORT}\n");
    }

    let mut out = String::new();
    for r in rows.iter().take(limit) {
        out.push_str(&format!(
            "{}. {} · {} • {}\n",
            r.position,
            r.display_name,
            format_hm(r.total_ms),
            colorize_status(r.status.label(StatusView::Report), r.status),
        ));
    }
    if rows.len() > limit {
        out.push_str(&format!("… and {} more member(s).\n", rows.len() - limit));
    }
    out
}

pub fn render_reset_outcome(outcome: &ResetOutcome, limit: usize) -> String {
    format!(
        "Report for the period {} to {}:\n\n{}",
        if outcome.previous_ts > 0 {
            fmt_datetime(outcome.previous_ts)
        } else {
            "the beginning".to_string()
        },
        fmt_datetime(outcome.new_ts),
        render_report_lines(&outcome.report, limit)
    )
}

/// Open sessions as a table, oldest first, with the time elapsed so far.
pub fn render_open_sessions(sessions: &[OpenSession], now: i64) -> String {
    if sessions.is_empty() {
        return "No open sessions.\n".to_string();
    }

    let mut table = Table::new(vec!["ID", "USER", "SINCE", "ELAPSED"]);
    for s in sessions {
        table.add_row(vec![
            s.session_id.to_string(),
            s.external_id.clone(),
            fmt_datetime(s.start_ts),
            format_hm(now - s.start_ts),
        ]);
    }
    table.render()
}

/// Stored reset reports, grouped per reset, newest first.
pub fn render_history(entries: &[ReportEntry]) -> String {
    if entries.is_empty() {
        return "No reset reports stored yet.\n".to_string();
    }

    let mut out = String::new();
    let mut current: Option<i64> = None;
    let mut pos = 0;

    for e in entries {
        if current != Some(e.created_ts) {
            if current.is_some() {
                out.push('\n');
            }
            current = Some(e.created_ts);
            pos = 0;
            let from = if e.period_start > 0 {
                fmt_datetime(e.period_start)
            } else {
                "the beginning".to_string()
            };
            out.push_str(&format!(
                "{}\n",
                bold(&format!("Reset of {} (period from {})", fmt_datetime(e.created_ts), from))
            ));
        }
        pos += 1;
        out.push_str(&format!(
            "{}. {} · {} {GREY}(goal {}){RESET} • {}\n",
            pos,
            e.display_name,
            format_hm(e.total_ms),
            format_goal(e.effective_goal),
            colorize_status(e.status.label(StatusView::Report), e.status),
        ));
    }
    out
}

pub fn history(pool: &DbPool, scope: &str, limit: usize) -> AppResult<Vec<ReportEntry>> {
    list_report_rows(&pool.conn, scope, limit)
}

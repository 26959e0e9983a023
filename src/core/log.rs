use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use ansi_term::Colour;
use regex::Regex;

const OP_TARGET_WIDTH: usize = 48;

/// Colour of an audit operation: session events green/red, administrative
/// changes yellow, checkpoint moves purple, maintenance blue.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "entry" => Colour::Green,
        "exit" => Colour::Red,
        "adjustment" | "justification_granted" | "justification_revoked" => Colour::Yellow,
        "reset_performed" | "reset_undone" | "migration_applied" => Colour::Purple,
        "backup" | "export" | "vacuum" => Colour::Blue,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

pub struct LogLogic;

impl LogLogic {
    /// Audit entries, oldest first; `operation` filters on an exact match.
    pub fn entries(pool: &DbPool, operation: Option<&str>) -> AppResult<Vec<LogEntry>> {
        let mut stmt = pool.conn.prepare_cached(
            "SELECT id, date, operation, target, message FROM log
             WHERE ?1 IS NULL OR operation = ?1
             ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([operation], |row| {
            let raw_date: String = row.get("date")?;
            let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
                .map(|dt| dt.format("%F %T").to_string())
                .unwrap_or(raw_date);

            Ok(LogEntry {
                id: row.get("id")?,
                date,
                operation: row.get("operation")?,
                target: row.get::<_, Option<String>>("target")?.unwrap_or_default(),
                message: row.get("message")?,
            })
        })?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    pub fn print_log(pool: &DbPool, operation: Option<&str>) -> AppResult<()> {
        let entries = Self::entries(pool, operation)?;
        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let ansi = Regex::new(r"\x1B\[[0-9;]*[mK]").map_err(|e| AppError::Other(e.to_string()))?;
        let visible_len = |s: &str| ansi.replace_all(s, "").chars().count();

        let id_w = entries.iter().map(|e| e.id.to_string().len()).max().unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);

        println!("📜 Internal log:\n");

        for e in &entries {
            let color = color_for_operation(&e.operation);

            let mut target = e.target.clone();
            let budget = OP_TARGET_WIDTH.saturating_sub(e.operation.chars().count() + 3);
            if target.chars().count() > budget {
                target = target.chars().take(budget.saturating_sub(3)).collect::<String>() + "...";
            }

            let op_target = if target.is_empty() {
                color.paint(e.operation.as_str()).to_string()
            } else {
                format!("{} ({})", color.paint(e.operation.as_str()), target)
            };
            let padding = " ".repeat(OP_TARGET_WIDTH.saturating_sub(visible_len(&op_target)));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                e.id,
                e.date,
                op_target,
                padding,
                e.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}

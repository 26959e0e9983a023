mod common;
use common::{HOUR, MINUTE, SCOPE, StaticRoles, memory_pool};
use rpunchcard::config::GoalsConfig;
use rpunchcard::core::adjust::AdjustLogic;
use rpunchcard::core::calculator::goal::GoalPolicy;
use rpunchcard::core::justify::JustifyLogic;
use rpunchcard::core::notify::MemorySink;
use rpunchcard::core::report::history;
use rpunchcard::core::reset::ResetLogic;
use rpunchcard::core::session::SessionLogic;
use rpunchcard::core::weekly::WeeklyLogic;
use rpunchcard::db::pool::DbPool;
use rpunchcard::errors::AppError;
use rpunchcard::models::notification::Notification;
use rpunchcard::models::weekly::GoalStatus;

fn work(pool: &mut DbPool, user: &str, start: i64, minutes: i64) {
    let sink = MemorySink::new();
    SessionLogic::clock_in(pool, user, SCOPE, start, &sink).unwrap();
    SessionLogic::clock_out(pool, user, SCOPE, start + minutes * MINUTE, &sink).unwrap();
}

fn reset(pool: &mut DbPool, now: i64, sink: &MemorySink) -> rpunchcard::models::checkpoint::ResetOutcome {
    let policy = GoalPolicy::from_config(&GoalsConfig::default());
    ResetLogic::reset(pool, SCOPE, now, "owner", &policy, &StaticRoles::default(), sink).unwrap()
}

#[test]
fn test_reset_reports_then_zeroes_totals() {
    let mut pool = memory_pool();
    let sink = MemorySink::new();

    work(&mut pool, "alice", 1_000, 8 * 60);
    work(&mut pool, "bob", 1_000, 60);

    let out = reset(&mut pool, 100 * HOUR, &sink);
    assert_eq!(out.previous_ts, 0);
    assert_eq!(out.new_ts, 100 * HOUR);
    assert_eq!(out.report.len(), 2);
    assert_eq!(out.report[0].external_id, "alice");
    assert_eq!(out.report[0].status, GoalStatus::GoalMet);
    assert_eq!(out.report[1].status, GoalStatus::Pending);

    let weekly = WeeklyLogic::compute_rows(&pool.conn, SCOPE).unwrap();
    assert_eq!(weekly.since_ts, 100 * HOUR);
    assert!(weekly.rows.iter().all(|r| r.total_ms == 0));

    match sink.take().pop().unwrap() {
        Notification::ResetPerformed { rows, new_ts, .. } => {
            assert_eq!(rows, 2);
            assert_eq!(new_ts, 100 * HOUR);
        }
        other => panic!("unexpected notification {other:?}"),
    }
}

#[test]
fn test_reset_stores_history() {
    let mut pool = memory_pool();
    let sink = MemorySink::new();

    work(&mut pool, "alice", 1_000, 30);
    reset(&mut pool, 10 * HOUR, &sink);
    work(&mut pool, "bob", 11 * HOUR, 45);
    reset(&mut pool, 20 * HOUR, &sink);

    let rows = history(&pool, SCOPE, 10).unwrap();
    assert_eq!(rows.len(), 2);
    // Newest reset first.
    assert_eq!(rows[0].external_id, "bob");
    assert_eq!(rows[0].period_start, 10 * HOUR);
    assert_eq!(rows[1].external_id, "alice");
    assert_eq!(rows[1].period_start, 0);
}

#[test]
fn test_undo_restores_previous_checkpoint_once() {
    let mut pool = memory_pool();
    let sink = MemorySink::new();

    reset(&mut pool, 10 * HOUR, &sink);
    reset(&mut pool, 20 * HOUR, &sink);
    assert_eq!(ResetLogic::checkpoint(&pool, SCOPE).unwrap(), 20 * HOUR);

    let restored = ResetLogic::undo(&mut pool, SCOPE, "owner", &sink).unwrap();
    assert_eq!(restored, 10 * HOUR);
    assert_eq!(ResetLogic::checkpoint(&pool, SCOPE).unwrap(), 10 * HOUR);

    let err = ResetLogic::undo(&mut pool, SCOPE, "owner", &sink).unwrap_err();
    assert!(matches!(err, AppError::NoBackup(_)));
    assert_eq!(ResetLogic::checkpoint(&pool, SCOPE).unwrap(), 10 * HOUR);
}

#[test]
fn test_undo_without_earlier_checkpoint_fails() {
    let mut pool = memory_pool();
    let sink = MemorySink::new();

    let err = ResetLogic::undo(&mut pool, SCOPE, "owner", &sink).unwrap_err();
    assert!(matches!(err, AppError::NoBackup(_)));

    // The very first reset saves checkpoint 0, which cannot be restored.
    reset(&mut pool, 10 * HOUR, &sink);
    assert!(!ResetLogic::backup(&pool, SCOPE).unwrap().is_restorable());
    assert!(ResetLogic::undo(&mut pool, SCOPE, "owner", &sink).is_err());
}

#[test]
fn test_second_reset_overwrites_backup() {
    let mut pool = memory_pool();
    let sink = MemorySink::new();

    reset(&mut pool, 10 * HOUR, &sink);
    reset(&mut pool, 20 * HOUR, &sink);
    reset(&mut pool, 30 * HOUR, &sink);

    let backup = ResetLogic::backup(&pool, SCOPE).unwrap();
    assert_eq!(backup.prev_ts, 20 * HOUR);
    assert_eq!(backup.by.as_deref(), Some("owner"));
    assert_eq!(backup.saved_at, 30 * HOUR);
}

#[test]
fn test_undo_brings_back_totals() {
    let mut pool = memory_pool();
    let sink = MemorySink::new();

    reset(&mut pool, 10 * HOUR, &sink);
    work(&mut pool, "alice", 11 * HOUR, 90);
    AdjustLogic::record(&mut pool, "alice", SCOPE, 30 * MINUTE, None, "owner", 12 * HOUR, &sink).unwrap();
    reset(&mut pool, 20 * HOUR, &sink);

    assert!(WeeklyLogic::compute_rows(&pool.conn, SCOPE)
        .unwrap()
        .rows
        .iter()
        .all(|r| r.total_ms == 0));

    ResetLogic::undo(&mut pool, SCOPE, "owner", &sink).unwrap();
    let weekly = WeeklyLogic::compute_rows(&pool.conn, SCOPE).unwrap();
    assert_eq!(weekly.rows[0].total_ms, 2 * HOUR);
}

#[test]
fn test_justifications_follow_the_period() {
    let mut pool = memory_pool();
    let sink = MemorySink::new();
    let policy = GoalPolicy::from_config(&GoalsConfig::default());
    let roles = StaticRoles::default();

    work(&mut pool, "alice", 1_000, 60);
    let period = JustifyLogic::current_period(&pool, SCOPE).unwrap();
    JustifyLogic::mark_full(&mut pool, "alice", SCOPE, period, Some("holiday"), "owner", 2_000, &sink).unwrap();

    let out = reset(&mut pool, 10 * HOUR, &sink);
    assert_eq!(out.report[0].status, GoalStatus::Justified);

    // The flag belonged to the closed period.
    work(&mut pool, "alice", 11 * HOUR, 60);
    let (rows, _) = WeeklyLogic::ranking(&pool.conn, SCOPE, &policy, &roles).unwrap();
    assert!(!rows[0].full_justified);
    assert_eq!(rows[0].status, GoalStatus::Pending);
}

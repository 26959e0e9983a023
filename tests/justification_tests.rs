mod common;
use common::{SCOPE, StaticRoles, memory_pool};
use rpunchcard::config::GoalsConfig;
use rpunchcard::core::calculator::goal::{GoalPolicy, day_cap, effective_goal};
use rpunchcard::core::justify::{JustifyLogic, validate_grant_days, validate_removal_days};
use rpunchcard::core::notify::MemorySink;
use rpunchcard::errors::AppError;
use rpunchcard::models::notification::Notification;

#[test]
fn test_goal_tiers_first_match_wins() {
    let policy = GoalPolicy::from_config(&GoalsConfig::default());
    let roles = StaticRoles::default()
        .with("manager", "boss")
        .with("auxiliary", "boss")
        .with("auxiliary", "helper");

    assert_eq!(policy.base_goal(&roles, "boss", SCOPE), 3.5);
    assert_eq!(policy.base_goal(&roles, "helper", SCOPE), 4.0);
    assert_eq!(policy.base_goal(&roles, "alice", SCOPE), 7.0);
}

#[test]
fn test_day_cap_truncates_fractional_goals() {
    assert_eq!(day_cap(7.0), 7);
    assert_eq!(day_cap(4.0), 4);
    assert_eq!(day_cap(3.5), 3);
}

#[test]
fn test_effective_goal_bounds() {
    for base in [3.5, 4.0, 7.0] {
        assert_eq!(effective_goal(base, 0), base);
        for days in 0..=10 {
            let eff = effective_goal(base, days);
            assert!(eff <= base);
            assert!(eff >= 0.0);
        }
    }
    assert_eq!(effective_goal(7.0, 2), 5.0);
    assert_eq!(effective_goal(3.5, 3), 0.5);
    assert_eq!(effective_goal(3.5, 7), 0.0);
}

#[test]
fn test_add_days_is_clamped_to_cap() {
    let mut pool = memory_pool();
    let sink = MemorySink::new();

    let out = JustifyLogic::add_days(&mut pool, "alice", SCOPE, 0, 5, 7, None, "owner", 1, &sink).unwrap();
    assert_eq!((out.previous, out.applied, out.new_total), (0, 5, 5));

    let out = JustifyLogic::add_days(&mut pool, "alice", SCOPE, 0, 5, 7, None, "owner", 2, &sink).unwrap();
    assert_eq!((out.previous, out.applied, out.new_total), (5, 2, 7));

    let out = JustifyLogic::add_days(&mut pool, "alice", SCOPE, 0, 3, 7, None, "owner", 3, &sink).unwrap();
    assert!(out.is_noop());
    assert_eq!(out.new_total, 7);

    // Only effective grants are notified.
    assert_eq!(sink.len(), 2);
}

#[test]
fn test_add_zero_days_is_a_noop() {
    let mut pool = memory_pool();
    let sink = MemorySink::new();

    let out = JustifyLogic::add_days(&mut pool, "alice", SCOPE, 0, 0, 7, None, "owner", 1, &sink).unwrap();
    assert!(out.is_noop());
    assert!(sink.is_empty());
    assert_eq!(JustifyLogic::credits(&pool, "alice", SCOPE, 0).unwrap(), (false, 0));
}

#[test]
fn test_add_days_is_monotonic() {
    let mut pool = memory_pool();
    let sink = MemorySink::new();
    let mut last = 0;

    for requested in [1, 0, 2, 7, 3] {
        let out =
            JustifyLogic::add_days(&mut pool, "bob", SCOPE, 0, requested, 3, None, "owner", 1, &sink).unwrap();
        assert_eq!(out.new_total, 3.min(last + requested));
        assert!(out.new_total >= last);
        last = out.new_total;
    }
}

#[test]
fn test_remove_then_add_round_trip() {
    let mut pool = memory_pool();
    let sink = MemorySink::new();

    JustifyLogic::add_days(&mut pool, "alice", SCOPE, 0, 4, 7, None, "owner", 1, &sink).unwrap();

    let rm = JustifyLogic::remove_days(&mut pool, "alice", SCOPE, 0, 3, None, "owner", 2, &sink).unwrap();
    assert_eq!((rm.previous, rm.removed, rm.new_total), (4, 3, 1));

    let add = JustifyLogic::add_days(&mut pool, "alice", SCOPE, 0, 3, 7, None, "owner", 3, &sink).unwrap();
    assert_eq!(add.new_total, 4);
}

#[test]
fn test_remove_days_never_goes_negative() {
    let mut pool = memory_pool();
    let sink = MemorySink::new();

    JustifyLogic::add_days(&mut pool, "alice", SCOPE, 0, 2, 7, None, "owner", 1, &sink).unwrap();
    let rm = JustifyLogic::remove_days(&mut pool, "alice", SCOPE, 0, 5, None, "owner", 2, &sink).unwrap();
    assert_eq!((rm.previous, rm.removed, rm.new_total), (2, 2, 0));

    let rm = JustifyLogic::remove_days(&mut pool, "ghost", SCOPE, 0, 1, None, "owner", 3, &sink).unwrap();
    assert_eq!(rm.removed, 0);
}

#[test]
fn test_credits_are_per_period() {
    let mut pool = memory_pool();
    let sink = MemorySink::new();

    JustifyLogic::add_days(&mut pool, "alice", SCOPE, 100, 2, 7, None, "owner", 1, &sink).unwrap();
    JustifyLogic::mark_full(&mut pool, "alice", SCOPE, 100, Some("sick"), "owner", 1, &sink).unwrap();

    assert_eq!(JustifyLogic::credits(&pool, "alice", SCOPE, 100).unwrap(), (true, 2));
    assert_eq!(JustifyLogic::credits(&pool, "alice", SCOPE, 200).unwrap(), (false, 0));
}

#[test]
fn test_clear_full_and_clear_all() {
    let mut pool = memory_pool();
    let sink = MemorySink::new();

    JustifyLogic::mark_full(&mut pool, "alice", SCOPE, 0, Some("travel"), "owner", 1, &sink).unwrap();
    assert!(JustifyLogic::clear_full(&mut pool, "alice", SCOPE, 0, None, "owner", &sink).unwrap());
    assert!(!JustifyLogic::clear_full(&mut pool, "alice", SCOPE, 0, None, "owner", &sink).unwrap());
    sink.take();

    JustifyLogic::mark_full(&mut pool, "alice", SCOPE, 0, None, "owner", 2, &sink).unwrap();
    JustifyLogic::add_days(&mut pool, "alice", SCOPE, 0, 3, 7, None, "owner", 3, &sink).unwrap();

    let out = JustifyLogic::clear_all(&mut pool, "alice", SCOPE, 0, None, "owner", 4, &sink).unwrap();
    assert!(out.had_full);
    assert_eq!(out.previous_days, 3);
    assert_eq!(JustifyLogic::credits(&pool, "alice", SCOPE, 0).unwrap(), (false, 0));

    let again = JustifyLogic::clear_all(&mut pool, "alice", SCOPE, 0, None, "owner", 5, &sink).unwrap();
    assert!(again.is_noop());
}

#[test]
fn test_clear_full_notifies_only_when_a_flag_was_removed() {
    let mut pool = memory_pool();
    let sink = MemorySink::new();

    assert!(!JustifyLogic::clear_full(&mut pool, "alice", SCOPE, 0, None, "owner", &sink).unwrap());
    assert!(sink.is_empty());

    JustifyLogic::mark_full(&mut pool, "alice", SCOPE, 0, None, "owner", 1, &sink).unwrap();
    JustifyLogic::add_days(&mut pool, "alice", SCOPE, 0, 2, 7, None, "owner", 2, &sink).unwrap();
    sink.take();

    assert!(JustifyLogic::clear_full(&mut pool, "alice", SCOPE, 0, Some("back early"), "owner", &sink).unwrap());
    let sent = sink.take();
    assert_eq!(sent.len(), 1);
    match &sent[0] {
        Notification::JustificationRevoked {
            target,
            days_removed,
            remaining_days,
            reason,
            ..
        } => {
            assert_eq!(target, "alice");
            assert_eq!(*days_removed, Some(0));
            assert_eq!(*remaining_days, 2);
            assert_eq!(reason.as_deref(), Some("back early"));
        }
        other => panic!("unexpected notification: {other:?}"),
    }
    assert_eq!(JustifyLogic::credits(&pool, "alice", SCOPE, 0).unwrap(), (false, 2));
}

#[test]
fn test_day_request_validation() {
    assert!(validate_grant_days(0).is_ok());
    assert!(validate_grant_days(7).is_ok());
    assert!(matches!(validate_grant_days(8), Err(AppError::InvalidDays(_))));
    assert!(matches!(validate_grant_days(-1), Err(AppError::InvalidDays(_))));

    assert!(validate_removal_days(1).is_ok());
    assert!(matches!(validate_removal_days(0), Err(AppError::InvalidDays(_))));
}

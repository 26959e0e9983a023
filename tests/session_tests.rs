mod common;
use common::{HOUR, MINUTE, SCOPE, memory_pool};
use rpunchcard::core::notify::{MemorySink, NotificationSink};
use rpunchcard::core::session::SessionLogic;
use rpunchcard::db::sessions::count_open_sessions;
use rpunchcard::db::users::find_user;
use rpunchcard::errors::{AppError, AppResult};
use rpunchcard::models::notification::Notification;

struct FailingSink;

impl NotificationSink for FailingSink {
    fn deliver(&self, _notification: &Notification) -> AppResult<()> {
        Err(AppError::Notify("channel unavailable".into()))
    }
}

#[test]
fn test_clock_in_then_out_returns_elapsed() {
    let mut pool = memory_pool();
    let sink = MemorySink::new();
    let t0 = 1_700_000_000_000;

    let s = SessionLogic::clock_in(&mut pool, "alice", SCOPE, t0, &sink).unwrap();
    assert!(s.is_open());

    let closed = SessionLogic::clock_out(&mut pool, "alice", SCOPE, t0 + 90 * MINUTE, &sink).unwrap();
    assert_eq!(closed.elapsed_ms, HOUR + 30 * MINUTE);
    assert_eq!(closed.session_id, s.id);

    let events = sink.take();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].kind(), "entry");
    assert_eq!(events[1].kind(), "exit");
}

#[test]
fn test_second_clock_in_is_rejected() {
    let mut pool = memory_pool();
    let sink = MemorySink::new();

    SessionLogic::clock_in(&mut pool, "alice", SCOPE, 1_000, &sink).unwrap();
    let err = SessionLogic::clock_in(&mut pool, "alice", SCOPE, 2_000, &sink).unwrap_err();
    assert!(matches!(err, AppError::AlreadyOpen(ref u) if u == "alice"));

    let user = find_user(&pool.conn, "alice", SCOPE).unwrap().unwrap();
    assert_eq!(count_open_sessions(&pool.conn, user.id, SCOPE).unwrap(), 1);
    assert_eq!(sink.len(), 1);
}

#[test]
fn test_store_rejects_a_second_open_session() {
    let pool = memory_pool();
    pool.conn
        .execute("INSERT INTO users (external_id, scope_id) VALUES ('bob', 'default')", [])
        .unwrap();
    pool.conn
        .execute("INSERT INTO sessions (user_id, scope_id, start_ts) VALUES (1, 'default', 10)", [])
        .unwrap();

    let dup = pool
        .conn
        .execute("INSERT INTO sessions (user_id, scope_id, start_ts) VALUES (1, 'default', 20)", []);
    assert!(dup.is_err());
}

#[test]
fn test_same_user_may_be_open_in_two_scopes() {
    let mut pool = memory_pool();
    let sink = MemorySink::new();

    SessionLogic::clock_in(&mut pool, "alice", "team-a", 1_000, &sink).unwrap();
    SessionLogic::clock_in(&mut pool, "alice", "team-b", 1_000, &sink).unwrap();

    assert_eq!(SessionLogic::list_open(&pool, "team-a").unwrap().len(), 1);
    assert_eq!(SessionLogic::list_open(&pool, "team-b").unwrap().len(), 1);
}

#[test]
fn test_clock_out_without_session_fails() {
    let mut pool = memory_pool();
    let sink = MemorySink::new();

    let err = SessionLogic::clock_out(&mut pool, "ghost", SCOPE, 5_000, &sink).unwrap_err();
    assert!(matches!(err, AppError::NoOpenSession(_)));

    SessionLogic::clock_in(&mut pool, "alice", SCOPE, 1_000, &sink).unwrap();
    SessionLogic::clock_out(&mut pool, "alice", SCOPE, 2_000, &sink).unwrap();
    let err = SessionLogic::clock_out(&mut pool, "alice", SCOPE, 3_000, &sink).unwrap_err();
    assert!(matches!(err, AppError::NoOpenSession(_)));
}

#[test]
fn test_clock_out_before_start_is_never_negative() {
    let mut pool = memory_pool();
    let sink = MemorySink::new();

    SessionLogic::clock_in(&mut pool, "alice", SCOPE, 10_000, &sink).unwrap();
    let closed = SessionLogic::clock_out(&mut pool, "alice", SCOPE, 5_000, &sink).unwrap();
    assert_eq!(closed.elapsed_ms, 0);
}

#[test]
fn test_list_open_is_oldest_first() {
    let mut pool = memory_pool();
    let sink = MemorySink::new();

    SessionLogic::clock_in(&mut pool, "carol", SCOPE, 3_000, &sink).unwrap();
    SessionLogic::clock_in(&mut pool, "alice", SCOPE, 1_000, &sink).unwrap();
    SessionLogic::clock_in(&mut pool, "bob", SCOPE, 2_000, &sink).unwrap();

    let open = SessionLogic::list_open(&pool, SCOPE).unwrap();
    let users: Vec<&str> = open.iter().map(|s| s.external_id.as_str()).collect();
    assert_eq!(users, vec!["alice", "bob", "carol"]);
}

#[test]
fn test_list_open_for_closing_is_capped() {
    let mut pool = memory_pool();
    let sink = MemorySink::new();

    for i in 0..30 {
        SessionLogic::clock_in(&mut pool, &format!("user{i:02}"), SCOPE, 1_000 + i, &sink).unwrap();
    }

    let capped = SessionLogic::list_open_for_closing(&pool, SCOPE).unwrap();
    assert_eq!(capped.len(), 25);
    assert_eq!(capped[0].external_id, "user00");
    assert_eq!(SessionLogic::list_open(&pool, SCOPE).unwrap().len(), 30);
}

#[test]
fn test_force_close_checks_scope_and_state() {
    let mut pool = memory_pool();
    let sink = MemorySink::new();

    let s = SessionLogic::clock_in(&mut pool, "alice", SCOPE, 1_000, &sink).unwrap();

    let err = SessionLogic::force_close(&mut pool, s.id, "other", 5_000, "mod1", &sink).unwrap_err();
    assert!(matches!(err, AppError::NotFoundOrAlreadyClosed(id) if id == s.id));

    let err = SessionLogic::force_close(&mut pool, 999, SCOPE, 5_000, "mod1", &sink).unwrap_err();
    assert!(matches!(err, AppError::NotFoundOrAlreadyClosed(999)));

    let (closed, owner) = SessionLogic::force_close(&mut pool, s.id, SCOPE, 5_000, "mod1", &sink).unwrap();
    assert_eq!(owner, "alice");
    assert_eq!(closed.elapsed_ms, 4_000);

    let err = SessionLogic::force_close(&mut pool, s.id, SCOPE, 6_000, "mod1", &sink).unwrap_err();
    assert!(matches!(err, AppError::NotFoundOrAlreadyClosed(_)));

    let exit = sink.take().pop().unwrap();
    match exit {
        Notification::Exit { closed_by, user, .. } => {
            assert_eq!(closed_by.as_deref(), Some("mod1"));
            assert_eq!(user, "alice");
        }
        other => panic!("unexpected notification {other:?}"),
    }
}

#[test]
fn test_failing_sink_does_not_undo_the_session() {
    let mut pool = memory_pool();

    SessionLogic::clock_in(&mut pool, "alice", SCOPE, 1_000, &FailingSink).unwrap();
    assert_eq!(SessionLogic::list_open(&pool, SCOPE).unwrap().len(), 1);

    let closed = SessionLogic::clock_out(&mut pool, "alice", SCOPE, 61_000, &FailingSink).unwrap();
    assert_eq!(closed.elapsed_ms, MINUTE);
}

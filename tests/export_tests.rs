use predicates::str::contains;
use std::fs;

mod common;
use common::{as_actor, init_env, rpc, temp_out};

#[test]
fn test_export_csv_ranking() {
    let (db, cfg) = init_env("export_csv");
    let out = temp_out("export_csv", "csv");

    as_actor(&db, &cfg, "owner")
        .args(["adjust", "add", "--user", "alice", "--hours", "8"])
        .assert()
        .success();
    as_actor(&db, &cfg, "owner")
        .args(["adjust", "add", "--user", "bob", "--hours", "1", "--minutes", "15"])
        .assert()
        .success();

    rpc()
        .args(["--db", &db, "--config-file", &cfg, "export", "--format", "csv", "--file", &out])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let content = fs::read_to_string(&out).expect("read csv");
    let mut lines = content.lines();
    assert_eq!(
        lines.next().unwrap(),
        "position,user,name,total_ms,total,hours,base_goal,effective_goal,justified_days,full_justified,status,period_start"
    );
    let first = lines.next().unwrap();
    assert!(first.starts_with("1,alice,Alice,28800000,8h 0min,8.00,7,7,0,false,goal met,"));
    let second = lines.next().unwrap();
    assert!(second.starts_with("2,bob,bob,4500000,1h 15min,1.25,"));
    assert!(second.contains("in progress"));
}

#[test]
fn test_export_json_ranking() {
    let (db, cfg) = init_env("export_json");
    let out = temp_out("export_json", "json");

    as_actor(&db, &cfg, "owner")
        .args(["justify", "--user", "helper", "--reason", "training"])
        .assert()
        .success();
    as_actor(&db, &cfg, "owner")
        .args(["adjust", "add", "--user", "helper", "--hours", "1"])
        .assert()
        .success();

    rpc()
        .args(["--db", &db, "--config-file", &cfg, "export", "--format", "json", "--file", &out])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read json");
    let v: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let rows = v.as_array().expect("array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["user"], "helper");
    assert_eq!(rows[0]["base_goal"], 4.0);
    assert_eq!(rows[0]["full_justified"], true);
    assert_eq!(rows[0]["status"], "justified");
}

#[test]
fn test_export_refuses_to_overwrite_without_force() {
    let (db, cfg) = init_env("export_overwrite");
    let out = temp_out("export_overwrite", "csv");
    fs::write(&out, "keep me").unwrap();

    rpc()
        .args(["--db", &db, "--config-file", &cfg, "export", "--file", &out])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("not overwritten"));
    assert_eq!(fs::read_to_string(&out).unwrap(), "keep me");

    rpc()
        .args(["--db", &db, "--config-file", &cfg, "export", "--file", &out, "--force"])
        .assert()
        .success()
        .stdout(contains("only the header"));
    assert!(fs::read_to_string(&out).unwrap().starts_with("position,"));
}

#[test]
fn test_backup_compressed() {
    let (db, cfg) = init_env("backup_zip");
    let out = temp_out("backup_zip", "sqlite");
    let zip = out.replace(".sqlite", ".zip");
    fs::remove_file(&zip).ok();

    rpc()
        .args(["--db", &db, "--config-file", &cfg, "backup", "--file", &out, "--compress"])
        .assert()
        .success()
        .stdout(contains("Backup created"));

    assert!(std::path::Path::new(&zip).exists());
    assert!(!std::path::Path::new(&out).exists());
}

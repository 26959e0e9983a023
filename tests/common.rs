#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rpunchcard::core::identity::RoleResolver;
use rpunchcard::db::initialize::init_db;
use rpunchcard::db::pool::DbPool;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;

pub const SCOPE: &str = "default";
pub const HOUR: i64 = 3_600_000;
pub const MINUTE: i64 = 60_000;

pub fn rpc() -> Command {
    cargo_bin_cmd!("rpunchcard")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rpunchcard.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Write a configuration file with `owner` as owner, `mod1` as extra admin
/// and `boss` holding the manager role, `helper` the auxiliary one.
pub fn write_test_config(name: &str, db_path: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rpunchcard.conf", name));
    let yaml = format!(
        r#"database: "{db}"
default_scope: default
owner_id: owner
extra_admin_ids:
  - mod1
roles:
  manager:
    - boss
  auxiliary:
    - helper
display_names:
  alice: Alice
"#,
        db = db_path.replace('\\', "\\\\")
    );
    fs::write(&path, yaml).expect("write config");
    path.to_string_lossy().to_string()
}

/// Init a fresh DB with its own config; returns (db_path, config_path).
pub fn init_env(name: &str) -> (String, String) {
    let db_path = setup_test_db(name);
    let cfg_path = write_test_config(name, &db_path);

    rpc()
        .args(["--db", &db_path, "--config-file", &cfg_path, "--test", "init"])
        .assert()
        .success();

    (db_path, cfg_path)
}

/// Run the binary against a test environment as `actor`.
pub fn as_actor(db_path: &str, cfg_path: &str, actor: &str) -> Command {
    let mut cmd = rpc();
    cmd.args(["--db", db_path, "--config-file", cfg_path, "--actor", actor]);
    cmd
}

/// In-memory ledger with the schema in place.
pub fn memory_pool() -> DbPool {
    let pool = DbPool::in_memory().expect("open in-memory db");
    init_db(&pool.conn).expect("init schema");
    pool
}

/// Fixed role table for library tests.
#[derive(Default)]
pub struct StaticRoles {
    pub roles: HashMap<String, Vec<String>>,
}

impl StaticRoles {
    pub fn with(mut self, role: &str, user: &str) -> Self {
        self.roles
            .entry(role.to_string())
            .or_default()
            .push(user.to_string());
        self
    }
}

impl RoleResolver for StaticRoles {
    fn has_role(&self, user: &str, _scope: &str, role: &str) -> bool {
        self.roles
            .get(role)
            .is_some_and(|members| members.iter().any(|m| m == user))
    }

    fn display_name(&self, user: &str, _scope: &str) -> String {
        user.to_string()
    }
}

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub mod migrate; // use submodule at src/config/migrate.rs

pub const DEFAULT_SCOPE: &str = "default";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_scope")]
    pub default_scope: String,
    /// Only this actor may adjust hours, justify, reset and undo.
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub extra_admin_ids: Vec<String>,
    /// Holders of this role may moderate sessions and exclusions.
    #[serde(default = "default_moderator_role")]
    pub moderator_role: String,
    #[serde(default)]
    pub goals: GoalsConfig,
    /// role name -> member external ids
    #[serde(default)]
    pub roles: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub display_names: BTreeMap<String, String>,
    #[serde(default = "default_report_limit")]
    pub report_limit: usize,
    #[serde(default = "default_name_cache_ttl")]
    pub name_cache_ttl_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalsConfig {
    #[serde(default = "default_goal_hours")]
    pub default_hours: f64,
    /// Evaluated top-down, first role held by the user wins.
    #[serde(default = "default_goal_tiers")]
    pub tiers: Vec<GoalTierConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoalTierConfig {
    pub role: String,
    pub hours: f64,
}

fn default_scope() -> String {
    DEFAULT_SCOPE.to_string()
}
fn default_moderator_role() -> String {
    "manager".to_string()
}
fn default_report_limit() -> usize {
    30
}
fn default_name_cache_ttl() -> u64 {
    300
}
fn default_goal_hours() -> f64 {
    7.0
}
fn default_goal_tiers() -> Vec<GoalTierConfig> {
    vec![
        GoalTierConfig {
            role: "manager".to_string(),
            hours: 3.5,
        },
        GoalTierConfig {
            role: "auxiliary".to_string(),
            hours: 4.0,
        },
    ]
}

impl Default for GoalsConfig {
    fn default() -> Self {
        Self {
            default_hours: default_goal_hours(),
            tiers: default_goal_tiers(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file().to_string_lossy().to_string())
    }
}

impl Config {
    pub fn with_database(database: String) -> Self {
        Self {
            database,
            default_scope: default_scope(),
            owner_id: None,
            extra_admin_ids: Vec::new(),
            moderator_role: default_moderator_role(),
            goals: GoalsConfig::default(),
            roles: BTreeMap::new(),
            display_names: BTreeMap::new(),
            report_limit: default_report_limit(),
            name_cache_ttl_secs: default_name_cache_ttl(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rpunchcard")
        } else {
            let home = dirs::home_dir()
                .or_else(|| env::var("HOME").ok().map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from("."));
            home.join(".rpunchcard")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rpunchcard.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rpunchcard.sqlite")
    }

    /// Load configuration from `path`, or return defaults if the file is missing
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if path.exists() {
            let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
            Self::from_yaml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        serde_yaml::from_str(content).map_err(|e| AppError::Config(e.to_string()))
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Initialize configuration and database files.
    ///
    /// Writes `self` to `config_path` unless a file is already there (or in
    /// test mode), creates the database directory and returns the database path.
    pub fn init_all(&self, config_path: &Path, is_test: bool) -> AppResult<PathBuf> {
        if !is_test && !config_path.exists() {
            if let Some(dir) = config_path.parent() {
                fs::create_dir_all(dir)?;
            }
            let yaml = self.to_yaml()?;
            let mut file = fs::File::create(config_path).map_err(|_| AppError::ConfigSave)?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {}", config_path.display());
        }

        let db_path = PathBuf::from(&self.database);
        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| {
                io::Error::new(e.kind(), format!("cannot create {}: {e}", parent.display()))
            })?;
        }

        Ok(db_path)
    }
}

use super::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Top-level keys of a fresh configuration, with their default values.
fn default_mapping(database: &str) -> AppResult<Mapping> {
    let defaults = Config::with_database(database.to_string());
    let value = serde_yaml::to_value(&defaults).map_err(|e| AppError::Config(e.to_string()))?;

    match value {
        Value::Mapping(m) => Ok(m),
        _ => Err(AppError::Config(
            "default configuration is not a mapping".into(),
        )),
    }
}

fn parse_mapping(content: &str) -> AppResult<Mapping> {
    match serde_yaml::from_str::<Value>(content) {
        Ok(Value::Mapping(m)) => Ok(m),
        Ok(Value::Null) => Ok(Mapping::new()),
        Ok(_) => Err(AppError::Config(
            "configuration root must be a mapping".into(),
        )),
        Err(e) => Err(AppError::Config(e.to_string())),
    }
}

fn database_of(map: &Mapping) -> String {
    map.get(Value::String("database".into()))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| Config::database_file().to_string_lossy().to_string())
}

/// List the top-level keys a configuration document is missing.
pub fn missing_keys(content: &str) -> AppResult<Vec<String>> {
    let current = parse_mapping(content)?;
    let defaults = default_mapping(&database_of(&current))?;

    Ok(defaults
        .keys()
        .filter(|k| !current.contains_key(*k))
        .filter_map(|k| k.as_str().map(str::to_string))
        .collect())
}

/// Add every missing top-level key with its default value.
/// Existing values are never touched.
///
/// Returns the updated YAML and the list of keys that were added.
pub fn fill_missing_keys(content: &str) -> AppResult<(String, Vec<String>)> {
    let mut current = parse_mapping(content)?;
    let defaults = default_mapping(&database_of(&current))?;

    let mut added = Vec::new();
    for (k, v) in defaults {
        if !current.contains_key(&k) {
            if let Some(name) = k.as_str() {
                added.push(name.to_string());
            }
            current.insert(k, v);
        }
    }

    let yaml = serde_yaml::to_string(&Value::Mapping(current))
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok((yaml, added))
}

/// Rewrite the configuration file at `path` with missing keys filled in.
pub fn migrate_config_file(path: &Path) -> AppResult<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    let (yaml, added) = fill_missing_keys(&content)?;

    if added.is_empty() {
        info("Configuration already up to date.");
        return Ok(added);
    }

    fs::write(path, yaml).map_err(|_| AppError::ConfigSave)?;
    success(format!(
        "Configuration migrated: added {}",
        added.join(", ")
    ));

    Ok(added)
}

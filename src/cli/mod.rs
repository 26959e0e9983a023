pub mod commands;
pub mod parser;

use crate::errors::{AppError, AppResult};
use std::path::PathBuf;

/// Per-invocation settings resolved from the global flags.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub scope: String,
    pub actor: Option<String>,
    pub config_path: PathBuf,
    pub test: bool,
}

impl RunContext {
    /// The acting user; commands that change the ledger require one.
    pub fn actor(&self) -> AppResult<&str> {
        self.actor
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .ok_or(AppError::MissingActor)
    }
}

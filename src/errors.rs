//! Error type shared by the ledger, its storage and the CLI.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // IO
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // Database-related
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // Ledger invariants
    #[error("User {0} already has an open session")]
    AlreadyOpen(String),

    #[error("User {0} has no open session to close")]
    NoOpenSession(String),

    #[error("Session {0} does not exist, is already closed or belongs to another scope")]
    NotFoundOrAlreadyClosed(i64),

    #[error("There is no previous reset to undo in scope '{0}'")]
    NoBackup(String),

    // Input validation
    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid day count: {0}")]
    InvalidDays(String),

    // Permissions
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("No owner_id configured: restricted actions are disabled")]
    OwnerNotConfigured,

    #[error("Missing --actor: this command needs to know who is acting")]
    MissingActor,

    // Config errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // Export / notification errors
    #[error("Export error: {0}")]
    Export(String),

    #[error("Notification delivery failed: {0}")]
    Notify(String),

    // Generic fallback
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;

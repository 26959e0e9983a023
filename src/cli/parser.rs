use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rPunchcard.
/// Clock-in/clock-out ledger with weekly goals, backed by SQLite.
#[derive(Parser)]
#[command(
    name = "rpunchcard",
    version = env!("CARGO_PKG_VERSION"),
    about = "Clock in and out, track weekly goals and justifications, reset and report, using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Use this configuration file instead of the default one
    #[arg(global = true, long = "config-file", value_name = "FILE")]
    pub config_file: Option<String>,

    /// Scope (team, server, tenant) to operate on; defaults to `default_scope`
    #[arg(global = true, long = "scope")]
    pub scope: Option<String>,

    /// Identifier of the person running the command
    #[arg(global = true, long = "actor")]
    pub actor: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Inspect or upgrade the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields with their default values")]
        migrate: bool,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        #[arg(long = "operation", help = "Only rows of this operation (entry, exit, reset_performed, ...)")]
        operation: Option<String>,
    },

    /// Backup the database file
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },

    /// Clock in (open a session for --actor)
    In,

    /// Clock out (close the open session of --actor)
    Out,

    /// List who is at work right now, oldest session first
    Active {
        #[arg(long, help = "Moderators: only the oldest 25 sessions, as offered for force-out")]
        closing: bool,
    },

    /// Close someone else's open session (moderators)
    ForceOut {
        /// Session id as shown by `active`
        session_id: i64,
    },

    /// Credit or debit hours (owner only)
    Adjust {
        #[command(subcommand)]
        action: AdjustAction,
    },

    /// Mark a user as fully justified for the current period (owner only)
    Justify {
        #[arg(long)]
        user: String,

        #[arg(long)]
        reason: String,
    },

    /// Grant justified days for the current period (owner only)
    JustifyDays {
        #[arg(long)]
        user: String,

        #[arg(long, allow_negative_numbers = true)]
        days: i64,

        #[arg(long)]
        reason: Option<String>,
    },

    /// Remove justifications for the current period (owner only)
    Unjustify {
        #[command(subcommand)]
        action: UnjustifyAction,
    },

    /// Show the live weekly ranking
    Ranking,

    /// Close the period: store the report and start counting from now (owner only)
    Reset,

    /// Restore the checkpoint replaced by the last reset (owner only)
    UndoReset,

    /// Hide a user from rankings (moderators)
    Exclude {
        #[arg(long)]
        user: String,
    },

    /// Show a previously excluded user again (moderators)
    Include {
        #[arg(long)]
        user: String,
    },

    /// List users hidden from rankings (moderators)
    Excluded,

    /// Show stored reset reports
    History {
        #[arg(long, default_value_t = 100, help = "Maximum number of report rows")]
        limit: usize,
    },

    /// Export the current ranking
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum AdjustAction {
    /// Credit time
    Add {
        #[arg(long)]
        user: String,

        #[arg(long, allow_negative_numbers = true)]
        hours: i64,

        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        minutes: i64,

        #[arg(long)]
        reason: Option<String>,
    },

    /// Debit time
    Remove {
        #[arg(long)]
        user: String,

        #[arg(long, allow_negative_numbers = true)]
        hours: i64,

        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        minutes: i64,

        #[arg(long)]
        reason: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum UnjustifyAction {
    /// Remove some justified days
    Days {
        #[arg(long)]
        user: String,

        #[arg(long, allow_negative_numbers = true)]
        days: i64,

        #[arg(long)]
        reason: Option<String>,
    },

    /// Remove the full flag, keeping justified days
    Full {
        #[arg(long)]
        user: String,

        #[arg(long)]
        reason: Option<String>,
    },

    /// Remove the full flag and every justified day
    All {
        #[arg(long)]
        user: String,

        #[arg(long)]
        reason: Option<String>,
    },
}

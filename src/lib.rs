//! rPunchcard library root.
//! Exposes the CLI parser, the high-level run() function and the ledger
//! modules (sessions, adjustments, justifications, weekly totals, resets).

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::RunContext;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use utils::path::expand_tilde;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config, ctx: &RunContext) -> AppResult<()> {
    use crate::cli::commands as cmd;

    match &cli.command {
        Commands::Init => cmd::init::handle(cfg, ctx),
        Commands::Config { .. } => cmd::config::handle(&cli.command, cfg, ctx),
        Commands::Db { .. } => cmd::db::handle(&cli.command, cfg, ctx),
        Commands::Log { .. } => cmd::log::handle(&cli.command, cfg),
        Commands::Backup { .. } => cmd::backup::handle(&cli.command, cfg),
        Commands::In | Commands::Out | Commands::Active { .. } | Commands::ForceOut { .. } => {
            cmd::session::handle(&cli.command, cfg, ctx)
        }
        Commands::Adjust { .. } => cmd::adjust::handle(&cli.command, cfg, ctx),
        Commands::Justify { .. } | Commands::JustifyDays { .. } | Commands::Unjustify { .. } => {
            cmd::justify::handle(&cli.command, cfg, ctx)
        }
        Commands::Ranking | Commands::History { .. } => cmd::ranking::handle(&cli.command, cfg, ctx),
        Commands::Reset | Commands::UndoReset => cmd::reset::handle(&cli.command, cfg, ctx),
        Commands::Exclude { .. } | Commands::Include { .. } | Commands::Excluded => {
            cmd::exclusion::handle(&cli.command, cfg, ctx)
        }
        Commands::Export { .. } => cmd::export::handle(&cli.command, cfg, ctx),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    utils::logger::init_logging();

    let cli = Cli::parse();

    // Load the configuration once, from --config-file or the standard place.
    let config_path = cli
        .config_file
        .as_deref()
        .map(expand_tilde)
        .unwrap_or_else(Config::config_file);
    let mut cfg = Config::load_from(&config_path)?;

    if let Some(custom_db) = &cli.db {
        cfg.database = expand_tilde(custom_db).to_string_lossy().to_string();
    }

    let ctx = RunContext {
        scope: cli
            .scope
            .clone()
            .unwrap_or_else(|| cfg.default_scope.clone()),
        actor: cli.actor.clone(),
        config_path,
        test: cli.test,
    };
    tracing::debug!(scope = %ctx.scope, database = %cfg.database, "configuration loaded");

    dispatch(&cli, &cfg, &ctx)
}

use crate::cli::RunContext;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::config::migrate::{migrate_config_file, missing_keys};
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use std::fs;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config, ctx: &RunContext) -> AppResult<()> {
    let Commands::Config {
        print_config,
        check,
        migrate,
    } = cmd
    else {
        return Ok(());
    };

    let path = &ctx.config_path;

    if *print_config {
        println!("📄 Current configuration ({}):\n", path.display());
        println!("{}", cfg.to_yaml()?);
    }

    if *check {
        if !path.exists() {
            warning(format!("No configuration file at {}; defaults are in use.", path.display()));
        } else {
            let content = fs::read_to_string(path)?;
            let missing = missing_keys(&content)?;
            if missing.is_empty() {
                success("Configuration file is complete.");
            } else {
                warning(format!("Missing keys: {}", missing.join(", ")));
                info("Run `rpunchcard config --migrate` to add them with default values.");
            }
        }
    }

    if *migrate {
        if !path.exists() {
            warning(format!("No configuration file at {}; run `init` first.", path.display()));
        } else {
            migrate_config_file(path)?;
        }
    }

    Ok(())
}

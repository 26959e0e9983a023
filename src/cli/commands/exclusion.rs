use crate::cli::RunContext;
use crate::cli::commands::Ledger;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::exclusion::ExclusionLogic;
use crate::core::permissions::Permissions;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::utils::time::now_ms;

pub fn handle(cmd: &Commands, cfg: &Config, ctx: &RunContext) -> AppResult<()> {
    let actor = ctx.actor()?;
    let scope = ctx.scope.as_str();

    let mut ledger = Ledger::open(cfg)?;
    Permissions::new(cfg, &ledger.roles).require_moderator(actor, scope)?;

    match cmd {
        Commands::Exclude { user } => {
            ExclusionLogic::exclude(&mut ledger.pool, scope, user, actor, now_ms())?;
            success(format!("{user} removed from the ranking of '{scope}'."));
        }
        Commands::Include { user } => {
            if ExclusionLogic::include(&mut ledger.pool, scope, user)? {
                success(format!("{user} is back in the ranking of '{scope}'."));
            } else {
                warning(format!("{user} was not excluded."));
            }
        }
        Commands::Excluded => {
            let users = ExclusionLogic::list(&ledger.pool, scope)?;
            if users.is_empty() {
                info("Nobody is excluded from the ranking.");
            } else {
                println!("Excluded from the ranking:");
                for u in users {
                    println!("- {u}");
                }
            }
        }
        _ => {}
    }

    Ok(())
}

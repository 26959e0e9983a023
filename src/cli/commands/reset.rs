use crate::cli::RunContext;
use crate::cli::commands::Ledger;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::permissions::Permissions;
use crate::core::report::render_reset_outcome;
use crate::core::reset::ResetLogic;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::time::{fmt_datetime, now_ms};

pub fn handle(cmd: &Commands, cfg: &Config, ctx: &RunContext) -> AppResult<()> {
    let actor = ctx.actor()?;
    let scope = ctx.scope.as_str();

    let mut ledger = Ledger::open(cfg)?;
    Permissions::new(cfg, &ledger.roles).require_owner(actor)?;

    match cmd {
        Commands::Reset => {
            let outcome = ResetLogic::reset(
                &mut ledger.pool,
                scope,
                now_ms(),
                actor,
                &ledger.policy,
                &ledger.roles,
                &ledger.sink,
            )?;
            print!("{}", render_reset_outcome(&outcome, cfg.report_limit));
            println!();
            success(format!(
                "Counting restarted at {}.",
                fmt_datetime(outcome.new_ts)
            ));
        }
        Commands::UndoReset => {
            let restored = ResetLogic::undo(&mut ledger.pool, scope, actor, &ledger.sink)?;
            success(format!(
                "Reset undone. Counting again since {}.",
                fmt_datetime(restored)
            ));
        }
        _ => {}
    }

    Ok(())
}

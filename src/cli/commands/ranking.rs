use crate::cli::RunContext;
use crate::cli::commands::Ledger;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::report::{history, render_history, render_ranking};
use crate::core::weekly::WeeklyLogic;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config, ctx: &RunContext) -> AppResult<()> {
    let ledger = Ledger::open(cfg)?;

    match cmd {
        Commands::Ranking => {
            let (rows, since_ts) =
                WeeklyLogic::ranking(&ledger.pool.conn, &ctx.scope, &ledger.policy, &ledger.roles)?;
            print!("{}", render_ranking(&rows, since_ts));
        }
        Commands::History { limit } => {
            let entries = history(&ledger.pool, &ctx.scope, *limit)?;
            print!("{}", render_history(&entries));
        }
        _ => {}
    }

    Ok(())
}

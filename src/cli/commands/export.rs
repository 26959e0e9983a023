use crate::cli::RunContext;
use crate::cli::commands::Ledger;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::ui::messages::info;

pub fn handle(cmd: &Commands, cfg: &Config, ctx: &RunContext) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        force,
    } = cmd
    {
        let ledger = Ledger::open(cfg)?;
        let n = ExportLogic::export(
            &ledger.pool,
            &ctx.scope,
            *format,
            file,
            *force,
            &ledger.policy,
            &ledger.roles,
        )?;
        if n == 0 {
            info("The ranking is empty: only the header was written.");
        }
    }
    Ok(())
}

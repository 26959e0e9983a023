use crate::cli::RunContext;
use crate::cli::commands::Ledger;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::permissions::Permissions;
use crate::core::report::render_open_sessions;
use crate::core::session::SessionLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::time::{fmt_datetime, fmt_time, format_hm, now_ms};

pub fn handle(cmd: &Commands, cfg: &Config, ctx: &RunContext) -> AppResult<()> {
    let mut ledger = Ledger::open(cfg)?;
    let scope = ctx.scope.as_str();
    let now = now_ms();

    match cmd {
        Commands::In => {
            let actor = ctx.actor()?;
            let session = SessionLogic::clock_in(&mut ledger.pool, actor, scope, now, &ledger.sink)?;
            success(format!(
                "Clocked in at {} (session #{}).",
                fmt_time(session.start_ts),
                session.id
            ));
        }

        Commands::Out => {
            let actor = ctx.actor()?;
            let closed = SessionLogic::clock_out(&mut ledger.pool, actor, scope, now, &ledger.sink)?;
            success(format!(
                "Clocked out at {}. Session time: {}",
                fmt_time(closed.end_ts),
                format_hm(closed.elapsed_ms)
            ));
        }

        Commands::Active { closing } => {
            let open = if *closing {
                let actor = ctx.actor()?;
                Permissions::new(cfg, &ledger.roles).require_moderator(actor, scope)?;
                SessionLogic::list_open_for_closing(&ledger.pool, scope)?
            } else {
                SessionLogic::list_open(&ledger.pool, scope)?
            };
            print!("{}", render_open_sessions(&open, now));
        }

        Commands::ForceOut { session_id } => {
            let actor = ctx.actor()?;
            Permissions::new(cfg, &ledger.roles).require_moderator(actor, scope)?;

            let (closed, owner) =
                SessionLogic::force_close(&mut ledger.pool, *session_id, scope, now, actor, &ledger.sink)?;
            success(format!(
                "Session #{} of {} closed. Session time: {}",
                closed.session_id,
                owner,
                format_hm(closed.elapsed_ms)
            ));
            info(format!("It had been open since {}.", fmt_datetime(closed.start_ts)));
        }

        _ => {}
    }

    Ok(())
}

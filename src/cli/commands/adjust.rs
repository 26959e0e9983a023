use crate::cli::RunContext;
use crate::cli::commands::Ledger;
use crate::cli::parser::{AdjustAction, Commands};
use crate::config::Config;
use crate::core::adjust::{AdjustLogic, delta_from_parts};
use crate::core::permissions::Permissions;
use crate::errors::AppResult;
use crate::models::adjustment::AdjustDirection;
use crate::ui::messages::success;
use crate::utils::time::{format_hm, now_ms};

pub fn handle(cmd: &Commands, cfg: &Config, ctx: &RunContext) -> AppResult<()> {
    let Commands::Adjust { action } = cmd else {
        return Ok(());
    };

    let (direction, user, hours, minutes, reason) = match action {
        AdjustAction::Add {
            user,
            hours,
            minutes,
            reason,
        } => (AdjustDirection::Add, user, *hours, *minutes, reason),
        AdjustAction::Remove {
            user,
            hours,
            minutes,
            reason,
        } => (AdjustDirection::Remove, user, *hours, *minutes, reason),
    };

    let actor = ctx.actor()?;
    // Validate before touching the database.
    let delta_ms = delta_from_parts(hours, minutes, direction)?;

    let mut ledger = Ledger::open(cfg)?;
    Permissions::new(cfg, &ledger.roles).require_owner(actor)?;

    let reason = reason
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .unwrap_or(direction.default_reason());

    let adj = AdjustLogic::record(
        &mut ledger.pool,
        user,
        &ctx.scope,
        delta_ms,
        Some(reason),
        actor,
        now_ms(),
        &ledger.sink,
    )?;

    let verb = match direction {
        AdjustDirection::Add => "Added",
        AdjustDirection::Remove => "Removed",
    };
    success(format!(
        "{verb} {} for {} ({}).",
        format_hm(adj.delta_ms.abs()),
        user,
        reason
    ));
    Ok(())
}

use crate::cli::RunContext;
use crate::cli::commands::Ledger;
use crate::cli::parser::{Commands, UnjustifyAction};
use crate::config::Config;
use crate::core::calculator::goal::{day_cap, effective_goal};
use crate::core::justify::{JustifyLogic, validate_grant_days, validate_removal_days};
use crate::core::permissions::Permissions;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::utils::formatting::format_goal;
use crate::utils::time::now_ms;

fn clean(reason: &Option<String>) -> Option<&str> {
    reason.as_deref().map(str::trim).filter(|r| !r.is_empty())
}

pub fn handle(cmd: &Commands, cfg: &Config, ctx: &RunContext) -> AppResult<()> {
    let actor = ctx.actor()?;
    let scope = ctx.scope.as_str();

    // Range checks come before any database access.
    match cmd {
        Commands::JustifyDays { days, .. } => validate_grant_days(*days)?,
        Commands::Unjustify {
            action: UnjustifyAction::Days { days, .. },
        } => validate_removal_days(*days)?,
        _ => {}
    }

    let mut ledger = Ledger::open(cfg)?;
    Permissions::new(cfg, &ledger.roles).require_owner(actor)?;
    let period = JustifyLogic::current_period(&ledger.pool, scope)?;
    let now = now_ms();

    match cmd {
        Commands::Justify { user, reason } => {
            JustifyLogic::mark_full(
                &mut ledger.pool,
                user,
                scope,
                period,
                Some(reason.trim()),
                actor,
                now,
                &ledger.sink,
            )?;
            success(format!("{user} is justified for the whole period."));
        }

        Commands::JustifyDays { user, days, reason } => {
            let base = ledger.policy.base_goal(&ledger.roles, user, scope);
            let out = JustifyLogic::add_days(
                &mut ledger.pool,
                user,
                scope,
                period,
                *days,
                day_cap(base),
                clean(reason),
                actor,
                now,
                &ledger.sink,
            )?;

            if *days == 0 {
                info("0 days requested: nothing to do.");
            } else if out.is_noop() {
                warning(format!(
                    "{user} already has {} justified day(s), the maximum for a {} goal.",
                    out.previous,
                    format_goal(base)
                ));
            } else {
                success(format!(
                    "{} day(s) justified for {user} ({} of {} used). Goal now {}.",
                    out.applied,
                    out.new_total,
                    out.cap,
                    format_goal(effective_goal(base, out.new_total))
                ));
            }
        }

        Commands::Unjustify { action } => match action {
            UnjustifyAction::Days { user, days, reason } => {
                let out = JustifyLogic::remove_days(
                    &mut ledger.pool,
                    user,
                    scope,
                    period,
                    *days,
                    clean(reason),
                    actor,
                    now,
                    &ledger.sink,
                )?;
                if out.removed == 0 {
                    warning(format!("{user} has no justified days in this period."));
                } else {
                    success(format!(
                        "Removed {} day(s) from {user}: {} -> {}.",
                        out.removed, out.previous, out.new_total
                    ));
                }
            }
            UnjustifyAction::Full { user, reason } => {
                if JustifyLogic::clear_full(&mut ledger.pool, user, scope, period, clean(reason), actor, &ledger.sink)? {
                    success(format!("{user} is no longer justified for the whole period."));
                } else {
                    warning(format!("{user} was not justified for the whole period."));
                }
            }
            UnjustifyAction::All { user, reason } => {
                let out = JustifyLogic::clear_all(
                    &mut ledger.pool,
                    user,
                    scope,
                    period,
                    clean(reason),
                    actor,
                    now,
                    &ledger.sink,
                )?;
                if out.is_noop() {
                    warning(format!("{user} had no justification in this period."));
                } else {
                    success(format!(
                        "All justifications of {user} removed (full: {}, days: {}).",
                        if out.had_full { "yes" } else { "no" },
                        out.previous_days
                    ));
                }
            }
        },

        _ => {}
    }

    Ok(())
}

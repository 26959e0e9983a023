//! Who may do what.
//!
//! The owner alone touches hours, justifications and checkpoints.
//! Moderators (owner, extra admins, holders of the moderator role) may close
//! other people's sessions and manage ranking exclusions.

use crate::config::Config;
use crate::core::identity::RoleResolver;
use crate::errors::{AppError, AppResult};

pub struct Permissions<'a> {
    owner_id: Option<&'a str>,
    extra_admins: &'a [String],
    moderator_role: &'a str,
    roles: &'a dyn RoleResolver,
}

impl<'a> Permissions<'a> {
    pub fn new(cfg: &'a Config, roles: &'a dyn RoleResolver) -> Self {
        Self {
            owner_id: cfg
                .owner_id
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty()),
            extra_admins: &cfg.extra_admin_ids,
            moderator_role: &cfg.moderator_role,
            roles,
        }
    }

    pub fn is_owner(&self, actor: &str) -> bool {
        self.owner_id == Some(actor)
    }

    pub fn require_owner(&self, actor: &str) -> AppResult<()> {
        match self.owner_id {
            None => Err(AppError::OwnerNotConfigured),
            Some(owner) if owner == actor => Ok(()),
            Some(_) => Err(AppError::PermissionDenied(format!(
                "only the owner can do this, {actor} is not the owner"
            ))),
        }
    }

    pub fn can_moderate(&self, actor: &str, scope: &str) -> bool {
        self.is_owner(actor)
            || self.extra_admins.iter().any(|a| a == actor)
            || self.roles.has_role(actor, scope, self.moderator_role)
    }

    pub fn require_moderator(&self, actor: &str, scope: &str) -> AppResult<()> {
        if self.can_moderate(actor, scope) {
            Ok(())
        } else {
            Err(AppError::PermissionDenied(format!(
                "{actor} is not allowed to moderate scope '{scope}'"
            )))
        }
    }
}

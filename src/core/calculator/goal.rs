use crate::config::GoalsConfig;
use crate::core::identity::RoleResolver;

#[derive(Debug, Clone, PartialEq)]
pub struct GoalTier {
    pub role: String,
    pub hours: f64,
}

/// Ordered goal tiers with a fallback. The first tier whose role the user
/// holds decides the base goal; adding a tier is a configuration change.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalPolicy {
    pub default_hours: f64,
    pub tiers: Vec<GoalTier>,
}

impl GoalPolicy {
    pub fn new(default_hours: f64, tiers: Vec<GoalTier>) -> Self {
        Self {
            default_hours,
            tiers,
        }
    }

    pub fn from_config(goals: &GoalsConfig) -> Self {
        Self::new(
            goals.default_hours,
            goals
                .tiers
                .iter()
                .map(|t| GoalTier {
                    role: t.role.clone(),
                    hours: t.hours,
                })
                .collect(),
        )
    }

    /// Weekly goal in hours for `user`. Unresolvable role lookups simply
    /// fall through to the next tier.
    pub fn base_goal(&self, roles: &dyn RoleResolver, user: &str, scope: &str) -> f64 {
        self.tiers
            .iter()
            .find(|t| roles.has_role(user, scope, &t.role))
            .map(|t| t.hours)
            .unwrap_or(self.default_hours)
    }
}

/// Maximum number of justified days: whole hours of the base goal.
/// A 3.5h goal caps at 3 days.
pub fn day_cap(base_goal: f64) -> i64 {
    base_goal.max(0.0).floor() as i64
}

/// `max(0, base - min(base, days))`: each day credit removes one hour.
pub fn effective_goal(base_goal: f64, day_credits: i64) -> f64 {
    let credit = (day_credits.max(0) as f64).min(base_goal);
    (base_goal - credit).max(0.0)
}

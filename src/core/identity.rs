//! Role/identity resolution.
//!
//! The ledger never stores roles or names; it asks a [`RoleResolver`].
//! [`ConfigDirectory`] answers from the YAML configuration and keeps resolved
//! display names in a short-lived [`NameCache`].

use crate::config::Config;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::time::{Duration, Instant};

pub trait RoleResolver {
    /// Whether `user` holds `role` in `scope`. Lookups that cannot be
    /// resolved answer `false`.
    fn has_role(&self, user: &str, scope: &str, role: &str) -> bool;

    /// Presentation name for `user`; falls back to the raw id.
    fn display_name(&self, user: &str, scope: &str) -> String;
}

/// Time-bounded name cache: (key, value, expiry).
#[derive(Debug)]
pub struct NameCache {
    ttl: Duration,
    entries: HashMap<String, (String, Instant)>,
}

impl NameCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, key: &str, now: Instant) -> Option<&str> {
        match self.entries.get(key) {
            Some((name, exp)) if *exp > now => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn insert(&mut self, key: &str, name: String, now: Instant) {
        self.entries.insert(key.to_string(), (name, now + self.ttl));
    }

    /// Cached value, or `fetch` it and remember it until `now + ttl`.
    pub fn get_or_fetch<F>(&mut self, key: &str, now: Instant, fetch: F) -> String
    where
        F: FnOnce() -> String,
    {
        if let Some(hit) = self.get(key, now) {
            return hit.to_string();
        }
        let name = fetch();
        self.insert(key, name.clone(), now);
        name
    }

    /// Drop expired entries.
    pub fn purge(&mut self, now: Instant) {
        self.entries.retain(|_, (_, exp)| *exp > now);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolver backed by the `roles` and `display_names` config sections.
/// Roles are the same in every scope.
pub struct ConfigDirectory {
    roles: BTreeMap<String, Vec<String>>,
    names: BTreeMap<String, String>,
    cache: RefCell<NameCache>,
}

impl ConfigDirectory {
    pub fn new(
        roles: BTreeMap<String, Vec<String>>,
        names: BTreeMap<String, String>,
        ttl: Duration,
    ) -> Self {
        Self {
            roles,
            names,
            cache: RefCell::new(NameCache::new(ttl)),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(
            cfg.roles.clone(),
            cfg.display_names.clone(),
            Duration::from_secs(cfg.name_cache_ttl_secs),
        )
    }
}

impl RoleResolver for ConfigDirectory {
    fn has_role(&self, user: &str, _scope: &str, role: &str) -> bool {
        self.roles
            .get(role)
            .is_some_and(|members| members.iter().any(|m| m == user))
    }

    fn display_name(&self, user: &str, scope: &str) -> String {
        let key = format!("{scope}:{user}");
        self.cache
            .borrow_mut()
            .get_or_fetch(&key, Instant::now(), || {
                self.names
                    .get(user)
                    .cloned()
                    .unwrap_or_else(|| user.to_string())
            })
    }
}

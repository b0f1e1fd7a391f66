//! Role hierarchy, permission resolution, and module visibility.
//!
//! Every decision here is a pure function of the constant grant table handed to
//! [`AccessPolicy`]. A `false` answer is an ordinary result; callers decide whether it
//! becomes an authorization failure.

mod modules;
mod permissions;
mod role;

pub use modules::{AppModule, ModuleAccess};
pub use permissions::{
    PermissionSet, RoleGrant, NON_INHERITABLE_MARKERS, STANDARD_GRANTS, WILDCARD,
};
pub use role::{hierarchy_level, Role, UnknownRole};

use permissions::is_inheritable;
use serde::Serialize;

/// Resolves role capabilities against an immutable grant table.
#[derive(Debug, Clone, Copy)]
pub struct AccessPolicy {
    grants: &'static [RoleGrant],
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

impl AccessPolicy {
    pub const fn new(grants: &'static [RoleGrant]) -> Self {
        Self { grants }
    }

    pub const fn standard() -> Self {
        Self::new(&STANDARD_GRANTS)
    }

    /// Permissions a role holds natively, without inheritance.
    pub fn base_permissions(&self, role: Role) -> &'static [&'static str] {
        self.grants
            .iter()
            .find(|grant| grant.role == role)
            .map(|grant| grant.permissions)
            .unwrap_or(&[])
    }

    /// Effective permissions: the role's own grant plus everything inherited from
    /// lower, non-admin tiers. Admin keeps its own grant only.
    pub fn permissions_for(&self, role: Role) -> PermissionSet {
        let mut resolved: PermissionSet = self.base_permissions(role).iter().copied().collect();
        if role == Role::Admin {
            return resolved;
        }

        for grant in self.grants {
            if grant.role == Role::Admin || grant.role.level() >= role.level() {
                continue;
            }
            for permission in grant.permissions {
                if is_inheritable(permission) {
                    resolved.insert(permission);
                }
            }
        }

        resolved
    }

    /// ALL-of check used by fine-grained route guards. An empty requirement passes.
    pub fn has_permission(&self, role: Role, required: &[&str]) -> bool {
        self.permissions_for(role).allows_all(required)
    }

    /// Coarse list-membership check used where a route names the roles it admits.
    pub fn has_any_role(&self, role: Role, allowed: &[Role]) -> bool {
        allowed.contains(&role)
    }

    pub fn module_access(&self, role: Role) -> ModuleAccess {
        modules::module_access(&self.permissions_for(role))
    }

    /// Whether `acting` may create or reassign an account holding `target`.
    pub fn can_manage(&self, acting: Role, target: Role) -> bool {
        if target.is_sensitive() && acting != Role::Admin {
            return false;
        }
        acting.level() > target.level()
    }

    pub fn summary(&self, role: Role) -> AccessSummary {
        let permissions = self.permissions_for(role);
        AccessSummary {
            role,
            hierarchy_level: role.level(),
            modules: modules::module_access(&permissions),
            permissions,
        }
    }
}

/// Name-based variant of [`AccessPolicy::can_manage`] for raw session values.
/// Unknown names sit at hierarchy level 0 and are never sensitive.
pub fn can_manage_role(acting: &str, target: &str) -> bool {
    let acting_role = acting.parse::<Role>().ok();
    let target_sensitive = target
        .parse::<Role>()
        .map(Role::is_sensitive)
        .unwrap_or(false);

    if target_sensitive && acting_role != Some(Role::Admin) {
        return false;
    }
    hierarchy_level(acting) > hierarchy_level(target)
}

/// Everything a session needs to render navigation and gate actions for a role.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessSummary {
    pub role: Role,
    pub hierarchy_level: u8,
    pub permissions: PermissionSet,
    pub modules: ModuleAccess,
}

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::role::Role;

/// Grants every capability.
pub const WILDCARD: &str = "*";

/// Substrings marking permissions that stay with the role that natively owns them.
pub const NON_INHERITABLE_MARKERS: [&str; 3] =
    ["manage_system_", "create_sensitive_", "backup_restore_"];

/// Base permissions natively granted to a role, before inheritance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleGrant {
    pub role: Role,
    pub permissions: &'static [&'static str],
}

pub const STANDARD_GRANTS: [RoleGrant; 6] = [
    RoleGrant {
        role: Role::Candidate,
        permissions: &[
            "view_jobs",
            "apply_jobs",
            "view_own_applications",
            "view_own_interviews",
            "edit_own_profile",
        ],
    },
    RoleGrant {
        role: Role::Employee,
        permissions: &[
            "view_own_profile",
            "view_own_contracts",
            "view_own_payroll",
            "complete_onboarding",
            "request_leave",
        ],
    },
    RoleGrant {
        role: Role::Recruiter,
        permissions: &[
            "manage_jobs",
            "view_applications",
            "manage_applications",
            "view_candidates",
            "score_candidates",
            "schedule_interview",
        ],
    },
    RoleGrant {
        role: Role::Manager,
        permissions: &[
            "view_team",
            "approve_leave",
            "manage_interviews",
            "view_reports",
            "view_analytics",
        ],
    },
    RoleGrant {
        role: Role::Hr,
        permissions: &[
            "manage_employees",
            "manage_contracts",
            "manage_payroll",
            "manage_onboarding",
            "export_reports",
            "view_hr_dashboard",
        ],
    },
    RoleGrant {
        role: Role::Admin,
        permissions: &[
            WILDCARD,
            "manage_users",
            "manage_roles",
            "manage_settings",
            "manage_system_settings",
            "create_sensitive_roles",
            "backup_restore_data",
        ],
    },
];

pub(crate) fn is_inheritable(permission: &str) -> bool {
    !NON_INHERITABLE_MARKERS
        .iter()
        .any(|marker| permission.contains(marker))
}

/// Resolved, de-duplicated permission tokens for a role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(BTreeSet<String>);

impl PermissionSet {
    pub fn contains(&self, permission: &str) -> bool {
        self.0.contains(permission)
    }

    /// True when the set carries the wildcard.
    pub fn is_unrestricted(&self) -> bool {
        self.contains(WILDCARD)
    }

    pub fn allows(&self, permission: &str) -> bool {
        self.is_unrestricted() || self.contains(permission)
    }

    pub fn allows_all(&self, required: &[&str]) -> bool {
        required.iter().all(|permission| self.allows(permission))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn insert(&mut self, permission: &str) {
        self.0.insert(permission.to_string());
    }
}

impl<'a> FromIterator<&'a str> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self(iter.into_iter().map(str::to_string).collect())
    }
}

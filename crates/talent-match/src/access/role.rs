use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Capability tier assigned to a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Candidate,
    Employee,
    Recruiter,
    Manager,
    Hr,
    Admin,
}

impl Role {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Candidate,
            Self::Employee,
            Self::Recruiter,
            Self::Manager,
            Self::Hr,
            Self::Admin,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Candidate => "candidate",
            Self::Employee => "employee",
            Self::Recruiter => "recruiter",
            Self::Manager => "manager",
            Self::Hr => "hr",
            Self::Admin => "admin",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Candidate => "Candidate",
            Self::Employee => "Employee",
            Self::Recruiter => "Recruiter",
            Self::Manager => "Manager",
            Self::Hr => "HR",
            Self::Admin => "Administrator",
        }
    }

    /// Position in the management hierarchy. Admin sits well above the rest.
    pub const fn level(self) -> u8 {
        match self {
            Self::Candidate => 1,
            Self::Employee => 2,
            Self::Recruiter => 3,
            Self::Manager => 4,
            Self::Hr => 5,
            Self::Admin => 10,
        }
    }

    /// Roles that only an administrator may create or reassign.
    pub const fn is_sensitive(self) -> bool {
        matches!(self, Self::Hr | Self::Manager | Self::Recruiter | Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "candidate" => Ok(Self::Candidate),
            "employee" => Ok(Self::Employee),
            "recruiter" => Ok(Self::Recruiter),
            "manager" => Ok(Self::Manager),
            "hr" => Ok(Self::Hr),
            "admin" => Ok(Self::Admin),
            _ => Err(UnknownRole(value.to_string())),
        }
    }
}

/// Hierarchy level for a role name as it arrives from a session or request.
/// Names that do not resolve to a known role sit at level 0.
pub fn hierarchy_level(role: &str) -> u8 {
    role.parse::<Role>().map(Role::level).unwrap_or(0)
}

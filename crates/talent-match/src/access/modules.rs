use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::permissions::PermissionSet;

/// Navigable areas of the recruitment application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppModule {
    Dashboard,
    Candidates,
    Jobs,
    Applications,
    Interviews,
    Onboarding,
    Employees,
    Contracts,
    Payroll,
    Reports,
    Users,
    Settings,
    HrManagement,
}

impl AppModule {
    pub const fn ordered() -> [Self; 13] {
        [
            Self::Dashboard,
            Self::Candidates,
            Self::Jobs,
            Self::Applications,
            Self::Interviews,
            Self::Onboarding,
            Self::Employees,
            Self::Contracts,
            Self::Payroll,
            Self::Reports,
            Self::Users,
            Self::Settings,
            Self::HrManagement,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Candidates => "candidates",
            Self::Jobs => "jobs",
            Self::Applications => "applications",
            Self::Interviews => "interviews",
            Self::Onboarding => "onboarding",
            Self::Employees => "employees",
            Self::Contracts => "contracts",
            Self::Payroll => "payroll",
            Self::Reports => "reports",
            Self::Users => "users",
            Self::Settings => "settings",
            Self::HrManagement => "hr_management",
        }
    }

    /// Permission patterns that unlock the module. Dashboard has none because it is always open.
    const fn keywords(self) -> &'static [Keyword] {
        match self {
            Self::Dashboard => &[],
            Self::Candidates => &[
                Keyword::Contains("candidate"),
                Keyword::Contains("view_applications"),
            ],
            Self::Jobs => &[Keyword::Contains("jobs"), Keyword::Exact("manage_jobs")],
            Self::Applications => &[Keyword::Contains("applications")],
            Self::Interviews => &[Keyword::Contains("interview")],
            Self::Onboarding => &[Keyword::Contains("onboarding")],
            Self::Employees => &[Keyword::Contains("manage_employees")],
            Self::Contracts => &[Keyword::Contains("contracts")],
            Self::Payroll => &[Keyword::Contains("payroll")],
            Self::Reports => &[Keyword::Contains("reports"), Keyword::Contains("analytics")],
            Self::Users => &[Keyword::Exact("manage_users")],
            Self::Settings => &[Keyword::Contains("settings")],
            Self::HrManagement => &[
                Keyword::Contains("manage_employees"),
                Keyword::Contains("hr"),
            ],
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Keyword {
    Contains(&'static str),
    Exact(&'static str),
}

impl Keyword {
    fn matches(self, permission: &str) -> bool {
        match self {
            Keyword::Contains(fragment) => permission.contains(fragment),
            Keyword::Exact(name) => permission == name,
        }
    }
}

/// Visibility flag for every module.
pub type ModuleAccess = BTreeMap<AppModule, bool>;

pub(crate) fn module_access(permissions: &PermissionSet) -> ModuleAccess {
    AppModule::ordered()
        .into_iter()
        .map(|module| (module, is_visible(module, permissions)))
        .collect()
}

fn is_visible(module: AppModule, permissions: &PermissionSet) -> bool {
    if module == AppModule::Dashboard || permissions.is_unrestricted() {
        return true;
    }

    let keywords = module.keywords();
    permissions
        .iter()
        .any(|permission| keywords.iter().any(|keyword| keyword.matches(permission)))
}

//! Staffing roles.
//!
//! [`Role`] enumerates the roles the calculators know about. [`RoleName`] is the
//! free-form position-group name used as a key in the historical documents,
//! which also contain groups the calculators never size.

use serde::{Deserialize, Serialize};
use std::fmt;

crate::define_name_type!(RoleName);

/// Whether a role is always staffed or only when a situational factor is present.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleKind {
    Mandatory,
    Conditional,
}

/// A role sized by the staffing calculators.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    ProjectLead,
    SiteSupervisor,
    Foreman,
    SafetyOfficer,
    WarehouseSpecialist,
    AdminSpecialist,
    DriverMechanic,
    ScaffoldInspector,
    ForeignWorkerLiaison,
    SecurityStaff,
    DesignEngineer,
}

impl Role {
    /// Mandatory roles in evaluation order. The admin specialist is last because
    /// it is sized from the running total of the others.
    pub const MANDATORY: [Role; 6] = [
        Role::ProjectLead,
        Role::SiteSupervisor,
        Role::Foreman,
        Role::SafetyOfficer,
        Role::WarehouseSpecialist,
        Role::AdminSpecialist,
    ];

    /// Conditional roles in presentation order.
    pub const CONDITIONAL: [Role; 5] = [
        Role::DriverMechanic,
        Role::ScaffoldInspector,
        Role::ForeignWorkerLiaison,
        Role::SecurityStaff,
        Role::DesignEngineer,
    ];

    pub fn kind(&self) -> RoleKind {
        if Self::MANDATORY.contains(self) {
            RoleKind::Mandatory
        } else {
            RoleKind::Conditional
        }
    }

    /// Position-group name as it appears in the historical documents.
    pub fn position_group(&self) -> &'static str {
        match self {
            Role::ProjectLead => "Руководитель проекта",
            Role::SiteSupervisor => "Производитель работ",
            Role::Foreman => "Мастер",
            Role::SafetyOfficer => "Специалист по охране труда",
            Role::WarehouseSpecialist => "Кладовщик / Работник склада / Специалист ОМТС",
            Role::AdminSpecialist => "Специалист по общим вопросам",
            Role::DriverMechanic => "Водитель / Машинист / Механик",
            Role::ScaffoldInspector => "Инспектор строительных лесов",
            Role::ForeignWorkerLiaison => "Специалист по сопровождению групп",
            Role::SecurityStaff => "Сотрудник службы безопасности",
            Role::DesignEngineer => "Инженер-конструктор",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::ProjectLead => "Project lead",
            Role::SiteSupervisor => "Site supervisor (prorab)",
            Role::Foreman => "Foreman (master)",
            Role::SafetyOfficer => "Safety officer",
            Role::WarehouseSpecialist => "Warehouse / logistics specialist",
            Role::AdminSpecialist => "General affairs specialist",
            Role::DriverMechanic => "Driver / mechanic",
            Role::ScaffoldInspector => "Scaffold inspector",
            Role::ForeignWorkerLiaison => "Foreign worker liaison",
            Role::SecurityStaff => "Security staff",
            Role::DesignEngineer => "Design engineer",
        }
    }

    /// Key of this role in the coefficient table.
    pub fn role_name(&self) -> RoleName {
        RoleName::from(self.position_group())
    }

    pub fn from_position_group(group: &str) -> Option<Role> {
        Self::MANDATORY
            .into_iter()
            .chain(Self::CONDITIONAL)
            .find(|role| role.position_group() == group.trim())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<Role> for RoleName {
    fn from(role: Role) -> Self {
        role.role_name()
    }
}

//! Shared enumerations stored as short strings so the schema stays portable
//! between PostgreSQL and SQLite.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Department a manager or an application user belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum Department {
    /// Information technology
    #[sea_orm(string_value = "It")]
    It,
    /// User experience and interface design
    #[sea_orm(string_value = "UxUi")]
    UxUi,
    #[sea_orm(string_value = "Marketing")]
    Marketing,
    #[sea_orm(string_value = "Business")]
    Business,
    /// Human resources
    #[sea_orm(string_value = "Hr")]
    Hr,
    #[sea_orm(string_value = "Accounting")]
    Accounting,
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Department::It => write!(f, "It"),
            Department::UxUi => write!(f, "UxUi"),
            Department::Marketing => write!(f, "Marketing"),
            Department::Business => write!(f, "Business"),
            Department::Hr => write!(f, "Hr"),
            Department::Accounting => write!(f, "Accounting"),
        }
    }
}

/// Role a team member plays on a project
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum Role {
    #[sea_orm(string_value = "Developer")]
    Developer,
    #[sea_orm(string_value = "Analyst")]
    Analyst,
    /// Business owner funding the project
    #[sea_orm(string_value = "ProjectSponsor")]
    ProjectSponsor,
    #[sea_orm(string_value = "Architect")]
    Architect,
    #[sea_orm(string_value = "Designer")]
    Designer,
    #[sea_orm(string_value = "Tester")]
    Tester,
    /// Facilitator of the team's agile process
    #[sea_orm(string_value = "ScrumMaster")]
    ScrumMaster,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Developer => write!(f, "Developer"),
            Role::Analyst => write!(f, "Analyst"),
            Role::ProjectSponsor => write!(f, "ProjectSponsor"),
            Role::Architect => write!(f, "Architect"),
            Role::Designer => write!(f, "Designer"),
            Role::Tester => write!(f, "Tester"),
            Role::ScrumMaster => write!(f, "ScrumMaster"),
        }
    }
}

//! `SeaORM` Entity for app_users
//!
//! Sign-in accounts. The normalized columns hold the upper-cased email and
//! user name and back the case-insensitive unique lookups.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::enums::Department;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "app_users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:                   String,
    pub user_name:            String,
    #[sea_orm(unique)]
    pub normalized_user_name: String,
    pub email:                String,
    #[sea_orm(unique)]
    pub normalized_email:     String,
    pub name:                 String,
    pub department:           Department,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture:              Option<String>,
    #[serde(skip_serializing)]
    pub password_hash:        String,
    /// Rotated whenever credentials change
    #[serde(skip_serializing)]
    pub security_stamp:       String,
    pub created_at:           chrono::DateTime<chrono::Utc>,
    pub updated_at:           chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_sessions::Entity")]
    UserSessions,
}

impl Related<super::user_sessions::Entity> for Entity {
    fn to() -> RelationDef { Relation::UserSessions.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Normalizes an email or user name for unique lookups.
pub fn normalize(value: &str) -> String { value.trim().to_uppercase() }

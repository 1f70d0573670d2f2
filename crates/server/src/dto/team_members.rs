//! # Team Member Data Transfer Objects

use entity::{team_members, Role};
use sea_orm::{ActiveValue::NotSet, Set};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{not_blank, ResourceDto};

/// Team member as exchanged on `/api/teammember`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberDto {
    #[serde(default)]
    pub id:         i32,
    #[validate(
        length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"),
        custom(function = "not_blank", message = "Name is required")
    )]
    pub name:       String,
    pub role:       Role,
    #[validate(email(message = "Email must be a valid email address"))]
    pub email:      String,
    pub project_id: i32,
}

impl From<team_members::Model> for TeamMemberDto {
    fn from(model: team_members::Model) -> Self {
        Self {
            id:         model.id,
            name:       model.name,
            role:       model.role,
            email:      model.email,
            project_id: model.project_id,
        }
    }
}

impl TeamMemberDto {
    /// Active model with every mutable column set and the id left unset.
    pub fn into_active_model(self) -> team_members::ActiveModel {
        team_members::ActiveModel {
            id:         NotSet,
            name:       Set(self.name),
            role:       Set(self.role),
            email:      Set(self.email),
            project_id: Set(self.project_id),
        }
    }
}

impl ResourceDto for TeamMemberDto {
    fn id(&self) -> i32 { self.id }
}

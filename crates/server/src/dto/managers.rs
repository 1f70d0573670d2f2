//! # Manager Data Transfer Objects

use entity::{managers, Department};
use sea_orm::{ActiveValue::NotSet, Set};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{not_blank, ResourceDto};

/// Manager as exchanged on `/api/manager`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ManagerDto {
    /// Assigned by the database, ignored on create
    #[serde(default)]
    pub id:         i32,
    #[validate(
        length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"),
        custom(function = "not_blank", message = "Name is required")
    )]
    pub name:       String,
    #[validate(email(message = "Email must be a valid email address"))]
    pub email:      String,
    pub department: Department,
    /// Picture URL
    #[serde(default)]
    pub picture:    Option<String>,
}

impl From<managers::Model> for ManagerDto {
    fn from(model: managers::Model) -> Self {
        Self {
            id:         model.id,
            name:       model.name,
            email:      model.email,
            department: model.department,
            picture:    model.picture,
        }
    }
}

impl ManagerDto {
    /// Active model with every mutable column set and the id left unset.
    pub fn into_active_model(self) -> managers::ActiveModel {
        managers::ActiveModel {
            id:         NotSet,
            name:       Set(self.name),
            email:      Set(self.email),
            department: Set(self.department),
            picture:    Set(self.picture),
        }
    }
}

impl ResourceDto for ManagerDto {
    fn id(&self) -> i32 { self.id }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_deserialize_without_id() {
        let dto: ManagerDto = serde_json::from_value(json!({
            "name": "Ann",
            "email": "ann@x.com",
            "department": "Hr"
        }))
        .unwrap();
        assert_eq!(dto.id, 0);
        assert_eq!(dto.department, Department::Hr);
        assert!(dto.picture.is_none());
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_validation_rules() {
        let dto = ManagerDto {
            id:         0,
            name:       "x".repeat(101),
            email:      "not-an-email".to_string(),
            department: Department::It,
            picture:    None,
        };
        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
    }

    #[test]
    fn test_unknown_department_rejected() {
        let result = serde_json::from_value::<ManagerDto>(json!({
            "name": "Ann",
            "email": "ann@x.com",
            "department": "Legal"
        }));
        assert!(result.is_err());
    }
}

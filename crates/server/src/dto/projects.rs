//! # Project Data Transfer Objects

use chrono::NaiveDate;
use entity::projects;
use sea_orm::{ActiveValue::NotSet, Set};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{not_blank, ResourceDto};

/// Project as exchanged on `/api/project`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDto {
    #[serde(default)]
    pub id:          i32,
    #[validate(
        length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"),
        custom(function = "not_blank", message = "Name is required")
    )]
    pub name:        String,
    #[validate(length(max = 500, message = "Description must not exceed 500 characters"))]
    #[serde(default)]
    pub description: Option<String>,
    pub start_date:  NaiveDate,
    pub end_date:    NaiveDate,
    pub manager_id:  i32,
}

impl From<projects::Model> for ProjectDto {
    fn from(model: projects::Model) -> Self {
        Self {
            id:          model.id,
            name:        model.name,
            description: model.description,
            start_date:  model.start_date,
            end_date:    model.end_date,
            manager_id:  model.manager_id,
        }
    }
}

impl ProjectDto {
    /// Active model with every mutable column set and the id left unset.
    pub fn into_active_model(self) -> projects::ActiveModel {
        projects::ActiveModel {
            id:          NotSet,
            name:        Set(self.name),
            description: Set(self.description),
            start_date:  Set(self.start_date),
            end_date:    Set(self.end_date),
            manager_id:  Set(self.manager_id),
        }
    }
}

impl ResourceDto for ProjectDto {
    fn id(&self) -> i32 { self.id }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_camel_case_wire_format() {
        let dto: ProjectDto = serde_json::from_value(json!({
            "name": "P1",
            "startDate": "2025-01-01",
            "endDate": "2025-06-30",
            "managerId": 1
        }))
        .unwrap();
        assert_eq!(dto.manager_id, 1);
        assert_eq!(dto.start_date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());

        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(value["endDate"], "2025-06-30");
        assert_eq!(value["description"], serde_json::Value::Null);
    }

    #[test]
    fn test_description_limit() {
        let mut dto = ProjectDto {
            id:          0,
            name:        "P1".to_string(),
            description: Some("d".repeat(500)),
            start_date:  NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end_date:    NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            manager_id:  1,
        };
        assert!(dto.validate().is_ok());

        dto.description = Some("d".repeat(501));
        assert!(dto.validate().unwrap_err().field_errors().contains_key("description"));
    }
}

//! Managers Entity
//!
//! A manager owns zero or more projects. A manager cannot be deleted while a
//! project still references it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::enums::Department;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "managers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id:         i32,
    pub name:       String,
    pub email:      String,
    pub department: Department,
    pub picture:    Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::projects::Entity")]
    Projects,
}

impl Related<super::projects::Entity> for Entity {
    fn to() -> RelationDef { Relation::Projects.def() }
}

impl ActiveModelBehavior for ActiveModel {}

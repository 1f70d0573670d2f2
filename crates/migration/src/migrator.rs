//! # Database Migrator
//!
//! This module implements the Sea-ORM migrator trait for managing database schema changes.

use sea_orm_migration::prelude::*;

use crate::{
    m20250101_000001_create_managers_table,
    m20250101_000002_create_projects_table,
    m20250101_000003_create_team_members_table,
    m20250101_000004_create_app_users_table,
    m20250101_000005_create_user_sessions_table,
};

/// The main migrator that coordinates all migration operations
///
/// # Example
///
/// ```rust,ignore
/// use migration::{Migrator, MigratorTrait};
///
/// Migrator::up(&db, None).await?;
/// ```
#[derive(Debug)]
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    /// Migrations are executed in the order they appear in this list.
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_managers_table::Migration),
            // Projects reference managers, team members reference projects
            Box::new(m20250101_000002_create_projects_table::Migration),
            Box::new(m20250101_000003_create_team_members_table::Migration),
            Box::new(m20250101_000004_create_app_users_table::Migration),
            Box::new(m20250101_000005_create_user_sessions_table::Migration),
        ]
    }
}

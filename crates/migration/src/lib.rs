//! # Portfolio Migrations
//!
//! Schema migrations for the portfolio database. Foreign keys are declared
//! inline with each table so that SQLite enforces them as well as PostgreSQL.

pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_managers_table;
mod m20250101_000002_create_projects_table;
mod m20250101_000003_create_team_members_table;
mod m20250101_000004_create_app_users_table;
mod m20250101_000005_create_user_sessions_table;
pub mod migrator;

pub use migrator::Migrator;

/// Database connection helper for CLI usage
pub async fn connect_to_database(database_url: &str) -> Result<sea_orm::DatabaseConnection, sea_orm::DbErr> {
    let mut options = sea_orm::ConnectOptions::new(database_url.to_owned());
    options.sqlx_logging(false);
    if database_url.starts_with("sqlite::memory:") {
        // Every pooled connection would otherwise get its own empty database.
        options.max_connections(1).min_connections(1);
    }
    tracing::debug!(target: "migration", "Opening database connection");
    sea_orm::Database::connect(options).await
}

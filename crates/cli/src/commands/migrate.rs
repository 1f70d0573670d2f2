//! # CLI Migration Command

use error::{Result, ResultExt as _};
use migration::MigratorTrait as _;
use tracing::info;

use crate::{
    commands::MigrateArgs,
    config::{redact_database_url, DatabaseConfig},
};

/// Applies pending migrations, lists them (`--dry-run`) or reverts the
/// latest one (`--rollback`).
pub async fn migrate(config: &DatabaseConfig, args: MigrateArgs) -> Result<()> {
    info!(
        target: "migrate",
        dry_run = %args.dry_run,
        rollback = %args.rollback,
        "Running database migrations..."
    );

    let database_url = config.database_url();
    info!(target: "migrate", url = %redact_database_url(&database_url), "Connecting to database...");
    let db = migration::connect_to_database(&database_url)
        .await
        .context("Failed to connect to database")
        .log_error()?;

    if args.dry_run {
        let pending = migration::Migrator::get_pending_migrations(&db)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to get pending migrations: {}", e))?;

        info!(target: "migrate", pending_count = %pending.len(), "Dry run, nothing applied");
        for m in &pending {
            println!("{}", m.name());
        }
        return Ok(());
    }

    if args.rollback {
        info!(target: "migrate", "Rolling back the last migration...");
        migration::Migrator::down(&db, Some(1))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to rollback migration: {}", e))?;

        info!(target: "migrate", "Rollback completed successfully");
        return Ok(());
    }

    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))?;

    info!(target: "migrate", "Migrations completed successfully");
    Ok(())
}

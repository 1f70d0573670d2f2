//! # CLI Validate Command
//!
//! Checks the database settings and the session secret without starting
//! the server.

use auth::SessionConfig;
use error::{AppError, Result};
use tracing::info;

use crate::config::{redact_database_url, DatabaseConfig};

/// Validates the CLI configuration
///
/// # Returns
///
/// A `Result` indicating success or failure.
pub fn validate() -> Result<()> {
    info!(target: "validate", "Validating configuration...");

    let database = DatabaseConfig::from_env()?;
    info!(
        target: "validate",
        url = %redact_database_url(&database.database_url()),
        "Database settings OK"
    );

    let session = SessionConfig::from_env().map_err(|e| AppError::config(e.to_string()))?;
    info!(
        target: "validate",
        cookie = %session.cookie_name,
        secure = session.secure_cookie,
        "Session settings OK"
    );

    println!("Configuration is valid");
    Ok(())
}

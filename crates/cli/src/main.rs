//! # Portfolio CLI
//!
//! Command-line interface for the project portfolio service.
//!
//! ## Usage
//!
//! ```bash
//! portfolio serve    # Start the server (runs migrations automatically)
//! portfolio migrate  # Run database migrations
//! portfolio validate # Check configuration
//! portfolio --help   # Show help
//! ```

mod commands;
mod config;
mod serve;

use clap::{CommandFactory as _, Parser};
use error::Result;

use crate::commands::Commands;

/// Project portfolio service
#[derive(Parser, Debug)]
#[command(name = "portfolio")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'L', long, env = "RUST_LOG", default_value = "info", global = true)]
    pub log_level: String,

    /// Output format (json, pretty, compact)
    #[arg(short, long, env = "PORTFOLIO_LOG_FORMAT", default_value = "compact", global = true)]
    pub log_format: String,

    /// Also write JSON logs to this file, rotated daily
    #[arg(long, env = "PORTFOLIO_LOG_FILE", global = true)]
    pub log_file: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    logging::init(&cli.log_level, &cli.log_format, cli.log_file.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    logging::info!(target: "app", command = ?cli.command, "Portfolio CLI starting...");

    match cli.command {
        Commands::Serve(args) => {
            let db_config = config::DatabaseConfig::from_env()?;
            serve::serve(&db_config, &args).await?;
        },
        Commands::Migrate(args) => {
            let db_config = config::DatabaseConfig::from_env()?;
            commands::migrate::migrate(&db_config, args).await?;
        },
        Commands::Completions(args) => commands::completions::completions(args.shell, &mut Cli::command())?,
        Commands::Validate => commands::validate::validate()?,
    }

    logging::info!(target: "app", "Portfolio CLI completed successfully");
    Ok(())
}

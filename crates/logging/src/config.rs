//! # Logging Configuration
//!
//! Configuration for the logging subsystem.
//! Supports environment variables and programmatic configuration.

use std::{path::Path, sync::OnceLock};

use serde::{Deserialize, Serialize};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, registry::LookupSpan, EnvFilter, Layer, Registry};

/// Keeps the background file writer alive for the lifetime of the process.
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Logging configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `server=debug,sea_orm=warn`
    #[serde(default = "default_level")]
    pub level: String,

    /// Output format (json, pretty, compact)
    #[serde(default = "default_format")]
    pub format: String,

    /// Optional log file path, rotated daily
    #[serde(default)]
    pub log_file: Option<String>,

    /// Environment (development, testing, production)
    #[serde(default = "default_environment")]
    pub environment: String,
}

fn default_level() -> String { "info".to_string() }

fn default_format() -> String { "compact".to_string() }

fn default_environment() -> String { "development".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level:       default_level(),
            format:      default_format(),
            log_file:    None,
            environment: default_environment(),
        }
    }
}

impl LoggingConfig {
    /// Create configuration from environment variables.
    ///
    /// `RUST_LOG`, `PORTFOLIO_LOG_FORMAT`, `PORTFOLIO_LOG_FILE` and `PORTFOLIO_ENV`
    /// override the supplied values when set.
    pub fn from_env(level: &str, format: &str, log_file: Option<&str>) -> Self {
        Self {
            level:       std::env::var("RUST_LOG").unwrap_or_else(|_| level.to_string()),
            format:      std::env::var("PORTFOLIO_LOG_FORMAT").unwrap_or_else(|_| format.to_string()),
            log_file:    std::env::var("PORTFOLIO_LOG_FILE")
                .ok()
                .or(log_file.map(|s| s.to_string())),
            environment: std::env::var("PORTFOLIO_ENV").unwrap_or_else(|_| default_environment()),
        }
    }

    #[inline]
    pub fn is_production(&self) -> bool { self.environment.eq_ignore_ascii_case("production") }

    fn filter(&self) -> EnvFilter { EnvFilter::try_new(&self.level).unwrap_or_else(|_| EnvFilter::new("info")) }

    /// JSON lines written to `log_file` through a non-blocking appender.
    fn file_layer<S>(&self) -> Option<impl Layer<S> + Send + Sync>
    where
        S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    {
        let log_file = Path::new(self.log_file.as_deref()?);
        let directory = match log_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let file_name = log_file.file_name()?;

        let appender = tracing_appender::rolling::daily(directory, file_name);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        // Only the first subscriber can become global, later guards are not needed.
        let _ = FILE_GUARD.set(guard);

        Some(
            fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(writer),
        )
    }

    /// Build the tracing subscriber from this configuration.
    pub fn build(&self) -> Box<dyn tracing::Subscriber + Send + Sync> {
        match self.format.as_str() {
            "pretty" => self.build_pretty_subscriber(),
            "compact" => self.build_compact_subscriber(),
            _ => self.build_json_subscriber(),
        }
    }

    /// Build a JSON subscriber for production logging.
    fn build_json_subscriber(&self) -> Box<dyn tracing::Subscriber + Send + Sync> {
        let stdout = fmt::layer()
            .json()
            .with_timer(fmt::time::UtcTime::rfc_3339());
        Box::new(
            Registry::default()
                .with(self.filter())
                .with(stdout)
                .with(self.file_layer()),
        )
    }

    /// Build a pretty subscriber for development logging.
    fn build_pretty_subscriber(&self) -> Box<dyn tracing::Subscriber + Send + Sync> {
        let stdout = fmt::layer()
            .pretty()
            .with_timer(fmt::time::UtcTime::rfc_3339());
        Box::new(
            Registry::default()
                .with(self.filter())
                .with(stdout)
                .with(self.file_layer()),
        )
    }

    /// Build a compact subscriber for testing.
    fn build_compact_subscriber(&self) -> Box<dyn tracing::Subscriber + Send + Sync> {
        let stdout = fmt::layer()
            .compact()
            .with_timer(fmt::time::UtcTime::rfc_3339());
        Box::new(
            Registry::default()
                .with(self.filter())
                .with(stdout)
                .with(self.file_layer()),
        )
    }
}

//! # Database Configuration
//!
//! Resolves the database URL for the CLI from `PORTFOLIO_DATABASE_URL` or
//! from the individual `PORTFOLIO_DATABASE_*` settings.

use std::net::SocketAddr;

use error::AppError;

/// Database configuration for CLI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Full connection URL; takes precedence over the parts below
    pub url:      Option<String>,
    /// Database host address
    pub host:     String,
    /// Database port number
    pub port:     u16,
    /// Database name
    pub database: String,
    /// Database username
    pub username: String,
    /// Database password
    pub password: String,
    /// SSL mode
    pub ssl_mode: String,
}

/// Errors that can occur when parsing database configuration.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseConfigError {
    /// The port number could not be parsed as a valid number.
    #[error("Invalid port number: {value}")]
    InvalidPort {
        /// The invalid port value that was provided.
        value: String,
    },
}

impl From<DatabaseConfigError> for AppError {
    fn from(err: DatabaseConfigError) -> Self { AppError::config(err.to_string()) }
}

impl DatabaseConfig {
    /// Creates a new DatabaseConfig from environment variables.
    ///
    /// Returns `Err` if any environment variable has an invalid format.
    pub fn from_env() -> Result<Self, DatabaseConfigError> { Self::from_lookup(|name| std::env::var(name).ok()) }

    /// Builds the configuration from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DatabaseConfigError> {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_owned());

        let port_str = var("PORTFOLIO_DATABASE_PORT", "5432");
        let port = port_str.trim().parse::<u16>().map_err(|_e| {
            DatabaseConfigError::InvalidPort {
                value: port_str.clone(),
            }
        })?;

        Ok(Self {
            url: lookup("PORTFOLIO_DATABASE_URL").filter(|url| !url.trim().is_empty()),
            host: var("PORTFOLIO_DATABASE_HOST", "localhost"),
            port,
            database: var("PORTFOLIO_DATABASE_NAME", "portfolio"),
            username: var("PORTFOLIO_DATABASE_USER", "portfolio"),
            password: var("PORTFOLIO_DATABASE_PASSWORD", ""),
            ssl_mode: var("PORTFOLIO_DATABASE_SSL_MODE", "prefer"),
        })
    }

    /// The URL to connect with.
    pub fn database_url(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => build_database_url(self),
        }
    }
}

/// Builds a PostgreSQL URL from the individual settings
///
/// # Arguments
///
/// * `config` - The database configuration to use
///
/// # Returns
///
/// A PostgreSQL connection URL string.
pub fn build_database_url(config: &DatabaseConfig) -> String {
    let encoded_username = percent_encode_userinfo(&config.username);
    let encoded_password = percent_encode_userinfo(&config.password);
    format!(
        "postgres://{}:{}@{}:{}/{}?sslmode={}",
        encoded_username, encoded_password, config.host, config.port, config.database, config.ssl_mode
    )
}

/// Percent-encodes everything outside the unreserved set, byte by byte.
fn percent_encode_userinfo(s: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";

    let mut result = String::with_capacity(s.len().saturating_mul(3));
    for byte in s.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            result.push(byte as char);
        }
        else {
            result.push('%');
            result.push(HEX[usize::from(byte >> 4)] as char);
            result.push(HEX[usize::from(byte & 0x0F)] as char);
        }
    }
    result
}

/// Credentials replaced with `***`, for logging.
pub fn redact_database_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => format!("{}://***{}", &url[.. scheme_end], &url[at ..]),
        _ => url.to_string(),
    }
}

/// Parses a host and port into a SocketAddr.
///
/// # Arguments
///
/// * `host` - The host string to parse
/// * `port` - The port number
///
/// # Returns
///
/// A `Result` containing the parsed `SocketAddr` or an error if parsing fails.
pub fn parse_socket_addr(host: &str, port: u16) -> Result<SocketAddr, std::net::AddrParseError> {
    // IPv6 addresses must be wrapped in brackets when appending a port
    let addr_str = if host.contains(':') && !host.starts_with('[') {
        format!("[{}]:{}", host, port)
    }
    else {
        format!("{}:{}", host, port)
    };
    addr_str.parse()
}

//! # Portfolio API Server
//!
//! Axum-based HTTP server for the project portfolio.
//!
//! ## Modules
//!
//! - [`dto`]: Request/response data transfer objects
//! - [`services`]: Persistence-facing services behind the handlers
//! - [`handlers`]: REST and account endpoints
//! - [`middleware`]: Session authentication, request ids, security headers
//! - [`router`]: Route table

use std::{sync::Arc, time::Instant};

use auth::{PasswordConfig, SessionConfig};

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod services;
pub mod utils;

pub use error::{AppError, Result};
pub use router::create_app_router;

/// Application state shared across request handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection pool
    pub db:              sea_orm::DbConn,
    /// Session cookie and token settings
    pub session_config:  Arc<SessionConfig>,
    /// Argon2id cost parameters for new password hashes
    pub password_config: PasswordConfig,
    /// Server start time for uptime calculation
    pub start_time:      Instant,
}

impl AppState {
    pub fn new(db: sea_orm::DbConn, session_config: SessionConfig) -> Self {
        Self {
            db,
            session_config: Arc::new(session_config),
            password_config: PasswordConfig::default(),
            start_time: Instant::now(),
        }
    }

    /// Replaces the password hashing parameters.
    #[must_use]
    pub fn with_password_config(mut self, password_config: PasswordConfig) -> Self {
        self.password_config = password_config;
        self
    }
}

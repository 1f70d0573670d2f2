//! # Portfolio Error Infrastructure
//!
//! Error types and API response handling for the portfolio service.

pub mod codes;
pub mod middleware;
pub mod rejection;
pub mod response;
pub mod traits;

pub use codes::{ErrorCategory, FieldError};
pub use middleware::ErrorHandler;
pub use response::ApiResponse;
pub use traits::ResultExt;

/// Convenience type alias for Result with AppError.
pub type Result<T, E = AppError> = std::result::Result<T, E>;

/// Main application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("NotFound: {message}")]
    NotFound {
        message: String,
    },

    #[error("BadRequest: {message}")]
    BadRequest {
        message: String,
    },

    /// The id in the URL path and the id in the request body disagree.
    #[error("IdMismatch: path id {path_id} does not match body id {body_id}")]
    IdMismatch {
        path_id: i32,
        body_id: i32,
    },

    #[error("Validation: {message}")]
    Validation {
        message: String,
        fields:  Vec<FieldError>,
    },

    #[error("Unauthorized: {message}")]
    Unauthorized {
        message: String,
    },

    #[error("Forbidden: {message}")]
    Forbidden {
        message: String,
    },

    #[error("Conflict: {message}")]
    Conflict {
        message: String,
    },

    #[error("Internal: {message}")]
    Internal {
        message: String,
    },

    #[error("Database: {message}")]
    Database {
        message: String,
    },

    #[error("IO: {message}")]
    Io {
        message: String,
    },

    #[error("Config: {message}")]
    Config {
        message: String,
    },

    #[error("Migration: {message}")]
    Migration {
        message: String,
    },
}

impl AppError {
    /// Create a not found error.
    #[inline]
    pub fn not_found(resource: impl ToString) -> Self {
        Self::NotFound {
            message: resource.to_string(),
        }
    }

    /// Create a bad request error.
    #[inline]
    pub fn bad_request(message: impl ToString) -> Self {
        Self::BadRequest {
            message: message.to_string(),
        }
    }

    /// Create an id mismatch error.
    #[inline]
    pub fn id_mismatch(path_id: i32, body_id: i32) -> Self {
        Self::IdMismatch {
            path_id,
            body_id,
        }
    }

    /// Create a validation error without field details.
    #[inline]
    pub fn validation(message: impl ToString) -> Self {
        Self::Validation {
            message: message.to_string(),
            fields:  Vec::new(),
        }
    }

    /// Create an unauthorized error.
    #[inline]
    pub fn unauthorized(message: impl ToString) -> Self {
        Self::Unauthorized {
            message: message.to_string(),
        }
    }

    /// Create a forbidden error.
    #[inline]
    pub fn forbidden(message: impl ToString) -> Self {
        Self::Forbidden {
            message: message.to_string(),
        }
    }

    /// Create a conflict error.
    #[inline]
    pub fn conflict(message: impl ToString) -> Self {
        Self::Conflict {
            message: message.to_string(),
        }
    }

    /// Create an internal error.
    #[inline]
    pub fn internal(message: impl ToString) -> Self {
        Self::Internal {
            message: message.to_string(),
        }
    }

    /// Create a database error.
    #[inline]
    pub fn database(message: impl ToString) -> Self {
        Self::Database {
            message: message.to_string(),
        }
    }

    /// Create a config error.
    #[inline]
    pub fn config(message: impl ToString) -> Self {
        Self::Config {
            message: message.to_string(),
        }
    }

    /// Create a migration error.
    #[inline]
    pub fn migration(message: impl ToString) -> Self {
        Self::Migration {
            message: message.to_string(),
        }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> http::StatusCode {
        match self {
            AppError::NotFound {
                ..
            } => http::StatusCode::NOT_FOUND,
            AppError::BadRequest {
                ..
            } |
            AppError::IdMismatch {
                ..
            } |
            AppError::Validation {
                ..
            } => http::StatusCode::BAD_REQUEST,
            AppError::Unauthorized {
                ..
            } => http::StatusCode::UNAUTHORIZED,
            AppError::Forbidden {
                ..
            } => http::StatusCode::FORBIDDEN,
            AppError::Conflict {
                ..
            } => http::StatusCode::CONFLICT,
            AppError::Internal {
                ..
            } |
            AppError::Database {
                ..
            } |
            AppError::Io {
                ..
            } |
            AppError::Config {
                ..
            } |
            AppError::Migration {
                ..
            } => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound {
                ..
            } => "NOT_FOUND",
            AppError::BadRequest {
                ..
            } => "BAD_REQUEST",
            AppError::IdMismatch {
                ..
            } => "ID_MISMATCH",
            AppError::Validation {
                ..
            } => "VALIDATION_ERROR",
            AppError::Unauthorized {
                ..
            } => "UNAUTHORIZED",
            AppError::Forbidden {
                ..
            } => "FORBIDDEN",
            AppError::Conflict {
                ..
            } => "CONFLICT",
            AppError::Internal {
                ..
            } => "INTERNAL_ERROR",
            AppError::Database {
                ..
            } => "DATABASE_ERROR",
            AppError::Io {
                ..
            } => "IO_ERROR",
            AppError::Config {
                ..
            } => "CONFIG_ERROR",
            AppError::Migration {
                ..
            } => "MIGRATION_ERROR",
        }
    }

    /// Get the error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::Validation {
                ..
            } |
            AppError::IdMismatch {
                ..
            } => ErrorCategory::Validation,
            AppError::Unauthorized {
                ..
            } => ErrorCategory::Authentication,
            AppError::Forbidden {
                ..
            } => ErrorCategory::Authorization,
            AppError::Database {
                ..
            } |
            AppError::Migration {
                ..
            } => ErrorCategory::Database,
            AppError::NotFound {
                ..
            } |
            AppError::BadRequest {
                ..
            } |
            AppError::Conflict {
                ..
            } => ErrorCategory::Client,
            AppError::Internal {
                ..
            } |
            AppError::Io {
                ..
            } |
            AppError::Config {
                ..
            } => ErrorCategory::Server,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::IdMismatch {
                path_id,
                body_id,
            } => format!("ID mismatch: path id {} does not match body id {}", path_id, body_id),
            AppError::NotFound {
                message,
            } |
            AppError::BadRequest {
                message,
            } |
            AppError::Validation {
                message,
                ..
            } |
            AppError::Unauthorized {
                message,
            } |
            AppError::Forbidden {
                message,
            } |
            AppError::Conflict {
                message,
            } |
            AppError::Internal {
                message,
            } |
            AppError::Database {
                message,
            } |
            AppError::Io {
                message,
            } |
            AppError::Config {
                message,
            } |
            AppError::Migration {
                message,
            } => message.clone(),
        }
    }

    /// Field-level details for validation errors.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            AppError::Validation {
                fields,
                ..
            } => fields,
            _ => &[],
        }
    }

    /// Maps a failed insert, update or delete. Foreign-key violations become
    /// `on_foreign_key`, every other failure stays a database error.
    pub fn from_write_error(err: sea_orm::DbErr, on_foreign_key: impl FnOnce() -> AppError) -> Self {
        if is_foreign_key_violation(&err) {
            on_foreign_key()
        }
        else {
            Self::from(err)
        }
    }

    /// Add context to the error.
    #[inline]
    pub fn context(self, context: impl ToString) -> Self {
        let context_msg = context.to_string();
        let prefixed = |message: String| format!("{}: {}", context_msg, message);
        match self {
            AppError::NotFound {
                message,
            } => Self::NotFound {
                message: prefixed(message),
            },
            AppError::BadRequest {
                message,
            } => Self::BadRequest {
                message: prefixed(message),
            },
            AppError::IdMismatch {
                ..
            } => self,
            AppError::Validation {
                message,
                fields,
            } => Self::Validation {
                message: prefixed(message),
                fields,
            },
            AppError::Unauthorized {
                message,
            } => Self::Unauthorized {
                message: prefixed(message),
            },
            AppError::Forbidden {
                message,
            } => Self::Forbidden {
                message: prefixed(message),
            },
            AppError::Conflict {
                message,
            } => Self::Conflict {
                message: prefixed(message),
            },
            AppError::Internal {
                message,
            } => Self::Internal {
                message: prefixed(message),
            },
            AppError::Database {
                message,
            } => Self::Database {
                message: prefixed(message),
            },
            AppError::Io {
                message,
            } => Self::Io {
                message: prefixed(message),
            },
            AppError::Config {
                message,
            } => Self::Config {
                message: prefixed(message),
            },
            AppError::Migration {
                message,
            } => Self::Migration {
                message: prefixed(message),
            },
        }
    }
}

/// Returns true when the database rejected a write because of a foreign key.
///
/// Covers both directions: deleting a row that is still referenced under a
/// restrict rule, and inserting or updating a row that points at nothing.
pub fn is_foreign_key_violation(err: &sea_orm::DbErr) -> bool {
    if let Some(sea_orm::SqlErr::ForeignKeyConstraintViolation(_)) = err.sql_err() {
        return true;
    }
    let text = err.to_string().to_lowercase();
    text.contains("foreign key constraint") || text.contains("violates foreign key")
}

/// Convert anyhow errors to AppError.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal {
            message: err.to_string(),
        }
    }
}

/// Convert std::io errors to AppError.
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
        }
    }
}

/// Convert Sea-ORM database errors to AppError.
impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database {
            message: err.to_string(),
        }
    }
}

/// Convert validator validation errors to AppError, keeping one entry per
/// failing field rule.
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        let fields = FieldError::from_validation_errors(&err);

        let message = if fields.is_empty() {
            "Validation failed".to_string()
        }
        else {
            fields
                .iter()
                .map(|f| f.message.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };

        Self::Validation {
            message,
            fields,
        }
    }
}

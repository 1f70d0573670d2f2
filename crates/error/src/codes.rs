//! # Error Codes
//!
//! Error categories and field-level validation details.

use serde::{Deserialize, Serialize};

/// Error categories for grouping errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Client,
    Server,
    Authentication,
    Authorization,
    Validation,
    Database,
}

impl ErrorCategory {
    /// Whether errors of this category are worth an error-level log line.
    pub fn should_log(&self) -> bool { matches!(self, ErrorCategory::Server | ErrorCategory::Database) }
}

/// A single failing validation rule on a request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field name as it appears in the request body
    pub field:   String,
    /// Human readable message
    pub message: String,
    /// Rule that failed (`length`, `email`, ...)
    pub code:    String,
}

impl FieldError {
    pub fn new(field: impl ToString, message: impl ToString) -> Self {
        Self {
            field:   field.to_string(),
            message: message.to_string(),
            code:    "invalid".to_string(),
        }
    }

    pub fn with_code(mut self, code: impl ToString) -> Self {
        self.code = code.to_string();
        self
    }

    /// Flattens validator output into one entry per failing rule, sorted by
    /// field name so responses are stable.
    pub fn from_validation_errors(errors: &validator::ValidationErrors) -> Vec<Self> {
        let mut fields: Vec<Self> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field));
                    FieldError::new(field, message).with_code(&e.code)
                })
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        fields
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}: {}", self.field, self.message) }
}

//! # Rejection Handlers
//!
//! Converts Axum extractor rejections into [`AppError`] so malformed bodies,
//! paths and forms come back in the standard error format with status 400.

use axum::extract::rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection};

use crate::AppError;

/// Turns a serde message like "missing field `name` at line 1 column 2" into
/// "Missing required field: name".
pub fn friendly_message(error_message: String) -> String {
    if let Some(start) = error_message.find("missing field `") {
        let rest = &error_message[start + 15 ..];
        if let Some(end) = rest.find('`') {
            return format!("Missing required field: {}", &rest[.. end]);
        }
    }
    error_message
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self { AppError::bad_request(friendly_message(rejection.body_text())) }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self { AppError::bad_request(friendly_message(rejection.body_text())) }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::bad_request(format!("Invalid path parameter: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::bad_request(format!(
            "Query string deserialization error: {}",
            rejection.body_text()
        ))
    }
}

//! # Error Response Conversion
//!
//! Turns [`AppError`] values into JSON HTTP responses.
//!
//! ## Usage
//!
//! ```rust
//! use error::{middleware::ErrorHandler, AppError};
//!
//! let handler = ErrorHandler::new(false);
//! let error = AppError::not_found("Manager not found");
//! let response = handler.to_response(&error);
//! assert_eq!(response.status(), 404);
//! ```

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::{response::ApiResponse, AppError};

/// Error handler that converts errors to HTTP responses.
#[derive(Clone, Debug, Default)]
pub struct ErrorHandler {
    /// Whether to expose messages of server-side errors to the client.
    pub include_details: bool,
}

impl ErrorHandler {
    /// Create a new error handler.
    #[inline]
    pub fn new(include_details: bool) -> Self {
        Self {
            include_details,
        }
    }

    /// Convert an error to a response.
    pub fn to_response(&self, err: &AppError) -> Response {
        let status = err.status();
        let code = err.code();

        if err.category().should_log() {
            tracing::error!(code = %code, error = %err, "Request failed");
        }
        else {
            tracing::debug!(code = %code, error = %err, "Request rejected");
        }

        let message = if status.is_server_error() && !self.include_details {
            "Internal server error".to_string()
        }
        else {
            err.message()
        };

        let body = match err.field_errors() {
            [] => ApiResponse::<()>::error(code, message),
            fields => {
                ApiResponse::<()>::error_with_details(
                    code,
                    message,
                    serde_json::to_value(fields).unwrap_or_default(),
                )
            },
        };

        let mut response = (status, Json(body)).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static("Cookie"),
            );
        }

        response
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response { ErrorHandler::default().to_response(&self) }
}

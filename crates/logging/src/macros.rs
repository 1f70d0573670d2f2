//! # Logging Macros
//!
//! Convenience macros for structured logging with fixed targets.

/// Log a completed HTTP request with request ID, method, path, status and duration.
///
/// # Example
///
/// ```rust
/// use logging::{log_api_request, RequestId};
///
/// let request_id = RequestId::new();
/// log_api_request!(request_id, "GET", "/api/manager", 200, 4);
/// ```
#[macro_export]
macro_rules! log_api_request {
    ($request_id:expr, $method:expr, $path:expr, $status:expr, $duration:expr) => {
        $crate::info!(
            target: "api",
            request_id = %$request_id,
            method = %$method,
            path = %$path,
            status = %$status,
            duration_ms = %$duration,
            "API request"
        )
    };
}

/// Log an account event such as a sign-in or a password change.
#[macro_export]
macro_rules! log_auth_event {
    ($event:expr, $user:expr, $success:expr) => {
        $crate::info!(
            target: "auth",
            event = %$event,
            user = %$user,
            success = $success,
            "Authentication event"
        )
    };
}

/// Log a security-relevant event such as a rejected redirect target.
#[macro_export]
macro_rules! log_security_event {
    ($event:expr, $user:expr, $details:expr) => {
        $crate::warn!(
            target: "security",
            event = %$event,
            user = %$user,
            details = %$details,
            "Security event"
        )
    };
}

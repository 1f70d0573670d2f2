//! Helpers shared by handlers and middleware: redirect target checks, the
//! session cookie and request metadata.

use auth::SessionConfig;
use axum::http::{header, HeaderMap, HeaderValue};

use crate::{services::sessions::ClientInfo, AppError, Result};

/// Whether `url` stays on this site and is safe to redirect to after sign-in.
///
/// Accepts `/path` but not `//host` or `/\host`, and `~/path`.
pub fn is_local_url(url: &str) -> bool {
    if url.is_empty() || url.chars().any(char::is_control) {
        return false;
    }

    let bytes = url.as_bytes();
    match bytes {
        [b'/'] => true,
        [b'/', second, ..] => *second != b'/' && *second != b'\\',
        [b'~', b'/', rest @ ..] => !matches!(rest.first(), Some(b'/' | b'\\')),
        _ => false,
    }
}

/// `Set-Cookie` value carrying a session token. Only persistent sessions get
/// a `Max-Age`; the others end with the browser session.
pub fn session_cookie(config: &SessionConfig, token: &str, max_age_seconds: Option<i64>) -> Result<HeaderValue> {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        config.cookie_name, token
    );
    if let Some(max_age) = max_age_seconds {
        cookie.push_str(&format!("; Max-Age={}", max_age.max(0)));
    }
    if config.secure_cookie {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie).map_err(|e| AppError::internal(format!("Invalid session cookie: {}", e)))
}

/// `Set-Cookie` value that removes the session cookie.
pub fn expired_session_cookie(config: &SessionConfig) -> Result<HeaderValue> { session_cookie(config, "", Some(0)) }

/// Value of the named cookie from the request's `Cookie` headers.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, value)| *key == name && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// User agent and client address recorded with a new session.
pub fn client_info(headers: &HeaderMap) -> ClientInfo {
    let value_of = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    };

    ClientInfo {
        user_agent: value_of(header::USER_AGENT.as_str()).map(|agent| agent.chars().take(512).collect()),
        ip_address: value_of("x-forwarded-for")
            .and_then(|forwarded| forwarded.split(',').next())
            .or_else(|| value_of("x-real-ip"))
            .map(|ip| ip.trim().to_string()),
    }
}

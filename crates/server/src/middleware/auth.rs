//! # Session Authentication Middleware
//!
//! Resolves the session cookie to a signed-in user. API routes answer a
//! missing or stale session with 401 JSON; account pages redirect to the
//! login form and come back afterwards.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use error::AppError;
use serde_json::json;

use crate::{
    services::sessions::find_active_session,
    utils::read_cookie,
    AppState,
};

/// User information resolved from the session cookie
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Account ID
    pub id:         String,
    /// Email the session was issued for
    pub email:      String,
    /// Session row backing the cookie
    pub session_id: String,
}

/// Authentication middleware
///
/// 1. Reads the session cookie
/// 2. Validates the signed token
/// 3. Checks the session row is neither revoked nor expired
/// 4. Adds [`AuthenticatedUser`] to request extensions
pub async fn auth_middleware(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let outcome = authenticate(&state, request.headers()).await;
    match outcome {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        },
        Err(AppError::Unauthorized {
            message,
        }) => {
            tracing::debug!(path = %request.uri().path(), reason = %message, "Unauthenticated request");
            if request.uri().path().starts_with("/api/") {
                create_auth_error_response(&message)
            }
            else {
                redirect_to_login(request.uri())
            }
        },
        Err(other) => other.into_response(),
    }
}

async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<AuthenticatedUser, AppError> {
    let config = &state.session_config;

    let token = read_cookie(headers, &config.cookie_name)
        .ok_or_else(|| AppError::unauthorized("Authentication required"))?;

    let claims = auth::validate_token(config, &token).map_err(|e| {
        tracing::debug!(error = %e, "Rejected session token");
        AppError::unauthorized("Invalid or expired session")
    })?;

    let session = find_active_session(&state.db, &claims.jti)
        .await?
        .filter(|session| session.user_id == claims.sub)
        .ok_or_else(|| AppError::unauthorized("Session has ended"))?;

    Ok(AuthenticatedUser {
        id:         claims.sub,
        email:      claims.email,
        session_id: session.id,
    })
}

/// 303 to the login form, remembering where the user wanted to go.
fn redirect_to_login(uri: &Uri) -> Response {
    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    Redirect::to(&format!(
        "/account/login?returnUrl={}",
        urlencoding::encode(target)
    ))
    .into_response()
}

/// Create standardized authentication error response
fn create_auth_error_response(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Cookie")],
        Json(json!({
            "success": false,
            "code": "AUTHENTICATION_ERROR",
            "message": message
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_to_login_keeps_target() {
        let uri: Uri = "/account/settings?tab=email".parse().unwrap();
        let response = redirect_to_login(&uri);
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers()[header::LOCATION],
            "/account/login?returnUrl=%2Faccount%2Fsettings%3Ftab%3Demail"
        );
    }

    #[test]
    fn test_auth_error_response() {
        let response = create_auth_error_response("Authentication required");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Cookie");
    }
}

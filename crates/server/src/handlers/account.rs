//! # Account Handlers
//!
//! Browser account flows with form-encoded bodies. Success ends in a
//! `303 See Other` redirect; identity and form problems come back as
//! [`FormErrorResponse`] with status 200 so the page can show them.

use auth::secrecy::SecretString;
use axum::{
    extract::{
        rejection::{FormRejection, QueryRejection},
        Query,
        State,
    },
    http::{header, HeaderMap},
    response::{IntoResponse, Redirect, Response},
    Extension,
    Form,
    Json,
};
use entity::app_users;
use error::{rejection::friendly_message, AppError};
use logging::{log_auth_event, log_security_event};
use validator::Validate;

use crate::{
    dto::account::{
        ChangePasswordForm,
        FormErrorResponse,
        LoginForm,
        LoginQuery,
        ProfileResponse,
        RegisterForm,
        SettingsForm,
        SettingsResponse,
    },
    middleware::auth::AuthenticatedUser,
    services::{
        identity::{NewUser, ProfileUpdate},
        sessions,
        DbIdentityProvider,
        IdentityError,
        IdentityProvider,
    },
    utils::{client_info, expired_session_cookie, is_local_url, read_cookie, session_cookie},
    AppState,
    Result,
};

/// Where a successful sign-in lands when no usable return URL was given.
const HOME: &str = "/";

fn identity(state: &AppState) -> DbIdentityProvider {
    DbIdentityProvider::new(state.db.clone(), state.password_config.clone())
}

/// Unpacks a form body, or turns the rejection into a form error.
fn parse_form<T>(form: std::result::Result<Form<T>, FormRejection>) -> std::result::Result<T, Response> {
    form.map(|Form(value)| value).map_err(|rejection| {
        FormErrorResponse::single(friendly_message(rejection.body_text())).into_response()
    })
}

/// Identity problems become form errors; storage faults stay server errors.
fn identity_failure(err: IdentityError) -> Result<Response> {
    if err.is_internal() || matches!(err, IdentityError::UserNotFound) {
        Err(err.into())
    }
    else {
        Ok(FormErrorResponse::new(err.messages()).into_response())
    }
}

/// Starts a session for `user` and redirects with the session cookie set.
async fn sign_in(
    state: &AppState,
    headers: &HeaderMap,
    user: &app_users::Model,
    persistent: bool,
    target: &str,
) -> Result<Response> {
    let config = &state.session_config;
    let started = sessions::start_session(&state.db, config, user, persistent, client_info(headers)).await?;

    let max_age = persistent.then_some(config.persistent_expiration_seconds);
    let cookie = session_cookie(config, &started.token, max_age)?;

    Ok(([(header::SET_COOKIE, cookie)], Redirect::to(target)).into_response())
}

/// Maps an app-relative `~/path` to `/path`.
fn redirect_target(return_url: Option<&str>) -> Option<String> {
    let url = return_url?.trim();
    if !is_local_url(url) {
        return None;
    }
    Some(url.strip_prefix('~').unwrap_or(url).to_string())
}

/// `POST /account/register`
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    form: std::result::Result<Form<RegisterForm>, FormRejection>,
) -> Result<Response> {
    let form = match parse_form(form) {
        Ok(form) => form,
        Err(response) => return Ok(response),
    };
    if let Err(errors) = form.validate() {
        return Ok(FormErrorResponse::from(errors).into_response());
    }

    let new_user = NewUser {
        email:      form.email,
        name:       form.name,
        department: form.department,
        password:   SecretString::from(form.password),
    };
    let user = match identity(&state).register_user(new_user).await {
        Ok(user) => user,
        Err(err) => return identity_failure(err),
    };

    log_auth_event!("register", user.id, true);
    sign_in(&state, &headers, &user, false, HOME).await
}

/// `POST /account/login?returnUrl=`
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: std::result::Result<Query<LoginQuery>, QueryRejection>,
    form: std::result::Result<Form<LoginForm>, FormRejection>,
) -> Result<Response> {
    let Query(query) = query?;
    let form = match parse_form(form) {
        Ok(form) => form,
        Err(response) => return Ok(response),
    };
    if let Err(errors) = form.validate() {
        return Ok(FormErrorResponse::from(errors).into_response());
    }

    let password = SecretString::from(form.password);
    let user = match identity(&state).verify_credentials(&form.email, &password).await {
        Ok(user) => user,
        Err(IdentityError::InvalidCredentials) => {
            log_auth_event!("login", form.email, false);
            return Ok(FormErrorResponse::single("Invalid login attempt.").into_response());
        },
        Err(err) => return identity_failure(err),
    };

    let target = match redirect_target(query.return_url.as_deref()) {
        Some(target) => target,
        None => {
            if let Some(rejected) = query.return_url.as_deref() {
                log_security_event!("non_local_return_url", user.id, rejected);
            }
            HOME.to_string()
        },
    };

    log_auth_event!("login", user.id, true);
    sign_in(&state, &headers, &user, form.remember_me, &target).await
}

/// `POST /account/logout`: ends the current session, if any, and clears the cookie.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Result<Response> {
    let config = &state.session_config;

    if let Some(token) = read_cookie(&headers, &config.cookie_name) &&
        let Ok(claims) = auth::validate_token(config, &token)
    {
        sessions::revoke_session(&state.db, &claims.jti).await?;
        log_auth_event!("logout", claims.sub, true);
    }

    let cookie = expired_session_cookie(config)?;
    Ok(([(header::SET_COOKIE, cookie)], Redirect::to(HOME)).into_response())
}

async fn current_user(state: &AppState, user: &AuthenticatedUser) -> Result<app_users::Model> {
    identity(state)
        .find_user(&user.id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))
}

/// `GET /account/profile`
pub async fn profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ProfileResponse>> {
    let account = current_user(&state, &user).await?;
    Ok(Json(account.into()))
}

/// `GET /account/settings`
pub async fn settings(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<SettingsResponse>> {
    let account = current_user(&state, &user).await?;
    Ok(Json(account.into()))
}

/// `POST /account/settings`
pub async fn update_settings(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    form: std::result::Result<Form<SettingsForm>, FormRejection>,
) -> Result<Response> {
    let form = match parse_form(form) {
        Ok(form) => form,
        Err(response) => return Ok(response),
    };
    if let Err(errors) = form.validate() {
        return Ok(FormErrorResponse::from(errors).into_response());
    }

    let update = ProfileUpdate {
        name:       form.name,
        email:      form.email,
        department: form.department,
    };
    if let Err(err) = identity(&state).update_profile(&user.id, update).await {
        return identity_failure(err);
    }

    Ok(Redirect::to("/account/profile").into_response())
}

/// `POST /account/changepassword`: other sessions of the user are signed out.
pub async fn change_password(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    form: std::result::Result<Form<ChangePasswordForm>, FormRejection>,
) -> Result<Response> {
    let form = match parse_form(form) {
        Ok(form) => form,
        Err(response) => return Ok(response),
    };
    if let Err(errors) = form.validate() {
        return Ok(FormErrorResponse::from(errors).into_response());
    }

    let current = SecretString::from(form.current_password);
    let new = SecretString::from(form.new_password);
    if let Err(err) = identity(&state).change_password(&user.id, &current, &new).await {
        log_auth_event!("change_password", user.id, false);
        return identity_failure(err);
    }

    sessions::revoke_other_sessions(&state.db, &user.id, &user.session_id).await?;
    log_auth_event!("change_password", user.id, true);
    Ok(Redirect::to("/account/settings").into_response())
}

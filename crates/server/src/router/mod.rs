//! # API Router Configuration
//!
//! Configures the REST, account and service routes of the portfolio server.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{
    handlers::{account, crud, dashboard, related, service},
    middleware::{
        auth::auth_middleware,
        request_id::request_id_middleware,
        security_headers::security_headers_middleware,
    },
    services::{CrudService, ManagerService, ProjectService, TeamMemberService},
    AppState,
};

/// Adds the five REST routes of one resource under `/api/{resource}`.
fn resource_routes<S: CrudService>(router: Router<AppState>) -> Router<AppState> {
    let collection = format!("/api/{}", S::RESOURCE);
    let item = format!("{}/:id", collection);

    router
        .route(&collection, get(crud::list::<S>).post(crud::create::<S>))
        .route(
            &item,
            get(crud::get_one::<S>)
                .put(crud::update::<S>)
                .delete(crud::delete::<S>),
        )
}

/// Routes reachable without a session
fn public_routes() -> Router<AppState> {
    let router = Router::new()
        .route("/", get(service::index))
        .route("/health", get(service::health))
        .route("/api/manager/:id/projects", get(related::manager_projects))
        .route("/account/register", post(account::register))
        .route("/account/login", post(account::login))
        .route("/account/logout", post(account::logout));

    resource_routes::<ManagerService>(router)
}

/// Routes behind the session cookie
fn protected_routes(state: &AppState) -> Router<AppState> {
    let router = Router::new()
        .route("/api/project/:id/teammembers", get(related::project_team_members))
        .route("/api/dashboard", get(dashboard::dashboard))
        .route("/account/profile", get(account::profile))
        .route(
            "/account/settings",
            get(account::settings).post(account::update_settings),
        )
        .route("/account/changepassword", post(account::change_password));

    resource_routes::<TeamMemberService>(resource_routes::<ProjectService>(router))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
}

/// Creates the main application router
///
/// # Arguments
///
/// * `state` - Application state containing the DB pool and session settings
///
/// # Returns
///
/// Router with every route, request-id logging and security headers
pub fn create_app_router(state: AppState) -> Router {
    public_routes()
        .merge(protected_routes(&state))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

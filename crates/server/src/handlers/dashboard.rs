//! # Dashboard Handler

use axum::{extract::State, Extension, Json};
use error::AppError;

use crate::{
    dto::dashboard::DashboardResponse,
    middleware::auth::AuthenticatedUser,
    services::{DashboardService, DbIdentityProvider, IdentityProvider},
    AppState,
    Result,
};

/// `GET /api/dashboard`
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<DashboardResponse>> {
    let account = DbIdentityProvider::new(state.db.clone(), state.password_config.clone())
        .find_user(&user.id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    let summary = DashboardService::new(state.db).summary(&account).await?;
    Ok(Json(summary))
}

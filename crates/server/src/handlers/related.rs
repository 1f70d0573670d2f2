//! # Related Collection Handlers

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};

use crate::{
    dto::{ProjectDto, TeamMemberDto},
    services::{CrudService, ManagerService, ProjectService},
    AppState,
    Result,
};

/// `GET /api/manager/:id/projects`
pub async fn manager_projects(
    State(state): State<AppState>,
    path: std::result::Result<Path<i32>, PathRejection>,
) -> Result<Json<Vec<ProjectDto>>> {
    let Path(id) = path?;
    Ok(Json(ManagerService::new(state.db).projects(id).await?))
}

/// `GET /api/project/:id/teammembers`
pub async fn project_team_members(
    State(state): State<AppState>,
    path: std::result::Result<Path<i32>, PathRejection>,
) -> Result<Json<Vec<TeamMemberDto>>> {
    let Path(id) = path?;
    Ok(Json(ProjectService::new(state.db).team_members(id).await?))
}

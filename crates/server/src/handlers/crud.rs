//! # Resource Handlers
//!
//! One set of handlers serves `/api/manager`, `/api/project` and
//! `/api/teammember`; the service type parameter picks the resource.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path,
        State,
    },
    http::{header, StatusCode},
    Json,
};
use validator::Validate;

use crate::{dto::ResourceDto, services::CrudService, AppState, Result};

/// `GET /api/{resource}`
pub async fn list<S: CrudService>(State(state): State<AppState>) -> Result<Json<Vec<S::Dto>>> {
    let items = S::new(state.db).list_all().await?;
    Ok(Json(items))
}

/// `GET /api/{resource}/:id`
pub async fn get_one<S: CrudService>(
    State(state): State<AppState>,
    path: std::result::Result<Path<i32>, PathRejection>,
) -> Result<Json<S::Dto>> {
    let Path(id) = path?;
    let item = S::new(state.db).get_by_id(id).await?;
    Ok(Json(item))
}

/// `POST /api/{resource}`: 201 with a `Location` pointing at the new record.
pub async fn create<S: CrudService>(
    State(state): State<AppState>,
    body: std::result::Result<Json<S::Dto>, JsonRejection>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<S::Dto>)> {
    let Json(dto) = body?;
    dto.validate()?;

    let created = S::new(state.db).create(dto).await?;
    let location = format!("/api/{}/{}", S::RESOURCE, created.id());

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

/// `PUT /api/{resource}/:id`
pub async fn update<S: CrudService>(
    State(state): State<AppState>,
    path: std::result::Result<Path<i32>, PathRejection>,
    body: std::result::Result<Json<S::Dto>, JsonRejection>,
) -> Result<StatusCode> {
    let Path(id) = path?;
    let Json(dto) = body?;
    dto.validate()?;

    S::new(state.db).update(id, dto).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /api/{resource}/:id`
pub async fn delete<S: CrudService>(
    State(state): State<AppState>,
    path: std::result::Result<Path<i32>, PathRejection>,
) -> Result<StatusCode> {
    let Path(id) = path?;
    S::new(state.db).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

//! # Project Service

use async_trait::async_trait;
use entity::{projects, team_members, Projects, TeamMembers};
use error::AppError;
use sea_orm::{ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::info;

use super::{ensure_ids_match, CrudService};
use crate::{
    dto::{ProjectDto, TeamMemberDto},
    Result,
};

pub struct ProjectService {
    db: DbConn,
}

fn unknown_manager(manager_id: i32) -> AppError { AppError::bad_request(format!("Manager {} does not exist", manager_id)) }

impl ProjectService {
    async fn find(&self, id: i32) -> Result<projects::Model> {
        Projects::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Project {} not found", id)))
    }

    /// Team members assigned to a project.
    pub async fn team_members(&self, id: i32) -> Result<Vec<TeamMemberDto>> {
        self.find(id).await?;

        let members = TeamMembers::find()
            .filter(team_members::Column::ProjectId.eq(id))
            .order_by_asc(team_members::Column::Id)
            .all(&self.db)
            .await?;

        Ok(members.into_iter().map(TeamMemberDto::from).collect())
    }
}

#[async_trait]
impl CrudService for ProjectService {
    type Dto = ProjectDto;

    const RESOURCE: &'static str = "project";

    fn new(db: DbConn) -> Self {
        Self {
            db,
        }
    }

    async fn list_all(&self) -> Result<Vec<ProjectDto>> {
        let projects = Projects::find().all(&self.db).await?;
        Ok(projects.into_iter().map(ProjectDto::from).collect())
    }

    async fn get_by_id(&self, id: i32) -> Result<ProjectDto> { self.find(id).await.map(ProjectDto::from) }

    async fn create(&self, dto: ProjectDto) -> Result<ProjectDto> {
        let manager_id = dto.manager_id;
        let created = dto
            .into_active_model()
            .insert(&self.db)
            .await
            .map_err(|e| AppError::from_write_error(e, || unknown_manager(manager_id)))?;

        info!(project_id = %created.id, manager_id = %manager_id, "Project created");
        Ok(created.into())
    }

    async fn update(&self, id: i32, dto: ProjectDto) -> Result<()> {
        ensure_ids_match(id, dto.id)?;
        self.find(id).await?;

        let manager_id = dto.manager_id;
        let mut model = dto.into_active_model();
        model.id = Set(id);
        model
            .update(&self.db)
            .await
            .map_err(|e| AppError::from_write_error(e, || unknown_manager(manager_id)))?;

        info!(project_id = %id, "Project updated");
        Ok(())
    }

    /// Removes the project together with its team members.
    async fn delete(&self, id: i32) -> Result<()> {
        let result = Projects::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found(format!("Project {} not found", id)));
        }

        info!(project_id = %id, "Project deleted");
        Ok(())
    }
}

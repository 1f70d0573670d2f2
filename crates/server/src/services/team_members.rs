//! # Team Member Service

use async_trait::async_trait;
use entity::{team_members, TeamMembers};
use error::AppError;
use sea_orm::{ActiveModelTrait, DbConn, EntityTrait, Set};
use tracing::info;

use super::{ensure_ids_match, CrudService};
use crate::{dto::TeamMemberDto, Result};

pub struct TeamMemberService {
    db: DbConn,
}

fn unknown_project(project_id: i32) -> AppError { AppError::bad_request(format!("Project {} does not exist", project_id)) }

impl TeamMemberService {
    async fn find(&self, id: i32) -> Result<team_members::Model> {
        TeamMembers::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Team member {} not found", id)))
    }
}

#[async_trait]
impl CrudService for TeamMemberService {
    type Dto = TeamMemberDto;

    const RESOURCE: &'static str = "teammember";

    fn new(db: DbConn) -> Self {
        Self {
            db,
        }
    }

    async fn list_all(&self) -> Result<Vec<TeamMemberDto>> {
        let members = TeamMembers::find().all(&self.db).await?;
        Ok(members.into_iter().map(TeamMemberDto::from).collect())
    }

    async fn get_by_id(&self, id: i32) -> Result<TeamMemberDto> { self.find(id).await.map(TeamMemberDto::from) }

    async fn create(&self, dto: TeamMemberDto) -> Result<TeamMemberDto> {
        let project_id = dto.project_id;
        let created = dto
            .into_active_model()
            .insert(&self.db)
            .await
            .map_err(|e| AppError::from_write_error(e, || unknown_project(project_id)))?;

        info!(team_member_id = %created.id, project_id = %project_id, "Team member created");
        Ok(created.into())
    }

    async fn update(&self, id: i32, dto: TeamMemberDto) -> Result<()> {
        ensure_ids_match(id, dto.id)?;
        self.find(id).await?;

        let project_id = dto.project_id;
        let mut model = dto.into_active_model();
        model.id = Set(id);
        model
            .update(&self.db)
            .await
            .map_err(|e| AppError::from_write_error(e, || unknown_project(project_id)))?;

        info!(team_member_id = %id, "Team member updated");
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<()> {
        let result = TeamMembers::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found(format!("Team member {} not found", id)));
        }

        info!(team_member_id = %id, "Team member deleted");
        Ok(())
    }
}

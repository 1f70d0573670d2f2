//! # Manager Service

use async_trait::async_trait;
use entity::{managers, projects, Managers, Projects};
use error::AppError;
use sea_orm::{ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::info;

use super::{ensure_ids_match, CrudService};
use crate::{
    dto::{ManagerDto, ProjectDto},
    Result,
};

pub struct ManagerService {
    db: DbConn,
}

impl ManagerService {
    async fn find(&self, id: i32) -> Result<managers::Model> {
        Managers::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Manager {} not found", id)))
    }

    /// Projects owned by a manager.
    pub async fn projects(&self, id: i32) -> Result<Vec<ProjectDto>> {
        self.find(id).await?;

        let projects = Projects::find()
            .filter(projects::Column::ManagerId.eq(id))
            .order_by_asc(projects::Column::Id)
            .all(&self.db)
            .await?;

        Ok(projects.into_iter().map(ProjectDto::from).collect())
    }
}

#[async_trait]
impl CrudService for ManagerService {
    type Dto = ManagerDto;

    const RESOURCE: &'static str = "manager";

    fn new(db: DbConn) -> Self {
        Self {
            db,
        }
    }

    async fn list_all(&self) -> Result<Vec<ManagerDto>> {
        let managers = Managers::find().all(&self.db).await?;
        Ok(managers.into_iter().map(ManagerDto::from).collect())
    }

    async fn get_by_id(&self, id: i32) -> Result<ManagerDto> { self.find(id).await.map(ManagerDto::from) }

    async fn create(&self, dto: ManagerDto) -> Result<ManagerDto> {
        let created = dto.into_active_model().insert(&self.db).await?;
        info!(manager_id = %created.id, "Manager created");
        Ok(created.into())
    }

    async fn update(&self, id: i32, dto: ManagerDto) -> Result<()> {
        ensure_ids_match(id, dto.id)?;
        self.find(id).await?;

        let mut model = dto.into_active_model();
        model.id = Set(id);
        model.update(&self.db).await?;

        info!(manager_id = %id, "Manager updated");
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<()> {
        let result = Managers::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| {
                AppError::from_write_error(e, || {
                    AppError::conflict("Manager is still referenced by one or more projects")
                })
            })?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found(format!("Manager {} not found", id)));
        }

        info!(manager_id = %id, "Manager deleted");
        Ok(())
    }
}

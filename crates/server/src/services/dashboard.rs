//! # Dashboard Service

use entity::{app_users, projects, Managers, Projects, TeamMembers};
use error::ResultExt;
use sea_orm::{DbConn, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect};

use crate::{
    dto::{dashboard::DashboardResponse, ProjectDto},
    Result,
};

/// Number of projects listed on the dashboard.
pub const RECENT_PROJECTS: u64 = 5;

pub struct DashboardService {
    db: DbConn,
}

impl DashboardService {
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
        }
    }

    /// Portfolio counts plus the newest projects, personalised for `user`.
    pub async fn summary(&self, user: &app_users::Model) -> Result<DashboardResponse> {
        let project_count = Projects::find()
            .count(&self.db)
            .await
            .context("Failed to count projects")?;
        let team_member_count = TeamMembers::find()
            .count(&self.db)
            .await
            .context("Failed to count team members")?;
        let manager_count = Managers::find()
            .count(&self.db)
            .await
            .context("Failed to count managers")?;

        let recent_projects = Projects::find()
            .order_by_desc(projects::Column::StartDate)
            .order_by_desc(projects::Column::Id)
            .limit(RECENT_PROJECTS)
            .all(&self.db)
            .await?
            .into_iter()
            .map(ProjectDto::from)
            .collect();

        Ok(DashboardResponse {
            project_count,
            team_member_count,
            manager_count,
            user_name: user.name.clone(),
            department: user.department,
            recent_projects,
        })
    }
}

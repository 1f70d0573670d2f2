//! # Dashboard Response

use entity::Department;
use serde::{Deserialize, Serialize};

use super::ProjectDto;

/// Portfolio summary for the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub project_count:     u64,
    pub team_member_count: u64,
    pub manager_count:     u64,
    /// Display name of the signed-in user
    pub user_name:         String,
    pub department:        Department,
    /// Latest projects by start date, newest first
    pub recent_projects:   Vec<ProjectDto>,
}

//! # Services
//!
//! Persistence-facing operations behind the HTTP handlers. Each service owns
//! a cloned connection handle, so one is built per request.

use async_trait::async_trait;
use sea_orm::DbConn;

use crate::{dto::ResourceDto, Result};

pub mod dashboard;
pub mod identity;
pub mod managers;
pub mod projects;
pub mod sessions;
pub mod team_members;

pub use dashboard::DashboardService;
pub use identity::{DbIdentityProvider, IdentityError, IdentityProvider};
pub use managers::ManagerService;
pub use projects::ProjectService;
pub use team_members::TeamMemberService;

/// The five operations shared by every `/api/{resource}` endpoint.
///
/// Updates overwrite all mutable fields. Concurrent updates of the same
/// record are last-write-wins.
#[async_trait]
pub trait CrudService: Send + Sync + Sized + 'static {
    type Dto: ResourceDto;

    /// Route segment, e.g. `manager` for `/api/manager`.
    const RESOURCE: &'static str;

    fn new(db: DbConn) -> Self;

    /// Every record, in no guaranteed order.
    async fn list_all(&self) -> Result<Vec<Self::Dto>>;

    async fn get_by_id(&self, id: i32) -> Result<Self::Dto>;

    /// Persists `dto` ignoring its id and returns it with the assigned id.
    async fn create(&self, dto: Self::Dto) -> Result<Self::Dto>;

    /// Fails with `IdMismatch` before touching the store when `dto.id != id`,
    /// then with `NotFound` when the record does not exist.
    async fn update(&self, id: i32, dto: Self::Dto) -> Result<()>;

    async fn delete(&self, id: i32) -> Result<()>;
}

/// Shared id check of [`CrudService::update`].
#[inline]
pub(crate) fn ensure_ids_match(path_id: i32, body_id: i32) -> Result<()> {
    if path_id == body_id {
        Ok(())
    }
    else {
        Err(error::AppError::id_mismatch(path_id, body_id))
    }
}

//! # Service Tests
//!
//! CRUD semantics of the manager, project and team member services against
//! an in-memory SQLite database.

mod common;

use common::{manager_fixture, project_fixture, team_member_fixture, test_db};
use entity::{Department, Role};
use server::{
    services::{CrudService, ManagerService, ProjectService, TeamMemberService},
    AppError,
};

#[tokio::test]
async fn test_create_then_get_returns_input_with_assigned_id() {
    let db = test_db().await;
    let managers = ManagerService::new(db.clone());

    let input = manager_fixture("Ann", "ann@x.com", Department::Hr);
    let created = managers.create(input.clone()).await.unwrap();
    assert!(created.id > 0);

    let fetched = managers.get_by_id(created.id).await.unwrap();
    assert_eq!(fetched, created);
    assert_eq!(
        fetched,
        server::dto::ManagerDto {
            id: created.id,
            ..input
        }
    );
}

#[tokio::test]
async fn test_create_ignores_client_supplied_id() {
    let db = test_db().await;
    let managers = ManagerService::new(db.clone());

    let mut input = manager_fixture("Ann", "ann@x.com", Department::Hr);
    input.id = 42;
    let created = managers.create(input).await.unwrap();
    assert_eq!(created.id, 1);
}

#[tokio::test]
async fn test_missing_ids_yield_not_found() {
    let db = test_db().await;
    let managers = ManagerService::new(db.clone());
    let projects = ProjectService::new(db.clone());
    let members = TeamMemberService::new(db.clone());

    assert!(matches!(managers.get_by_id(7).await, Err(AppError::NotFound { .. })));
    assert!(matches!(projects.get_by_id(7).await, Err(AppError::NotFound { .. })));
    assert!(matches!(members.get_by_id(7).await, Err(AppError::NotFound { .. })));

    let mut manager = manager_fixture("Ann", "ann@x.com", Department::Hr);
    manager.id = 7;
    assert!(matches!(managers.update(7, manager).await, Err(AppError::NotFound { .. })));

    assert!(matches!(managers.delete(7).await, Err(AppError::NotFound { .. })));
    assert!(matches!(projects.delete(7).await, Err(AppError::NotFound { .. })));
    assert!(matches!(members.delete(7).await, Err(AppError::NotFound { .. })));
}

#[tokio::test]
async fn test_update_with_mismatched_id_leaves_store_untouched() {
    let db = test_db().await;
    let managers = ManagerService::new(db.clone());
    let created = managers
        .create(manager_fixture("Ann", "ann@x.com", Department::Hr))
        .await
        .unwrap();

    let mut changed = created.clone();
    changed.id = created.id + 1;
    changed.name = "Changed".to_string();

    let result = managers.update(created.id, changed).await;
    assert!(matches!(
        result,
        Err(AppError::IdMismatch { path_id, body_id }) if path_id == created.id && body_id == created.id + 1
    ));
    assert_eq!(managers.get_by_id(created.id).await.unwrap(), created);
}

#[tokio::test]
async fn test_id_mismatch_is_reported_before_existence() {
    let db = test_db().await;
    let projects = ProjectService::new(db);

    let mut dto = project_fixture("P1", 1);
    dto.id = 2;
    assert!(matches!(projects.update(99, dto).await, Err(AppError::IdMismatch { .. })));
}

#[tokio::test]
async fn test_update_overwrites_all_mutable_fields() {
    let db = test_db().await;
    let managers = ManagerService::new(db.clone());
    let projects = ProjectService::new(db.clone());

    let ann = managers
        .create(manager_fixture("Ann", "ann@x.com", Department::Hr))
        .await
        .unwrap();
    let bob = managers
        .create(manager_fixture("Bob", "bob@x.com", Department::It))
        .await
        .unwrap();
    let project = projects.create(project_fixture("P1", ann.id)).await.unwrap();

    let mut changed = project.clone();
    changed.name = "P1 renamed".to_string();
    changed.description = None;
    changed.manager_id = bob.id;
    projects.update(project.id, changed.clone()).await.unwrap();

    assert_eq!(projects.get_by_id(project.id).await.unwrap(), changed);
    assert!(managers.projects(ann.id).await.unwrap().is_empty());
    assert_eq!(managers.projects(bob.id).await.unwrap(), vec![changed]);
}

#[tokio::test]
async fn test_delete_then_get_yields_not_found() {
    let db = test_db().await;
    let managers = ManagerService::new(db);
    let created = managers
        .create(manager_fixture("Ann", "ann@x.com", Department::Hr))
        .await
        .unwrap();

    managers.delete(created.id).await.unwrap();
    assert!(matches!(managers.get_by_id(created.id).await, Err(AppError::NotFound { .. })));
}

#[tokio::test]
async fn test_deleting_referenced_manager_is_rejected() {
    let db = test_db().await;
    let managers = ManagerService::new(db.clone());
    let projects = ProjectService::new(db.clone());

    let ann = managers
        .create(manager_fixture("Ann", "ann@x.com", Department::Hr))
        .await
        .unwrap();
    assert_eq!(ann.id, 1);
    let p1 = projects.create(project_fixture("P1", 1)).await.unwrap();
    assert_eq!(p1.id, 1);

    assert!(matches!(managers.delete(1).await, Err(AppError::Conflict { .. })));
    assert!(managers.get_by_id(1).await.is_ok());
    assert_eq!(projects.get_by_id(1).await.unwrap().manager_id, 1);
}

#[tokio::test]
async fn test_deleting_project_cascades_to_team_members() {
    let db = test_db().await;
    let managers = ManagerService::new(db.clone());
    let projects = ProjectService::new(db.clone());
    let members = TeamMemberService::new(db.clone());

    let ann = managers
        .create(manager_fixture("Ann", "ann@x.com", Department::Hr))
        .await
        .unwrap();
    let project = projects.create(project_fixture("P1", ann.id)).await.unwrap();
    let other = projects.create(project_fixture("P2", ann.id)).await.unwrap();
    let member = members.create(team_member_fixture("Carol", project.id)).await.unwrap();
    let survivor = members.create(team_member_fixture("Dave", other.id)).await.unwrap();

    projects.delete(project.id).await.unwrap();

    assert!(matches!(members.get_by_id(member.id).await, Err(AppError::NotFound { .. })));
    assert_eq!(members.get_by_id(survivor.id).await.unwrap(), survivor);
    assert_eq!(members.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_dangling_foreign_keys_are_bad_requests() {
    let db = test_db().await;
    let projects = ProjectService::new(db.clone());
    let members = TeamMemberService::new(db.clone());

    assert!(matches!(
        projects.create(project_fixture("P1", 99)).await,
        Err(AppError::BadRequest { .. })
    ));
    assert!(matches!(
        members.create(team_member_fixture("Carol", 99)).await,
        Err(AppError::BadRequest { .. })
    ));
}

#[tokio::test]
async fn test_project_team_members_lists_only_that_project() {
    let db = test_db().await;
    let managers = ManagerService::new(db.clone());
    let projects = ProjectService::new(db.clone());
    let members = TeamMemberService::new(db.clone());

    let ann = managers
        .create(manager_fixture("Ann", "ann@x.com", Department::Hr))
        .await
        .unwrap();
    let p1 = projects.create(project_fixture("P1", ann.id)).await.unwrap();
    let p2 = projects.create(project_fixture("P2", ann.id)).await.unwrap();

    let mut tester = team_member_fixture("Erin", p1.id);
    tester.role = Role::Tester;
    let tester = members.create(tester).await.unwrap();
    members.create(team_member_fixture("Frank", p2.id)).await.unwrap();

    assert_eq!(projects.team_members(p1.id).await.unwrap(), vec![tester]);
    assert!(matches!(projects.team_members(99).await, Err(AppError::NotFound { .. })));
}

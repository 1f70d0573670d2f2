//! Migration: Create team_members table
//!
//! Team members are removed together with their project.

use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250101_000002_create_projects_table::Projects;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TeamMembers::Table)
                    .if_not_exists()
                    .col(pk_auto(TeamMembers::Id))
                    .col(string_len(TeamMembers::Name, 100))
                    .col(string_len(TeamMembers::Role, 32))
                    .col(string_len(TeamMembers::Email, 256))
                    .col(integer(TeamMembers::ProjectId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_team_members_project_id")
                            .from(TeamMembers::Table, TeamMembers::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_team_members_project_id")
                    .table(TeamMembers::Table)
                    .col(TeamMembers::ProjectId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TeamMembers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TeamMembers {
    Table,
    Id,
    Name,
    Role,
    Email,
    ProjectId,
}

//! Migration: Create projects table
//!
//! A manager cannot be deleted while one of its projects still exists.

use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250101_000001_create_managers_table::Managers;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(pk_auto(Projects::Id))
                    .col(string_len(Projects::Name, 100))
                    .col(string_len_null(Projects::Description, 500))
                    .col(date(Projects::StartDate))
                    .col(date(Projects::EndDate))
                    .col(integer(Projects::ManagerId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_projects_manager_id")
                            .from(Projects::Table, Projects::ManagerId)
                            .to(Managers::Table, Managers::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_projects_manager_id")
                    .table(Projects::Table)
                    .col(Projects::ManagerId)
                    .to_owned(),
            )
            .await?;

        // Dashboard lists the most recent projects first
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_projects_start_date")
                    .table(Projects::Table)
                    .col(Projects::StartDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Projects::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Projects {
    Table,
    Id,
    Name,
    Description,
    StartDate,
    EndDate,
    ManagerId,
}

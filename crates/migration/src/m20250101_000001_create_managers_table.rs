//! Migration: Create managers table

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Managers::Table)
                    .if_not_exists()
                    .col(pk_auto(Managers::Id))
                    .col(string_len(Managers::Name, 100))
                    .col(string_len(Managers::Email, 256))
                    .col(string_len(Managers::Department, 32))
                    .col(string_null(Managers::Picture))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Managers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Managers {
    Table,
    Id,
    Name,
    Email,
    Department,
    Picture,
}

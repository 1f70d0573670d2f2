//! Migration: Create app_users table
//!
//! Sign-in accounts. Lookups go through the upper-cased normalized columns,
//! which are unique.

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AppUsers::Table)
                    .if_not_exists()
                    .col(string_len(AppUsers::Id, 64).primary_key())
                    .col(string_len(AppUsers::UserName, 256))
                    .col(string_len(AppUsers::NormalizedUserName, 256))
                    .col(string_len(AppUsers::Email, 256))
                    .col(string_len(AppUsers::NormalizedEmail, 256))
                    .col(string_len(AppUsers::Name, 100))
                    .col(string_len(AppUsers::Department, 32))
                    .col(string_null(AppUsers::Picture))
                    .col(text(AppUsers::PasswordHash))
                    .col(string_len(AppUsers::SecurityStamp, 64))
                    .col(timestamp_with_time_zone(AppUsers::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(AppUsers::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_app_users_normalized_email")
                    .table(AppUsers::Table)
                    .col(AppUsers::NormalizedEmail)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_app_users_normalized_user_name")
                    .table(AppUsers::Table)
                    .col(AppUsers::NormalizedUserName)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AppUsers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum AppUsers {
    Table,
    Id,
    UserName,
    NormalizedUserName,
    Email,
    NormalizedEmail,
    Name,
    Department,
    Picture,
    PasswordHash,
    SecurityStamp,
    CreatedAt,
    UpdatedAt,
}

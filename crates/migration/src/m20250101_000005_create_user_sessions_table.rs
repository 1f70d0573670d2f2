//! Migration: Create user sessions table
//!
//! One row per sign-in. Revoked or expired rows no longer authenticate.

use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250101_000004_create_app_users_table::AppUsers;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserSessions::Table)
                    .if_not_exists()
                    .col(string_len(UserSessions::Id, 64).primary_key())
                    .col(string_len(UserSessions::UserId, 64))
                    .col(boolean(UserSessions::Persistent).default(false))
                    .col(string_null(UserSessions::UserAgent))
                    .col(string_len_null(UserSessions::IpAddress, 64))
                    .col(timestamp_with_time_zone(UserSessions::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(UserSessions::ExpiresAt))
                    .col(timestamp_with_time_zone_null(UserSessions::RevokedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_sessions_user_id")
                            .from(UserSessions::Table, UserSessions::UserId)
                            .to(AppUsers::Table, AppUsers::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_user_sessions_user_id")
                    .table(UserSessions::Table)
                    .col(UserSessions::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserSessions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UserSessions {
    Table,
    Id,
    UserId,
    Persistent,
    UserAgent,
    IpAddress,
    CreatedAt,
    ExpiresAt,
    RevokedAt,
}

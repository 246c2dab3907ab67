// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RefreshLog::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RefreshLog::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RefreshLog::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(RefreshLog::RefreshedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_refresh_log_user")
                            .from(RefreshLog::Table, RefreshLog::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_refresh_log_user")
                    .table(RefreshLog::Table)
                    .col(RefreshLog::UserId)
                    .col(RefreshLog::RefreshedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RefreshLog::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum RefreshLog {
    Table,
    Id,
    UserId,
    RefreshedAt,
}

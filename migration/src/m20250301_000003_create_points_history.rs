// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm_migration::prelude::*;

use super::m20250301_000002_create_participants::Participants;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PointsHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PointsHistory::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PointsHistory::ParticipantId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PointsHistory::Points).big_integer().not_null())
                    .col(
                        ColumnDef::new(PointsHistory::RecordedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_points_history_participant")
                            .from(PointsHistory::Table, PointsHistory::ParticipantId)
                            .to(Participants::Table, Participants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_points_history_participant")
                    .table(PointsHistory::Table)
                    .col(PointsHistory::ParticipantId)
                    .col(PointsHistory::RecordedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PointsHistory::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PointsHistory {
    Table,
    Id,
    ParticipantId,
    Points,
    RecordedAt,
}

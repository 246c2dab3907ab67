// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 用户数据库实体模型
///
/// 对应数据库中的 users 表
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    pub password_hash: String,
    pub email: Option<String>,
    pub created_at: ChronoDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        has_many = "super::participant::Entity",
        from = "Column::Id",
        to = "super::participant::Column::UserId"
    )]
    Participants,
    #[sea_orm(
        has_many = "super::refresh_log::Entity",
        from = "Column::Id",
        to = "super::refresh_log::Column::UserId"
    )]
    RefreshLogs,
}

impl Related<super::participant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Participants.def()
    }
}

impl Related<super::refresh_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RefreshLogs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

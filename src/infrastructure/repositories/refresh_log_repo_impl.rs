// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::repositories::refresh_log_repository::RefreshLogRepository;
use crate::infrastructure::database::entities::refresh_log;
use crate::utils::errors::RepositoryError;

/// 刷新记录仓库实现
#[derive(Clone)]
pub struct RefreshLogRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl RefreshLogRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RefreshLogRepository for RefreshLogRepositoryImpl {
    async fn record(&self, user_id: Uuid, at: DateTime<Utc>) -> Result<(), RepositoryError> {
        refresh_log::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            refreshed_at: Set(at.fixed_offset()),
        }
        .insert(self.db.as_ref())
        .await?;
        Ok(())
    }

    async fn latest(&self, user_id: Uuid) -> Result<Option<DateTime<Utc>>, RepositoryError> {
        let latest = refresh_log::Entity::find()
            .filter(refresh_log::Column::UserId.eq(user_id))
            .order_by_desc(refresh_log::Column::RefreshedAt)
            .one(self.db.as_ref())
            .await?;
        Ok(latest.map(|m| m.refreshed_at.with_timezone(&Utc)))
    }
}

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

use crate::domain::models::participant::PointsRecord;
use crate::domain::repositories::points_history_repository::PointsHistoryRepository;
use crate::infrastructure::database::entities::points_history;
use crate::utils::errors::RepositoryError;

/// 积分历史仓库实现
#[derive(Clone)]
pub struct PointsHistoryRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl PointsHistoryRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<points_history::Model> for PointsRecord {
    fn from(model: points_history::Model) -> Self {
        Self {
            id: model.id,
            participant_id: model.participant_id,
            points: model.points,
            recorded_at: model.recorded_at.with_timezone(&Utc),
        }
    }
}

#[async_trait]
impl PointsHistoryRepository for PointsHistoryRepositoryImpl {
    async fn append(
        &self,
        participant_id: Uuid,
        points: i64,
        at: DateTime<Utc>,
    ) -> Result<PointsRecord, RepositoryError> {
        let model = points_history::ActiveModel {
            id: Set(Uuid::new_v4()),
            participant_id: Set(participant_id),
            points: Set(points),
            recorded_at: Set(at.fixed_offset()),
        };
        let model = model.insert(self.db.as_ref()).await?;
        Ok(model.into())
    }

    async fn list_for_participant(
        &self,
        participant_id: Uuid,
    ) -> Result<Vec<PointsRecord>, RepositoryError> {
        let models = points_history::Entity::find()
            .filter(points_history::Column::ParticipantId.eq(participant_id))
            .order_by_desc(points_history::Column::RecordedAt)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn list_for_participants(
        &self,
        participant_ids: &[Uuid],
    ) -> Result<Vec<PointsRecord>, RepositoryError> {
        if participant_ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = points_history::Entity::find()
            .filter(points_history::Column::ParticipantId.is_in(participant_ids.iter().copied()))
            .order_by_desc(points_history::Column::RecordedAt)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::repositories::test_support::{memory_db, seed_participant, seed_user};
    use chrono::Duration;

    #[tokio::test]
    async fn test_history_is_listed_newest_first() {
        let db = memory_db().await;
        let user = seed_user(&db, "ada").await;
        let grace = seed_participant(&db, user, "https://p.test/grace").await;
        let repo = PointsHistoryRepositoryImpl::new(db);

        let now = Utc::now();
        repo.append(grace, 10, now - Duration::days(14)).await.unwrap();
        repo.append(grace, 30, now).await.unwrap();
        repo.append(grace, 20, now - Duration::days(7)).await.unwrap();

        let points: Vec<i64> = repo
            .list_for_participant(grace)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.points)
            .collect();
        assert_eq!(points, vec![30, 20, 10]);
    }

    #[tokio::test]
    async fn test_history_for_several_participants() {
        let db = memory_db().await;
        let user = seed_user(&db, "ada").await;
        let grace = seed_participant(&db, user, "https://p.test/grace").await;
        let alan = seed_participant(&db, user, "https://p.test/alan").await;
        let other = seed_participant(&db, user, "https://p.test/other").await;
        let repo = PointsHistoryRepositoryImpl::new(db);

        let now = Utc::now();
        repo.append(grace, 1, now).await.unwrap();
        repo.append(alan, 2, now).await.unwrap();
        repo.append(other, 3, now).await.unwrap();

        let records = repo.list_for_participants(&[grace, alan]).await.unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.participant_id != other));
        assert!(repo.list_for_participants(&[]).await.unwrap().is_empty());
    }
}

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

use crate::domain::models::participant::{NewParticipant, Participant};
use crate::domain::repositories::participant_repository::ParticipantRepository;
use crate::infrastructure::database::entities::participant;
use crate::utils::errors::RepositoryError;

/// 参与者仓库实现
///
/// 基于SeaORM实现的参与者数据访问层
#[derive(Clone)]
pub struct ParticipantRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl ParticipantRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn find_model(&self, participant_id: Uuid) -> Result<participant::Model, RepositoryError> {
        participant::Entity::find_by_id(participant_id)
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound)
    }
}

impl From<participant::Model> for Participant {
    fn from(model: participant::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            email: model.email,
            profile_url: model.profile_url,
            current_points: model.current_points,
            last_updated: model.last_updated.with_timezone(&Utc),
        }
    }
}

#[async_trait]
impl ParticipantRepository for ParticipantRepositoryImpl {
    async fn find_by_profile(
        &self,
        user_id: Uuid,
        profile_url: &str,
    ) -> Result<Option<Participant>, RepositoryError> {
        let model = participant::Entity::find()
            .filter(participant::Column::UserId.eq(user_id))
            .filter(participant::Column::ProfileUrl.eq(profile_url))
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn find_for_user(
        &self,
        user_id: Uuid,
        participant_id: Uuid,
    ) -> Result<Option<Participant>, RepositoryError> {
        let model = participant::Entity::find_by_id(participant_id)
            .filter(participant::Column::UserId.eq(user_id))
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Participant>, RepositoryError> {
        let models = participant::Entity::find()
            .filter(participant::Column::UserId.eq(user_id))
            .order_by_asc(participant::Column::Name)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn create(&self, new: NewParticipant) -> Result<Participant, RepositoryError> {
        let model = participant::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(new.user_id),
            name: Set(new.name),
            email: Set(new.email),
            profile_url: Set(new.profile_url),
            current_points: Set(0),
            last_updated: Set(Utc::now().fixed_offset()),
        };

        let model = model.insert(self.db.as_ref()).await?;
        Ok(model.into())
    }

    async fn update_identity(
        &self,
        participant_id: Uuid,
        name: &str,
        email: Option<String>,
    ) -> Result<Participant, RepositoryError> {
        let mut active: participant::ActiveModel = self.find_model(participant_id).await?.into();
        active.name = Set(name.to_string());
        active.email = Set(email);

        let model = active.update(self.db.as_ref()).await?;
        Ok(model.into())
    }

    async fn update_points(
        &self,
        participant_id: Uuid,
        points: i64,
        at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        if points < 0 {
            return Err(RepositoryError::InvalidParameter(format!(
                "negative points: {}",
                points
            )));
        }
        let mut active: participant::ActiveModel = self.find_model(participant_id).await?.into();
        active.current_points = Set(points);
        active.last_updated = Set(at.fixed_offset());
        active.update(self.db.as_ref()).await?;
        Ok(())
    }

    async fn touch(&self, participant_id: Uuid, at: DateTime<Utc>) -> Result<(), RepositoryError> {
        let mut active: participant::ActiveModel = self.find_model(participant_id).await?.into();
        active.last_updated = Set(at.fixed_offset());
        active.update(self.db.as_ref()).await?;
        Ok(())
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::models::participant::PointsRecord;
use crate::utils::errors::RepositoryError;

#[async_trait]
pub trait PointsHistoryRepository: Send + Sync {
    async fn append(
        &self,
        participant_id: Uuid,
        points: i64,
        at: DateTime<Utc>,
    ) -> Result<PointsRecord, RepositoryError>;

    /// History of one participant, newest first
    async fn list_for_participant(
        &self,
        participant_id: Uuid,
    ) -> Result<Vec<PointsRecord>, RepositoryError>;

    /// History of several participants, newest first
    async fn list_for_participants(
        &self,
        participant_ids: &[Uuid],
    ) -> Result<Vec<PointsRecord>, RepositoryError>;
}

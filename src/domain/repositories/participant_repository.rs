// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::models::participant::{NewParticipant, Participant};
use crate::utils::errors::RepositoryError;

#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    /// Look up a participant by its owner and profile key
    async fn find_by_profile(
        &self,
        user_id: Uuid,
        profile_url: &str,
    ) -> Result<Option<Participant>, RepositoryError>;

    /// Find a participant only if it belongs to `user_id`
    async fn find_for_user(
        &self,
        user_id: Uuid,
        participant_id: Uuid,
    ) -> Result<Option<Participant>, RepositoryError>;

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Participant>, RepositoryError>;

    async fn create(&self, participant: NewParticipant) -> Result<Participant, RepositoryError>;

    /// Update display name and email, leaving points untouched
    async fn update_identity(
        &self,
        participant_id: Uuid,
        name: &str,
        email: Option<String>,
    ) -> Result<Participant, RepositoryError>;

    async fn update_points(
        &self,
        participant_id: Uuid,
        points: i64,
        at: DateTime<Utc>,
    ) -> Result<(), RepositoryError>;

    async fn touch(&self, participant_id: Uuid, at: DateTime<Utc>) -> Result<(), RepositoryError>;
}

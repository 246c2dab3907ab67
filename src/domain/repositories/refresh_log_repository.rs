// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::utils::errors::RepositoryError;

#[async_trait]
pub trait RefreshLogRepository: Send + Sync {
    async fn record(&self, user_id: Uuid, at: DateTime<Utc>) -> Result<(), RepositoryError>;

    /// Time of the user's most recent refresh, if any
    async fn latest(&self, user_id: Uuid) -> Result<Option<DateTime<Utc>>, RepositoryError>;
}

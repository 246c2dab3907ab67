// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::models::user::User;
use crate::utils::errors::RepositoryError;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a user; a taken username yields `RepositoryError::AlreadyExists`
    async fn create(
        &self,
        username: &str,
        password_hash: &str,
        email: Option<String>,
    ) -> Result<User, RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;

    async fn count(&self) -> Result<u64, RepositoryError>;
}

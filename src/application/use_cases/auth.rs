// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use tracing::info;

use crate::application::dto::auth_form::CredentialsForm;
use crate::application::use_cases::error::UseCaseError;
use crate::domain::models::user::User;
use crate::domain::repositories::user_repository::UserRepository;
use crate::utils::errors::RepositoryError;
use crate::utils::password::PasswordHasher;

/// 账户注册和登录
pub struct AuthUseCase {
    users: Arc<dyn UserRepository>,
    hasher: PasswordHasher,
}

impl AuthUseCase {
    pub fn new(users: Arc<dyn UserRepository>, hasher: PasswordHasher) -> Self {
        Self { users, hasher }
    }

    /// 注册新用户
    ///
    /// 用户名已存在时返回 `User <name> is already registered.`
    pub async fn register(&self, form: CredentialsForm) -> Result<User, UseCaseError> {
        let form = form.normalized();
        form.check().map_err(UseCaseError::Validation)?;

        if self.users.find_by_username(&form.username).await?.is_some() {
            return Err(already_registered(&form.username));
        }

        let hasher = self.hasher;
        let password = form.password;
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| UseCaseError::Internal(format!("password hashing failed: {}", e)))?;

        // 并发注册同名用户时由唯一索引兜底
        let user = match self.users.create(&form.username, &password_hash, None).await {
            Ok(user) => user,
            Err(RepositoryError::AlreadyExists) => return Err(already_registered(&form.username)),
            Err(e) => return Err(e.into()),
        };

        info!(user_id = %user.id, username = %user.username, "user registered");
        Ok(user)
    }

    /// 校验用户名和密码
    pub async fn login(&self, form: CredentialsForm) -> Result<User, UseCaseError> {
        let form = form.normalized();

        let Some(user) = self.users.find_by_username(&form.username).await? else {
            return Err(UseCaseError::Validation("Invalid username.".to_string()));
        };

        let hasher = self.hasher;
        let stored = user.password_hash.clone();
        let password = form.password;
        let valid = tokio::task::spawn_blocking(move || hasher.verify(&password, &stored))
            .await
            .map_err(|e| UseCaseError::Internal(format!("password check failed: {}", e)))?;
        if !valid {
            return Err(UseCaseError::Validation("Invalid password.".to_string()));
        }

        info!(user_id = %user.id, "user logged in");
        Ok(user)
    }
}

fn already_registered(username: &str) -> UseCaseError {
    UseCaseError::Validation(format!("User {} is already registered.", username))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::repositories::test_support::memory_db;
    use crate::infrastructure::repositories::UserRepositoryImpl;

    async fn use_case() -> AuthUseCase {
        let users = Arc::new(UserRepositoryImpl::new(memory_db().await));
        AuthUseCase::new(users, PasswordHasher::new(1_000))
    }

    fn form(username: &str, password: &str) -> CredentialsForm {
        CredentialsForm {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let auth = use_case().await;
        let user = auth.register(form(" ada ", "secret")).await.unwrap();
        assert_eq!(user.username, "ada");
        assert!(user.password_hash.starts_with("pbkdf2-sha256$1000$"));

        let logged_in = auth.login(form("ada", "secret")).await.unwrap();
        assert_eq!(logged_in.id, user.id);
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let auth = use_case().await;
        auth.register(form("ada", "secret")).await.unwrap();
        let err = auth.register(form("ada", "other")).await.unwrap_err();
        assert_eq!(err.to_string(), "User ada is already registered.");
    }

    #[tokio::test]
    async fn test_register_requires_fields() {
        let auth = use_case().await;
        let err = auth.register(form("", "secret")).await.unwrap_err();
        assert_eq!(err.to_string(), "Username is required.");
        let err = auth.register(form("ada", "")).await.unwrap_err();
        assert_eq!(err.to_string(), "Password is required.");
    }

    #[tokio::test]
    async fn test_login_errors() {
        let auth = use_case().await;
        auth.register(form("ada", "secret")).await.unwrap();

        let err = auth.login(form("grace", "secret")).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid username.");
        let err = auth.login(form("ada", "wrong")).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid password.");
    }
}

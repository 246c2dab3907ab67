// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use std::convert::Infallible;
use tracing::warn;

use crate::domain::models::user::User;
use crate::presentation::middleware::session::{cookie_value, read_flashes, Flash, SESSION_COOKIE};
use crate::presentation::response::redirect_with_flash;
use crate::presentation::state::AppState;

/// 当前登录用户，未登录时为 `None`
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<User>);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(state) = parts.extensions.get::<AppState>().cloned() else {
            return Ok(CurrentUser(None));
        };
        let Some(user_id) = cookie_value(&parts.headers, SESSION_COOKIE)
            .and_then(|value| state.sessions.verify(&value, Utc::now()))
        else {
            return Ok(CurrentUser(None));
        };

        match state.users.find_by_id(user_id).await {
            Ok(user) => Ok(CurrentUser(user)),
            Err(e) => {
                warn!(%user_id, "failed to load session user: {}", e);
                Ok(CurrentUser(None))
            }
        }
    }
}

/// 必须登录的页面使用，未登录时跳转到登录页
#[derive(Debug, Clone)]
pub struct RequireUser(pub User);

impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = match CurrentUser::from_request_parts(parts, state).await {
            Ok(user) => user,
            Err(never) => match never {},
        };
        match (user, parts.extensions.get::<AppState>()) {
            (Some(user), _) => Ok(RequireUser(user)),
            (None, Some(app)) => Err(redirect_with_flash(
                &app.sessions,
                "/login",
                Flash::error("Please log in to access this page."),
            )),
            (None, None) => Err(axum::http::StatusCode::UNAUTHORIZED.into_response()),
        }
    }
}

/// 上一个请求留下的闪现消息
#[derive(Debug, Clone, Default)]
pub struct Flashes(pub Vec<Flash>);

impl<S> FromRequestParts<S> for Flashes
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Flashes(read_flashes(&parts.headers)))
    }
}

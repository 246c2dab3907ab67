// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Path},
    response::Response,
};
use uuid::Uuid;

use crate::presentation::errors::AppError;
use crate::presentation::extractors::session_user::{Flashes, RequireUser};
use crate::presentation::response::html_page;
use crate::presentation::state::AppState;
use crate::presentation::views::{pages, PageContext};

/// 参与者列表及周变化
pub async fn list_participants(
    Extension(state): Extension<AppState>,
    RequireUser(user): RequireUser,
    Flashes(flashes): Flashes,
) -> Result<Response, AppError> {
    let standings = state.participants.standings(user.id).await?;
    let body = pages::participants_page(PageContext::new(Some(&user), &flashes), &standings);
    Ok(html_page(&state.sessions, !flashes.is_empty(), body))
}

/// 单个参与者的积分历史
///
/// ID 格式错误和不属于当前用户的参与者都返回 404
pub async fn participant_history(
    Extension(state): Extension<AppState>,
    RequireUser(user): RequireUser,
    Flashes(flashes): Flashes,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = Uuid::parse_str(&id).map_err(|_| AppError::not_found())?;
    let (participant, history) = state.participants.history(user.id, id).await?;
    let body = pages::history_page(
        PageContext::new(Some(&user), &flashes),
        &participant,
        &history,
    );
    Ok(html_page(&state.sessions, !flashes.is_empty(), body))
}

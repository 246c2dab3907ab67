// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::Extension,
    http::header,
    response::{IntoResponse, Response},
};

use crate::presentation::errors::AppError;
use crate::presentation::extractors::session_user::{CurrentUser, Flashes};
use crate::presentation::response::html_page;
use crate::presentation::state::AppState;
use crate::presentation::views::{pages, PageContext};

const EXAMPLE_CSV: &str = include_str!("../../../assets/example.csv");

/// 首页
///
/// 登录用户看到上传表单和自己的参与者，匿名用户看到登录入口
pub async fn index(
    Extension(state): Extension<AppState>,
    CurrentUser(user): CurrentUser,
    Flashes(flashes): Flashes,
) -> Result<Response, AppError> {
    let ctx = PageContext::new(user.as_ref(), &flashes);
    let body = match &user {
        Some(user) => {
            let participants = state.participants.list(user.id).await?;
            pages::index_user(ctx, &participants)
        }
        None => pages::index_anonymous(ctx),
    };
    Ok(html_page(&state.sessions, !flashes.is_empty(), body))
}

/// 下载示例 CSV
pub async fn download_example() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"example.csv\"",
            ),
        ],
        EXAMPLE_CSV,
    )
}

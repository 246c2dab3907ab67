// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::Extension,
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use crate::application::use_cases::error::UseCaseError;
use crate::presentation::errors::AppError;
use crate::presentation::extractors::csv_upload::{CsvUpload, CsvUploadRejection};
use crate::presentation::extractors::session_user::{CurrentUser, Flashes, RequireUser};
use crate::presentation::middleware::session::Flash;
use crate::presentation::response::{html_page, redirect_with_flash};
use crate::presentation::state::AppState;
use crate::presentation::views::{pages, PageContext};

/// 上传参与者 CSV
///
/// 校验失败时带着错误信息回到首页
pub async fn upload(
    Extension(state): Extension<AppState>,
    RequireUser(user): RequireUser,
    Flashes(pending): Flashes,
    upload: Result<CsvUpload, CsvUploadRejection>,
) -> Result<Response, AppError> {
    let upload = match upload {
        Ok(upload) => upload,
        Err(rejection) => {
            return Ok(redirect_with_flash(
                &state.sessions,
                "/",
                Flash::error(rejection.to_string()),
            ))
        }
    };

    match state
        .upload
        .execute(user.id, &upload.file_name, &upload.bytes)
        .await
    {
        Ok(outcome) => {
            info!(
                user_id = %user.id,
                rows = outcome.rows.len(),
                elapsed_ms = outcome.elapsed.as_millis() as u64,
                "csv upload processed"
            );
            let flashes = with_pending(
                &pending,
                Flash::success(format!(
                    "CSV file processed successfully in {:.2} seconds! {} participants updated.",
                    outcome.elapsed.as_secs_f64(),
                    outcome.rows.len()
                )),
            );
            let body = pages::results_page(
                PageContext::new(Some(&user), &flashes),
                "Results",
                &outcome.rows,
                true,
            );
            Ok(html_page(&state.sessions, !pending.is_empty(), body))
        }
        Err(UseCaseError::Csv(e)) => Ok(redirect_with_flash(
            &state.sessions,
            "/",
            Flash::error(e.to_string()),
        )),
        Err(e) => Err(e.into()),
    }
}

/// 刷新积分
///
/// 刷新间隔未到时回到参与者页面，没有参与者时回到首页
pub async fn refresh(
    Extension(state): Extension<AppState>,
    RequireUser(user): RequireUser,
    Flashes(pending): Flashes,
) -> Result<Response, AppError> {
    match state.refresh.execute(user.id).await {
        Ok(outcome) => {
            let flashes = with_pending(
                &pending,
                Flash::success(format!(
                    "Points refreshed successfully in {:.2} seconds!",
                    outcome.elapsed.as_secs_f64()
                )),
            );
            let body = pages::results_page(
                PageContext::new(Some(&user), &flashes),
                "Weekly results",
                &outcome.rows,
                true,
            );
            Ok(html_page(&state.sessions, !pending.is_empty(), body))
        }
        Err(UseCaseError::RefreshTooSoon(message)) => Ok(redirect_with_flash(
            &state.sessions,
            "/participants",
            Flash::warning(message),
        )),
        Err(e @ UseCaseError::NoParticipants) => Ok(redirect_with_flash(
            &state.sessions,
            "/",
            Flash::warning(e.to_string()),
        )),
        Err(e) => Err(e.into()),
    }
}

/// 先显示上一个请求留下的消息
fn with_pending(pending: &[Flash], latest: Flash) -> Vec<Flash> {
    let mut flashes = pending.to_vec();
    flashes.push(latest);
    flashes
}

/// 下一次可以刷新的时间（JSON）
pub async fn next_refresh(
    Extension(state): Extension<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let next = state.refresh.next_refresh(user.map(|u| u.id)).await?;
    Ok(Json(next))
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{extract::Extension, http::StatusCode, response::Response};
use tracing::info;

use crate::application::use_cases::error::UseCaseError;
use crate::presentation::errors::AppError;
use crate::presentation::extractors::csv_upload::{CsvUpload, CsvUploadRejection};
use crate::presentation::extractors::session_user::{CurrentUser, Flashes};
use crate::presentation::middleware::session::Flash;
use crate::presentation::response::{html_page, html_page_with_status};
use crate::presentation::state::AppState;
use crate::presentation::views::{pages, PageContext};

/// 无状态检查的上传页面
pub async fn check_form(
    Extension(state): Extension<AppState>,
    CurrentUser(user): CurrentUser,
    Flashes(flashes): Flashes,
) -> Response {
    let body = pages::check_form(PageContext::new(user.as_ref(), &flashes));
    html_page(&state.sessions, !flashes.is_empty(), body)
}

/// 解析上传的 CSV 并直接显示积分，不保存任何数据
pub async fn check(
    Extension(state): Extension<AppState>,
    CurrentUser(user): CurrentUser,
    upload: Result<CsvUpload, CsvUploadRejection>,
) -> Result<Response, AppError> {
    let form_with_error = |message: String| {
        let flashes = [Flash::error(message)];
        let body = pages::check_form(PageContext::new(user.as_ref(), &flashes));
        html_page_with_status(&state.sessions, false, StatusCode::BAD_REQUEST, body)
    };

    let upload = match upload {
        Ok(upload) => upload,
        Err(rejection) => return Ok(form_with_error(rejection.to_string())),
    };

    match state.check.execute(&upload.file_name, &upload.bytes).await {
        Ok(outcome) => {
            info!(
                rows = outcome.rows.len(),
                elapsed_ms = outcome.elapsed.as_millis() as u64,
                "quick check finished"
            );
            let flashes = [Flash::success(format!(
                "Fetched points for {} participants in {:.2} seconds.",
                outcome.rows.len(),
                outcome.elapsed.as_secs_f64()
            ))];
            let body = pages::results_page(
                PageContext::new(user.as_ref(), &flashes),
                "Results",
                &outcome.rows,
                false,
            );
            Ok(html_page(&state.sessions, false, body))
        }
        Err(UseCaseError::Csv(e)) => Ok(form_with_error(e.to_string())),
        Err(e) => Err(e.into()),
    }
}

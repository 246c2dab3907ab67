// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tracing::error;

use crate::application::use_cases::error::UseCaseError;
use crate::domain::services::csv_ingest::CsvError;
use crate::presentation::views::{pages, PageContext};
use crate::utils::errors::RepositoryError;

/// 应用错误类型
///
/// 封装所有可能的应用层错误，渲染为带状态码的 HTML 错误页
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl AppError {
    pub fn not_found() -> Self {
        Self(UseCaseError::NotFound.into())
    }

    fn status(&self) -> StatusCode {
        if let Some(err) = self.0.downcast_ref::<UseCaseError>() {
            return match err {
                UseCaseError::NotFound | UseCaseError::Repository(RepositoryError::NotFound) => {
                    StatusCode::NOT_FOUND
                }
                UseCaseError::Validation(_)
                | UseCaseError::Csv(_)
                | UseCaseError::RefreshTooSoon(_)
                | UseCaseError::NoParticipants => StatusCode::BAD_REQUEST,
                UseCaseError::Repository(_) | UseCaseError::Internal(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
        }
        if self.0.downcast_ref::<CsvError>().is_some() {
            return StatusCode::BAD_REQUEST;
        }
        match self.0.downcast_ref::<RepositoryError>() {
            Some(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
            Some(RepositoryError::InvalidParameter(_)) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            error!("request failed: {:#}", self.0);
            "Something went wrong while handling your request.".to_string()
        } else {
            self.0.to_string()
        };

        let title = status.canonical_reason().unwrap_or("Error");
        let body = pages::error_page(PageContext::new(None, &[]), title, &message);
        (status, Html(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

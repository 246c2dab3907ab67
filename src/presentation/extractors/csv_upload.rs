// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::extract::{FromRequest, Multipart, Request};
use axum::response::{IntoResponse, Response};
use axum::http::StatusCode;
use thiserror::Error;

/// 表单中文件字段的名称
pub const FILE_FIELD: &str = "csv_file";

/// 上传的 CSV 文件
#[derive(Debug, Clone)]
pub struct CsvUpload {
    /// 浏览器提交的文件名，未选择文件时为空字符串
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Error, Debug)]
pub enum CsvUploadRejection {
    #[error("No file part")]
    NoFilePart,

    #[error("Error reading upload: {0}")]
    Multipart(String),
}

impl IntoResponse for CsvUploadRejection {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}

impl<S> FromRequest<S> for CsvUpload
where
    S: Send + Sync,
{
    type Rejection = CsvUploadRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| CsvUploadRejection::Multipart(e.body_text()))?;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| CsvUploadRejection::Multipart(e.body_text()))?
        {
            if field.name() != Some(FILE_FIELD) {
                continue;
            }
            let file_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| CsvUploadRejection::Multipart(e.body_text()))?;
            return Ok(CsvUpload {
                file_name,
                bytes: bytes.to_vec(),
            });
        }

        Err(CsvUploadRejection::NoFilePart)
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

use crate::domain::services::csv_ingest::CsvError;
use crate::utils::errors::RepositoryError;

/// 用例层错误
///
/// `Validation`、`Csv`、`RefreshTooSoon` 和 `NoParticipants` 的信息会原样展示给用户
#[derive(Error, Debug)]
pub enum UseCaseError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Csv(#[from] CsvError),

    #[error("{0}")]
    RefreshTooSoon(String),

    #[error("No participants found. Please upload a CSV file first.")]
    NoParticipants,

    #[error("Participant not found")]
    NotFound,

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Internal error: {0}")]
    Internal(String),
}

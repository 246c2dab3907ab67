// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::application::dto::results::ResultRow;
use crate::application::use_cases::error::UseCaseError;
use crate::domain::services::csv_ingest;
use crate::workers::points_dispatcher::{PointsDispatcher, ProfileTarget};

/// 无状态检查的结果
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub rows: Vec<ResultRow>,
    pub elapsed: Duration,
}

/// 无状态积分检查
///
/// 解析上传的 CSV 并抓取所有主页，不写入数据库
pub struct CheckPointsUseCase {
    dispatcher: Arc<PointsDispatcher>,
}

impl CheckPointsUseCase {
    pub fn new(dispatcher: Arc<PointsDispatcher>) -> Self {
        Self { dispatcher }
    }

    pub async fn execute(&self, file_name: &str, bytes: &[u8]) -> Result<CheckOutcome, UseCaseError> {
        let rows = csv_ingest::parse_upload(file_name, bytes)?;
        metrics::counter!("csv_upload_total", "mode" => "check").increment(1);
        info!(rows = rows.len(), "checking points without persistence");

        let targets = rows
            .iter()
            .map(|row| ProfileTarget {
                label: row.name.clone(),
                profile_url: row.profile_url.clone(),
            })
            .collect();
        let report = self.dispatcher.dispatch(targets).await;

        let rows = rows
            .into_iter()
            .zip(report.outcomes)
            .map(|(row, points)| ResultRow {
                participant_id: None,
                name: row.name,
                profile_url: row.profile_url,
                points,
                weekly: None,
            })
            .collect();

        Ok(CheckOutcome {
            rows,
            elapsed: report.elapsed,
        })
    }
}

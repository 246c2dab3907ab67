// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use uuid::Uuid;

use crate::application::dto::results::{sort_by_weekly, ResultRow, WeeklyPoints};
use crate::application::use_cases::error::UseCaseError;
use crate::application::use_cases::PointsStore;
use crate::domain::models::participant::{NewParticipant, Participant};
use crate::domain::models::profile::ProfileRow;
use crate::domain::services::csv_ingest;
use crate::infrastructure::database::backup::DatabaseBackup;
use crate::workers::points_dispatcher::PointsDispatcher;

/// 上传处理结果
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    pub rows: Vec<ResultRow>,
    pub elapsed: Duration,
}

/// 上传参与者 CSV 并记录首次积分
pub struct UploadParticipantsUseCase {
    store: PointsStore,
    dispatcher: Arc<PointsDispatcher>,
    backup: Arc<DatabaseBackup>,
}

impl UploadParticipantsUseCase {
    pub fn new(
        store: PointsStore,
        dispatcher: Arc<PointsDispatcher>,
        backup: Arc<DatabaseBackup>,
    ) -> Self {
        Self {
            store,
            dispatcher,
            backup,
        }
    }

    pub async fn execute(
        &self,
        user_id: Uuid,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<UploadOutcome, UseCaseError> {
        let rows = csv_ingest::parse_upload(file_name, bytes)?;
        metrics::counter!("csv_upload_total", "mode" => "upload").increment(1);

        let started = Instant::now();
        self.backup.run().await;

        let mut participants = Vec::with_capacity(rows.len());
        let mut seen = HashSet::new();
        for row in &rows {
            let participant = self.upsert(user_id, row).await?;
            // 同一文件中重复的主页只抓取一次
            if seen.insert(participant.id) {
                participants.push(participant);
            }
        }
        info!(
            %user_id,
            rows = rows.len(),
            participants = participants.len(),
            "participants imported"
        );

        let report = self.dispatcher.dispatch(self.store.targets(&participants)).await;

        let now = Utc::now();
        let mut results = Vec::with_capacity(participants.len());
        for (participant, points) in participants.into_iter().zip(report.outcomes) {
            self.store
                .save_outcome(&participant, &points, now, false)
                .await?;
            results.push(ResultRow {
                participant_id: Some(participant.id),
                profile_url: participant
                    .has_profile_link()
                    .then(|| participant.profile_url.clone()),
                name: participant.name,
                points,
                weekly: Some(WeeklyPoints::FirstUpload),
            });
        }
        self.store.refresh_log.record(user_id, now).await?;

        sort_by_weekly(&mut results);
        Ok(UploadOutcome {
            rows: results,
            elapsed: started.elapsed(),
        })
    }

    /// 按 (用户, 主页) 查找或创建参与者，并同步姓名和邮箱
    async fn upsert(&self, user_id: Uuid, row: &ProfileRow) -> Result<Participant, UseCaseError> {
        let key = row.profile_key();
        let participants = &self.store.participants;

        let Some(existing) = participants.find_by_profile(user_id, &key).await? else {
            debug!(row = row.row_number, profile = %key, "new participant");
            return Ok(participants
                .create(NewParticipant {
                    user_id,
                    name: row.name.clone(),
                    email: row.email.clone(),
                    profile_url: key,
                })
                .await?);
        };

        let email_changed = row.email.is_some() && row.email != existing.email;
        if existing.name != row.name || email_changed {
            let email = if email_changed {
                row.email.clone()
            } else {
                existing.email.clone()
            };
            return Ok(participants
                .update_identity(existing.id, &row.name, email)
                .await?);
        }
        Ok(existing)
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::Utc;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;
use uuid::Uuid;

use crate::application::dto::results::{sort_by_weekly, ResultRow, WeeklyPoints};
use crate::application::use_cases::error::UseCaseError;
use crate::application::use_cases::PointsStore;
use crate::domain::services::refresh_policy::{NextRefresh, RefreshPolicy};
use crate::infrastructure::database::backup::DatabaseBackup;
use crate::workers::points_dispatcher::PointsDispatcher;

#[derive(Debug, Clone)]
pub struct RefreshOutcome {
    pub rows: Vec<ResultRow>,
    pub elapsed: Duration,
}

/// 每周刷新积分
///
/// 每个用户在刷新间隔内只能刷新一次
pub struct RefreshPointsUseCase {
    store: PointsStore,
    dispatcher: Arc<PointsDispatcher>,
    backup: Arc<DatabaseBackup>,
    policy: RefreshPolicy,
}

impl RefreshPointsUseCase {
    pub fn new(
        store: PointsStore,
        dispatcher: Arc<PointsDispatcher>,
        backup: Arc<DatabaseBackup>,
        policy: RefreshPolicy,
    ) -> Self {
        Self {
            store,
            dispatcher,
            backup,
            policy,
        }
    }

    pub async fn execute(&self, user_id: Uuid) -> Result<RefreshOutcome, UseCaseError> {
        let now = Utc::now();
        let last = self.store.refresh_log.latest(user_id).await?;
        if let Some(message) = self.policy.window(last, now).wait_message(now) {
            return Err(UseCaseError::RefreshTooSoon(message));
        }

        let participants = self.store.participants.list_for_user(user_id).await?;
        if participants.is_empty() {
            return Err(UseCaseError::NoParticipants);
        }

        self.backup.run().await;
        let started = Instant::now();
        let report = self.dispatcher.dispatch(self.store.targets(&participants)).await;

        let now = Utc::now();
        let mut rows = Vec::with_capacity(participants.len());
        for (participant, points) in participants.into_iter().zip(report.outcomes) {
            let weekly = match points.value() {
                Some(value) => WeeklyPoints::Change(value - participant.current_points),
                None => WeeklyPoints::Unavailable,
            };
            self.store
                .save_outcome(&participant, &points, now, true)
                .await?;
            rows.push(ResultRow {
                participant_id: Some(participant.id),
                profile_url: participant
                    .has_profile_link()
                    .then(|| participant.profile_url.clone()),
                name: participant.name,
                points,
                weekly: Some(weekly),
            });
        }
        self.store.refresh_log.record(user_id, now).await?;

        info!(
            %user_id,
            participants = rows.len(),
            unavailable = report.unavailable,
            "points refreshed"
        );

        sort_by_weekly(&mut rows);
        Ok(RefreshOutcome {
            rows,
            elapsed: started.elapsed(),
        })
    }

    /// 下一次可以刷新的时间，匿名用户总是可以刷新
    pub async fn next_refresh(&self, user_id: Option<Uuid>) -> Result<NextRefresh, UseCaseError> {
        let now = Utc::now();
        let last = match user_id {
            Some(user_id) => self.store.refresh_log.latest(user_id).await?,
            None => None,
        };
        Ok(self.policy.next_refresh(last, now))
    }
}

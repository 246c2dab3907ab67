// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 用例模块
///
/// 包含应用程序的所有业务用例实现
/// 每个用例代表一个完整的业务流程，遵循单一职责原则
pub mod auth;
pub mod check;
pub mod error;
pub mod participants;
pub mod refresh;
pub mod upload;

pub use error::UseCaseError;

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::models::participant::Participant;
use crate::domain::models::points::PointsOutcome;
use crate::domain::repositories::participant_repository::ParticipantRepository;
use crate::domain::repositories::points_history_repository::PointsHistoryRepository;
use crate::domain::repositories::refresh_log_repository::RefreshLogRepository;
use crate::workers::points_dispatcher::ProfileTarget;

/// 积分相关用例共用的仓库集合
#[derive(Clone)]
pub struct PointsStore {
    pub participants: Arc<dyn ParticipantRepository>,
    pub history: Arc<dyn PointsHistoryRepository>,
    pub refresh_log: Arc<dyn RefreshLogRepository>,
}

impl PointsStore {
    pub fn new(
        participants: Arc<dyn ParticipantRepository>,
        history: Arc<dyn PointsHistoryRepository>,
        refresh_log: Arc<dyn RefreshLogRepository>,
    ) -> Self {
        Self {
            participants,
            history,
            refresh_log,
        }
    }

    /// 占位键不是链接，对应的目标没有 URL
    fn targets(&self, participants: &[Participant]) -> Vec<ProfileTarget> {
        participants
            .iter()
            .map(|p| ProfileTarget {
                label: p.name.clone(),
                profile_url: p.has_profile_link().then(|| p.profile_url.clone()),
            })
            .collect()
    }

    /// 保存一次抓取结果
    ///
    /// 只有拿到积分时才更新当前积分，否则只更新时间。
    /// 历史只在 `record_history` 为 true 时追加（刷新），上传不写历史
    async fn save_outcome(
        &self,
        participant: &Participant,
        outcome: &PointsOutcome,
        at: DateTime<Utc>,
        record_history: bool,
    ) -> Result<(), UseCaseError> {
        match outcome.value() {
            Some(points) => {
                self.participants
                    .update_points(participant.id, points, at)
                    .await?;
                if record_history {
                    self.history.append(participant.id, points, at).await?;
                }
            }
            None => self.participants.touch(participant.id, at).await?,
        }
        Ok(())
    }
}

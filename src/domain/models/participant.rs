// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// 某个用户名下被跟踪的参与者
#[derive(Debug, Clone, Serialize)]
pub struct Participant {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub profile_url: String,
    pub current_points: i64,
    pub last_updated: DateTime<Utc>,
}

impl Participant {
    /// 主页是否为可以访问的 http(s) 链接
    pub fn has_profile_link(&self) -> bool {
        self.profile_url.starts_with("http://") || self.profile_url.starts_with("https://")
    }
}

#[derive(Debug, Clone)]
pub struct NewParticipant {
    pub user_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub profile_url: String,
}

/// 一次积分快照
#[derive(Debug, Clone, Serialize)]
pub struct PointsRecord {
    pub id: Uuid,
    pub participant_id: Uuid,
    pub points: i64,
    pub recorded_at: DateTime<Utc>,
}

/// 参与者列表页上的一行：当前积分、上一次积分以及周变化
#[derive(Debug, Clone, Serialize)]
pub struct ParticipantStanding {
    pub participant: Participant,
    pub previous_points: i64,
    pub weekly_change: i64,
}

impl ParticipantStanding {
    /// 根据按时间倒序排列的历史记录计算周变化
    ///
    /// 两条及以上：最新减去次新；只有一条：上一次视为 0；没有记录：均为 0
    pub fn from_history(participant: Participant, newest_first: &[PointsRecord]) -> Self {
        let (previous_points, weekly_change) = match newest_first {
            [latest, previous, ..] => (previous.points, latest.points - previous.points),
            [latest] => (0, latest.points),
            [] => (0, 0),
        };
        Self {
            participant,
            previous_points,
            weekly_change,
        }
    }
}

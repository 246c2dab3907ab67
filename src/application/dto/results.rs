// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Serialize;
use std::fmt;
use uuid::Uuid;

use crate::domain::models::points::PointsOutcome;

/// 结果表中的周积分列
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum WeeklyPoints {
    /// 首次上传，还没有可以比较的积分
    FirstUpload,
    Change(i64),
    /// 本次抓取失败
    Unavailable,
}

impl fmt::Display for WeeklyPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeeklyPoints::FirstUpload => write!(f, "N/A (first upload)"),
            WeeklyPoints::Change(n) => write!(f, "{}", n),
            WeeklyPoints::Unavailable => write!(f, "unavailable"),
        }
    }
}

/// 结果表的一行
#[derive(Debug, Clone, Serialize)]
pub struct ResultRow {
    /// 已保存的参与者才有 ID，无状态检查时为空
    pub participant_id: Option<Uuid>,
    pub name: String,
    pub profile_url: Option<String>,
    pub points: PointsOutcome,
    /// 无状态检查不显示周积分列
    pub weekly: Option<WeeklyPoints>,
}

/// 按周积分从高到低排序，不可用的行排在最后
///
/// 排序是稳定的，同分的行保持原来的顺序
pub fn sort_by_weekly(rows: &mut [ResultRow]) {
    rows.sort_by(|a, b| weekly_rank(b).cmp(&weekly_rank(a)));
}

fn weekly_rank(row: &ResultRow) -> (u8, i64) {
    match row.weekly {
        Some(WeeklyPoints::Change(n)) => (2, n),
        Some(WeeklyPoints::FirstUpload) | None => (1, 0),
        Some(WeeklyPoints::Unavailable) => (0, 0),
    }
}

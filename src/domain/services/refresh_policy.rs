// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// 刷新频率限制
///
/// 同一用户两次刷新之间至少间隔 `interval`
#[derive(Debug, Clone, Copy)]
pub struct RefreshPolicy {
    interval: Duration,
}

/// 刷新窗口状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshWindow {
    /// 现在可以刷新
    Open,
    /// 还需要等待
    Closed {
        last_refresh: DateTime<Utc>,
        next_refresh: DateTime<Utc>,
    },
}

/// `/next_refresh` 接口返回的内容
#[derive(Debug, Clone, Serialize)]
pub struct NextRefresh {
    pub next_refresh: DateTime<Utc>,
    pub can_refresh: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_remaining: Option<String>,
}

impl RefreshPolicy {
    pub fn new(interval_days: i64) -> Self {
        Self {
            interval: Duration::days(interval_days.max(0)),
        }
    }

    pub fn window(&self, last_refresh: Option<DateTime<Utc>>, now: DateTime<Utc>) -> RefreshWindow {
        match last_refresh {
            Some(last) if now - last < self.interval => RefreshWindow::Closed {
                last_refresh: last,
                next_refresh: last + self.interval,
            },
            _ => RefreshWindow::Open,
        }
    }

    pub fn next_refresh(&self, last_refresh: Option<DateTime<Utc>>, now: DateTime<Utc>) -> NextRefresh {
        match self.window(last_refresh, now) {
            RefreshWindow::Open => NextRefresh {
                next_refresh: now,
                can_refresh: true,
                time_remaining: None,
            },
            RefreshWindow::Closed { next_refresh, .. } => NextRefresh {
                next_refresh,
                can_refresh: false,
                time_remaining: Some(format_remaining(next_refresh - now)),
            },
        }
    }
}

impl RefreshWindow {
    /// 刷新过早时展示给用户的提示
    pub fn wait_message(&self, now: DateTime<Utc>) -> Option<String> {
        match self {
            RefreshWindow::Open => None,
            RefreshWindow::Closed {
                last_refresh,
                next_refresh,
            } => {
                let (since_days, since_hours) = days_and_hours(now - *last_refresh);
                let (left_days, left_hours) = days_and_hours(*next_refresh - now);
                Some(format!(
                    "Points were last refreshed {} days and {} hours ago. \
                     You can refresh again in {} days and {} hours.",
                    since_days, since_hours, left_days, left_hours
                ))
            }
        }
    }
}

fn days_and_hours(span: Duration) -> (i64, i64) {
    let span = span.max(Duration::zero());
    (span.num_days(), span.num_hours() % 24)
}

/// 格式化为 "<d>d <h>h <m>m"
pub fn format_remaining(span: Duration) -> String {
    let span = span.max(Duration::zero());
    format!(
        "{}d {}h {}m",
        span.num_days(),
        span.num_hours() % 24,
        span.num_minutes() % 60
    )
}

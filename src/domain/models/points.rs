// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Serialize;
use std::fmt;

/// 无法获取积分的原因
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum UnavailableReason {
    /// URL 缺失、为空或不是 http(s) 地址
    InvalidUrl(String),
    /// 目标主机解析到私有或环回地址
    BlockedHost(String),
    /// 网络层错误（连接失败、超时等）
    Fetch(String),
    /// 目标返回非 2xx 状态码
    HttpStatus(u16),
    /// 页面中找不到积分元素
    NotFound,
    /// 积分文本无法解析为整数
    Unparsable(String),
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnavailableReason::InvalidUrl(detail) => write!(f, "invalid profile url: {}", detail),
            UnavailableReason::BlockedHost(detail) => write!(f, "blocked host: {}", detail),
            UnavailableReason::Fetch(detail) => write!(f, "fetch failed: {}", detail),
            UnavailableReason::HttpStatus(code) => write!(f, "http status {}", code),
            UnavailableReason::NotFound => write!(f, "points element not found"),
            UnavailableReason::Unparsable(text) => write!(f, "unparsable points text: {:?}", text),
        }
    }
}

impl UnavailableReason {
    /// 用于指标标签的短名称
    pub fn kind(&self) -> &'static str {
        match self {
            UnavailableReason::InvalidUrl(_) => "invalid_url",
            UnavailableReason::BlockedHost(_) => "blocked_host",
            UnavailableReason::Fetch(_) => "fetch_error",
            UnavailableReason::HttpStatus(_) => "http_status",
            UnavailableReason::NotFound => "not_found",
            UnavailableReason::Unparsable(_) => "unparsable",
        }
    }
}

/// 单个个人主页的抓取结果
///
/// 失败不会中断整个批次，而是以 `Unavailable` 的形式记录在对应行上
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PointsOutcome {
    Points { points: i64 },
    Unavailable { cause: UnavailableReason },
}

impl PointsOutcome {
    pub fn points(value: i64) -> Self {
        PointsOutcome::Points { points: value }
    }

    pub fn unavailable(cause: UnavailableReason) -> Self {
        PointsOutcome::Unavailable { cause }
    }

    pub fn value(&self) -> Option<i64> {
        match self {
            PointsOutcome::Points { points } => Some(*points),
            PointsOutcome::Unavailable { .. } => None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.value().is_some()
    }
}

impl fmt::Display for PointsOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointsOutcome::Points { points } => write!(f, "{}", points),
            PointsOutcome::Unavailable { .. } => write!(f, "unavailable"),
        }
    }
}

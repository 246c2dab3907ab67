// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use rand::Rng;
use scraper::{Html, Selector};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::settings::ScraperSettings;
use crate::domain::models::points::{PointsOutcome, UnavailableReason};
use crate::engines::traits::{EngineError, FetchRequest, ScraperEngine};
use crate::engines::validators;

/// 积分所在元素的选择器
const LEAGUE_SELECTOR: &str = ".profile-league";
const POINTS_SELECTOR: &str = "strong";

/// 个人主页积分抓取器
///
/// 负责单个主页的请求和解析，任何失败都转换为 `PointsOutcome::Unavailable`
pub struct ProfileScraper {
    engine: Arc<dyn ScraperEngine>,
    timeout: Duration,
    min_delay_ms: u64,
    max_delay_ms: u64,
}

impl ProfileScraper {
    pub fn new(engine: Arc<dyn ScraperEngine>, settings: &ScraperSettings) -> Self {
        Self {
            engine,
            timeout: Duration::from_secs(settings.request_timeout_secs),
            min_delay_ms: settings.min_delay_ms,
            max_delay_ms: settings.max_delay_ms.max(settings.min_delay_ms),
        }
    }

    /// 获取一个主页的积分
    ///
    /// URL 缺失或格式不对时不会发出任何请求
    pub async fn fetch_points(&self, profile_url: Option<&str>) -> PointsOutcome {
        let outcome = self.fetch_inner(profile_url).await;
        let label = match &outcome {
            PointsOutcome::Points { .. } => "ok",
            PointsOutcome::Unavailable { cause } => cause.kind(),
        };
        metrics::counter!("profile_fetch_total", "outcome" => label).increment(1);
        outcome
    }

    async fn fetch_inner(&self, profile_url: Option<&str>) -> PointsOutcome {
        let Some(raw) = profile_url else {
            return PointsOutcome::unavailable(UnavailableReason::InvalidUrl(
                "no profile url".to_string(),
            ));
        };
        let url = match validators::parse_profile_url(raw) {
            Ok(url) => url,
            Err(e) => {
                debug!(profile_url = raw, "skipping invalid profile url: {}", e);
                return PointsOutcome::unavailable(UnavailableReason::InvalidUrl(raw.to_string()));
            }
        };

        self.politeness_delay().await;

        let request = FetchRequest {
            url: url.to_string(),
            timeout: self.timeout,
        };
        let response = match self.engine.fetch(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(profile_url = raw, engine = self.engine.name(), "error fetching points: {}", e);
                return PointsOutcome::unavailable(reason_for(e));
            }
        };

        if !(200..300).contains(&response.status_code) {
            warn!(
                profile_url = raw,
                status_code = response.status_code,
                "profile page returned an error status"
            );
            return PointsOutcome::unavailable(UnavailableReason::HttpStatus(response.status_code));
        }

        match extract_points(&response.content) {
            Ok(points) => PointsOutcome::points(points),
            Err(cause) => {
                debug!(profile_url = raw, "no points on profile page: {}", cause);
                PointsOutcome::unavailable(cause)
            }
        }
    }

    async fn politeness_delay(&self) {
        if self.max_delay_ms == 0 {
            return;
        }
        let millis = rand::rng().random_range(self.min_delay_ms..=self.max_delay_ms);
        tokio::time::sleep(Duration::from_millis(millis)).await;
    }
}

fn reason_for(err: EngineError) -> UnavailableReason {
    match err {
        EngineError::InvalidUrl(detail) => UnavailableReason::InvalidUrl(detail),
        EngineError::BlockedHost(detail) => UnavailableReason::BlockedHost(detail),
        EngineError::RequestFailed(e) => UnavailableReason::Fetch(e.to_string()),
        EngineError::Other(detail) => UnavailableReason::Fetch(detail),
    }
}

/// 从个人主页 HTML 中提取积分
///
/// 取第一个 `.profile-league` 元素中的第一个 `<strong>`，
/// 去掉结尾的 "points" 和千位分隔符后解析为整数
pub fn extract_points(html: &str) -> Result<i64, UnavailableReason> {
    let document = Html::parse_document(html);
    let league = Selector::parse(LEAGUE_SELECTOR)
        .map_err(|e| UnavailableReason::Unparsable(e.to_string()))?;
    let strong = Selector::parse(POINTS_SELECTOR)
        .map_err(|e| UnavailableReason::Unparsable(e.to_string()))?;

    let text = document
        .select(&league)
        .next()
        .and_then(|element| element.select(&strong).next())
        .map(|element| element.text().collect::<String>())
        .ok_or(UnavailableReason::NotFound)?;

    parse_points_text(&text)
}

/// 解析形如 "1,234 points" 的积分文本
pub fn parse_points_text(text: &str) -> Result<i64, UnavailableReason> {
    let trimmed = text.trim();
    let lowered = trimmed.to_ascii_lowercase();
    let without_suffix = if lowered.ends_with("points") {
        &trimmed[..trimmed.len() - "points".len()]
    } else if lowered.ends_with("point") {
        &trimmed[..trimmed.len() - "point".len()]
    } else {
        trimmed
    };

    let digits: String = without_suffix
        .chars()
        .filter(|c| !matches!(c, ',' | '.' | '_') && !c.is_whitespace())
        .collect();

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(UnavailableReason::Unparsable(trimmed.to_string()));
    }

    digits
        .parse::<i64>()
        .map_err(|_| UnavailableReason::Unparsable(trimmed.to_string()))
}

#[cfg(test)]
#[path = "profile_scraper_test.rs"]
mod tests;

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use futures::stream::{self, StreamExt};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::domain::models::points::{PointsOutcome, UnavailableReason};
use crate::domain::services::profile_scraper::ProfileScraper;

/// 每处理多少个主页输出一次进度
const PROGRESS_EVERY: usize = 5;
/// 汇总日志中最多列出的失败条目
const MAX_LISTED_FAILURES: usize = 3;

/// 一个待抓取的主页
#[derive(Debug, Clone)]
pub struct ProfileTarget {
    /// 用于日志的名称，通常是参与者姓名
    pub label: String,
    pub profile_url: Option<String>,
}

/// 一批抓取的结果
///
/// `outcomes[i]` 对应输入的第 i 个目标
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub outcomes: Vec<PointsOutcome>,
    pub unavailable: usize,
    pub elapsed: Duration,
}

/// 积分抓取调度器
///
/// 用有上限的并发对整批主页执行抓取，结果保持输入顺序
pub struct PointsDispatcher {
    scraper: Arc<ProfileScraper>,
    max_concurrency: usize,
}

impl PointsDispatcher {
    pub fn new(scraper: Arc<ProfileScraper>, max_concurrency: usize) -> Self {
        Self {
            scraper,
            max_concurrency: max_concurrency.max(1),
        }
    }

    /// 抓取一批主页
    ///
    /// 单个目标失败（包括任务 panic）只会让该行变为不可用，不会中断整批
    pub async fn dispatch(&self, targets: Vec<ProfileTarget>) -> BatchReport {
        let started = Instant::now();
        let total = targets.len();
        let processed = Arc::new(AtomicUsize::new(0));

        info!(
            total,
            max_concurrency = self.max_concurrency,
            "fetching points for profiles"
        );

        let outcomes: Vec<PointsOutcome> = stream::iter(targets.iter().cloned())
            .map(|target| {
                let scraper = self.scraper.clone();
                let processed = processed.clone();
                async move {
                    let label = target.label.clone();
                    let handle = tokio::spawn(async move {
                        scraper.fetch_points(target.profile_url.as_deref()).await
                    });
                    let outcome = match handle.await {
                        Ok(outcome) => outcome,
                        Err(e) => {
                            warn!(participant = %label, "profile worker failed: {}", e);
                            PointsOutcome::unavailable(UnavailableReason::Fetch(format!(
                                "worker failed: {}",
                                e
                            )))
                        }
                    };

                    let done = processed.fetch_add(1, Ordering::SeqCst) + 1;
                    if done % PROGRESS_EVERY == 0 || done == total {
                        info!(
                            "Progress: {}/{} profiles processed ({:.1}%)",
                            done,
                            total,
                            done as f64 / total as f64 * 100.0
                        );
                    }
                    outcome
                }
            })
            .buffered(self.max_concurrency)
            .collect()
            .await;

        let failures: Vec<(&ProfileTarget, &PointsOutcome)> = targets
            .iter()
            .zip(outcomes.iter())
            .filter(|(_, outcome)| !outcome.is_available())
            .collect();

        if !failures.is_empty() {
            warn!(
                "Encountered {} unavailable profiles while fetching points",
                failures.len()
            );
            for (target, outcome) in failures.iter().take(MAX_LISTED_FAILURES) {
                if let PointsOutcome::Unavailable { cause } = outcome {
                    warn!(participant = %target.label, "points unavailable: {}", cause);
                }
            }
        }

        let unavailable = failures.len();
        let elapsed = started.elapsed();
        metrics::histogram!("scrape_batch_seconds").record(elapsed.as_secs_f64());

        BatchReport {
            outcomes,
            unavailable,
            elapsed,
        }
    }
}

#[cfg(test)]
#[path = "points_dispatcher_test.rs"]
mod tests;

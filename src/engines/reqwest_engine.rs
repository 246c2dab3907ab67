// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::config::settings::ScraperSettings;
use crate::engines::traits::{EngineError, FetchRequest, FetchResponse, ScraperEngine};
use crate::engines::validators;
use async_trait::async_trait;
use reqwest::{header::LOCATION, redirect::Policy};
use std::time::Instant;
use tracing::debug;
use url::Url;

/// 单次抓取最多跟随的重定向次数
const MAX_REDIRECTS: usize = 10;

/// 抓取引擎
///
/// 基于reqwest实现的基本HTTP抓取引擎，所有请求共享一个连接池。
/// 重定向由引擎自己跟随，每一跳都要经过 SSRF 检查
pub struct ReqwestEngine {
    client: reqwest::Client,
    allow_private_hosts: bool,
    trusted_hosts: Vec<String>,
}

impl ReqwestEngine {
    /// 根据抓取配置创建引擎
    ///
    /// # 参数
    ///
    /// * `settings` - 抓取配置
    ///
    /// # 返回值
    ///
    /// * `Ok(ReqwestEngine)` - 创建好的引擎
    /// * `Err(EngineError)` - HTTP 客户端初始化失败
    pub fn new(settings: &ScraperSettings) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .pool_max_idle_per_host(settings.max_concurrency.max(1))
            .redirect(Policy::none())
            .build()?;

        Ok(Self {
            client,
            allow_private_hosts: settings.allow_private_hosts,
            trusted_hosts: settings.trusted_hosts.clone(),
        })
    }

    /// SSRF protection
    async fn check_host(&self, url: &Url) -> Result<(), EngineError> {
        if self.allow_private_hosts {
            return Ok(());
        }
        let trusted = url
            .host_str()
            .is_some_and(|host| self.trusted_hosts.iter().any(|t| t.eq_ignore_ascii_case(host)));
        if trusted {
            return Ok(());
        }
        validators::validate_url(url).await
    }
}

/// 3xx 响应中 `Location` 指向的下一跳
fn redirect_target(current: &Url, response: &reqwest::Response) -> Option<Url> {
    if !response.status().is_redirection() {
        return None;
    }
    let location = response.headers().get(LOCATION)?.to_str().ok()?;
    let next = current.join(location).ok()?;
    matches!(next.scheme(), "http" | "https").then_some(next)
}

#[async_trait]
impl ScraperEngine for ReqwestEngine {
    /// 执行HTTP抓取
    ///
    /// 非 2xx 状态码不视为错误，由调用方根据 `status_code` 判断
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, EngineError> {
        let mut url = validators::parse_profile_url(&request.url)?;
        let mut redirects = 0;

        let start = Instant::now();
        let response = loop {
            self.check_host(&url).await?;
            let response = self
                .client
                .get(url.clone())
                .timeout(request.timeout)
                .send()
                .await?;

            let Some(next) = redirect_target(&url, &response) else {
                break response;
            };
            redirects += 1;
            if redirects > MAX_REDIRECTS {
                return Err(EngineError::Other(format!(
                    "too many redirects fetching {}",
                    request.url
                )));
            }
            debug!(from = %url, to = %next, "following redirect");
            url = next;
        };

        let status_code = response.status().as_u16();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.trim().is_empty())
            .unwrap_or("text/html")
            .to_string();

        let content = response.text().await?;
        let response_time_ms = start.elapsed().as_millis() as u64;
        debug!(
            url = %request.url,
            status_code,
            redirects,
            response_time_ms,
            "profile page fetched"
        );

        Ok(FetchResponse {
            status_code,
            content,
            content_type,
            response_time_ms,
        })
    }

    /// 获取引擎名称
    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;

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

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

/// 开发环境默认的会话密钥，生产环境必须覆盖
pub const DEV_SESSION_SECRET: &str = "dev-key-for-points-tracker";
/// 开发环境默认的数据库初始化密钥
pub const DEV_SETUP_KEY: &str = "change-this-setup-key-in-production";

/// 应用程序配置设置
///
/// 包含服务器、数据库、抓取、会话、刷新周期和备份等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 数据库配置
    pub database: DatabaseSettings,
    /// 抓取配置
    pub scraper: ScraperSettings,
    /// 会话配置
    pub session: SessionSettings,
    /// 认证配置
    pub auth: AuthSettings,
    /// 刷新周期配置
    pub refresh: RefreshSettings,
    /// 数据库备份配置
    pub backup: BackupSettings,
    /// 管理配置
    pub admin: AdminSettings,
    /// 上传配置
    pub upload: UploadSettings,
    /// 指标配置
    #[serde(default)]
    pub metrics: MetricsSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 数据库配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// 数据库连接URL
    pub url: String,
    /// 最大连接数
    pub max_connections: Option<u32>,
    /// 最小连接数
    pub min_connections: Option<u32>,
    /// 连接超时时间（秒）
    pub connect_timeout: Option<u64>,
    /// 空闲连接超时时间（秒）
    pub idle_timeout: Option<u64>,
}

/// 抓取配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperSettings {
    /// 同时进行的抓取请求上限
    pub max_concurrency: usize,
    /// 单次请求超时时间（秒）
    pub request_timeout_secs: u64,
    /// 每次请求前随机延迟的下限（毫秒）
    pub min_delay_ms: u64,
    /// 每次请求前随机延迟的上限（毫秒）
    pub max_delay_ms: u64,
    /// 请求使用的 User-Agent
    pub user_agent: String,
    /// 是否允许访问私有地址 (仅用于测试和本地开发)
    pub allow_private_hosts: bool,
    /// 不做私有地址检查的主机名（例如内网镜像），重定向目标仍会检查
    #[serde(default)]
    pub trusted_hosts: Vec<String>,
}

/// 会话配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    /// 会话 Cookie 签名密钥
    pub secret: String,
    /// 会话有效期（小时）
    pub ttl_hours: i64,
    /// 是否只通过 HTTPS 发送 Cookie
    pub secure_cookie: bool,
}

/// 认证配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    /// PBKDF2 迭代次数
    pub password_iterations: u32,
}

/// 刷新周期配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshSettings {
    /// 两次刷新之间的最小间隔（天）
    pub interval_days: i64,
}

/// 数据库备份配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct BackupSettings {
    /// 是否启用备份
    pub enabled: bool,
    /// 备份目录
    pub directory: String,
    /// 保留的备份数量
    pub keep: usize,
}

/// 管理配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct AdminSettings {
    /// 数据库初始化接口的访问密钥
    pub setup_key: String,
}

/// 上传配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct UploadSettings {
    /// 上传文件大小上限（字节）
    pub max_bytes: usize,
}

/// 指标配置设置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetricsSettings {
    /// Prometheus 导出地址，未设置时不启动导出器
    pub listen: Option<String>,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载默认值、配置文件和环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::default_builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("POINTS").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// 只包含内置默认值的配置构建器
    ///
    /// 测试代码可以在此基础上调用 `set_override` 覆盖个别配置项
    pub fn default_builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("database.url", "sqlite://points.db?mode=rwc")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("database.connect_timeout", 10)?
            .set_default("database.idle_timeout", 300)?
            .set_default("scraper.max_concurrency", 10)?
            .set_default("scraper.request_timeout_secs", 10)?
            .set_default("scraper.min_delay_ms", 100)?
            .set_default("scraper.max_delay_ms", 500)?
            .set_default(
                "scraper.user_agent",
                "Mozilla/5.0 (compatible; points-tracker/0.1)",
            )?
            .set_default("scraper.allow_private_hosts", false)?
            .set_default("session.secret", DEV_SESSION_SECRET)?
            .set_default("session.ttl_hours", 24 * 7)?
            .set_default("session.secure_cookie", false)?
            .set_default("auth.password_iterations", 100_000)?
            .set_default("refresh.interval_days", 7)?
            .set_default("backup.enabled", true)?
            .set_default("backup.directory", "backups")?
            .set_default("backup.keep", 5)?
            .set_default("admin.setup_key", DEV_SETUP_KEY)?
            .set_default("upload.max_bytes", 16 * 1024 * 1024)
    }

    /// 是否仍在使用开发环境的默认密钥
    pub fn uses_development_secrets(&self) -> bool {
        self.session.secret == DEV_SESSION_SECRET || self.admin.setup_key == DEV_SETUP_KEY
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;

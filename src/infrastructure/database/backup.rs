// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Local};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::settings::BackupSettings;

const BACKUP_PREFIX: &str = "points_";
const BACKUP_SUFFIX: &str = ".db";

/// SQLite 数据库文件备份
///
/// 在上传和刷新之前复制数据库文件到备份目录，只保留最新的若干份。
/// 非文件型数据库（PostgreSQL、内存 SQLite）不做任何事。
#[derive(Debug, Clone)]
pub struct DatabaseBackup {
    source: Option<PathBuf>,
    directory: PathBuf,
    keep: usize,
    enabled: bool,
}

impl DatabaseBackup {
    pub fn new(settings: &BackupSettings, database_url: &str) -> Self {
        Self {
            source: sqlite_file_path(database_url),
            directory: PathBuf::from(&settings.directory),
            keep: settings.keep.max(1),
            enabled: settings.enabled,
        }
    }

    /// 执行一次备份，失败只记录日志
    pub async fn run(&self) -> Option<PathBuf> {
        match self.backup_at(Local::now()).await {
            Ok(Some(path)) => {
                info!(backup = %path.display(), "database backed up");
                Some(path)
            }
            Ok(None) => None,
            Err(e) => {
                warn!("database backup failed: {}", e);
                None
            }
        }
    }

    /// 以给定时间命名备份文件并轮换旧备份
    pub async fn backup_at(&self, now: DateTime<Local>) -> io::Result<Option<PathBuf>> {
        if !self.enabled {
            return Ok(None);
        }
        let Some(source) = &self.source else {
            return Ok(None);
        };
        if !tokio::fs::try_exists(source).await? {
            debug!(source = %source.display(), "database file not found, skipping backup");
            return Ok(None);
        }

        tokio::fs::create_dir_all(&self.directory).await?;
        let target = self.directory.join(format!(
            "{}{}{}",
            BACKUP_PREFIX,
            now.format("%Y%m%d_%H%M%S"),
            BACKUP_SUFFIX
        ));
        tokio::fs::copy(source, &target).await?;

        self.rotate().await?;
        Ok(Some(target))
    }

    /// 删除超出保留数量的旧备份
    ///
    /// 文件名中的时间戳保证按名称排序即按时间排序
    async fn rotate(&self) -> io::Result<()> {
        let mut backups = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.directory).await?;
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with(BACKUP_PREFIX) && name.ends_with(BACKUP_SUFFIX) {
                backups.push(entry.path());
            }
        }
        backups.sort();

        let excess = backups.len().saturating_sub(self.keep);
        for old in backups.into_iter().take(excess) {
            if let Err(e) = tokio::fs::remove_file(&old).await {
                warn!(backup = %old.display(), "failed to remove old backup: {}", e);
            }
        }
        Ok(())
    }
}

/// 从 SQLite 连接 URL 中取出数据库文件路径
///
/// `sqlite://points.db?mode=rwc` -> `points.db`，内存库和其他数据库返回 `None`
pub fn sqlite_file_path(url: &str) -> Option<PathBuf> {
    let rest = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path.contains(":memory:") {
        return None;
    }
    Some(Path::new(path).to_path_buf())
}

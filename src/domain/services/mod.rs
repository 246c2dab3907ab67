// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// - CSV 导入（csv_ingest）：解析和校验上传的参与者文件
/// - 主页抓取（profile_scraper）：获取并解析单个个人主页的积分
/// - 刷新策略（refresh_policy）：两次刷新之间的最小间隔
pub mod csv_ingest;
pub mod profile_scraper;
pub mod refresh_policy;

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 该模块定义了领域层的仓库接口，遵循依赖倒置原则。
/// 具体实现由基础设施层提供。
///
/// 包含的仓库接口：
/// - 参与者仓库（participant_repository）：参与者的增改查
/// - 积分历史仓库（points_history_repository）：每次抓取后的积分快照
/// - 刷新记录仓库（refresh_log_repository）：每个用户的刷新时间
/// - 用户仓库（user_repository）：账户注册与查询
pub mod participant_repository;
pub mod points_history_repository;
pub mod refresh_log_repository;
pub mod user_repository;

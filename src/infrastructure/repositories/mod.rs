// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库实现模块
///
/// 提供领域仓库接口基于 SeaORM 的实现
pub mod participant_repo_impl;
pub mod points_history_repo_impl;
pub mod refresh_log_repo_impl;
pub mod user_repo_impl;

pub use participant_repo_impl::ParticipantRepositoryImpl;
pub use points_history_repo_impl::PointsHistoryRepositoryImpl;
pub use refresh_log_repo_impl::RefreshLogRepositoryImpl;
pub use user_repo_impl::UserRepositoryImpl;

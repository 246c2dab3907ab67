// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// HTTP请求处理器模块
///
/// 每个处理器负责处理特定类型的HTTP请求并返回页面或跳转
pub mod auth_handler;
pub mod check_handler;
pub mod home_handler;
pub mod participant_handler;
pub mod points_handler;
pub mod setup_handler;

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 请求提取器模块
///
/// 从请求中取出登录用户、闪现消息和上传文件
pub mod csv_upload;
pub mod session_user;

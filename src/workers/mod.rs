// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工作器模块
///
/// 提供有并发上限的批量抓取调度
pub mod points_dispatcher;

pub use points_dispatcher::{BatchReport, PointsDispatcher, ProfileTarget};

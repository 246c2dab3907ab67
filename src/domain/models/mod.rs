// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 参与者（participant）：用户名下被跟踪的个人主页及其积分历史
/// - 积分（points）：单次抓取的结果，成功为整数，失败为不可用标记
/// - CSV 行（profile）：上传文件中的一条参与者记录
/// - 用户（user）：登录账户
pub mod participant;
pub mod points;
pub mod profile;
pub mod user;

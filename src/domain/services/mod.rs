// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - Actor 服务（actor_service）：外部抓取平台的抽象接口
/// - 互动统计（engagement_stats）：帖子统计、过滤与互动者聚合
pub mod actor_service;
pub mod engagement_stats;

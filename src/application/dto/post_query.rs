// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Deserialize;

/// 帖子详情查询参数
#[derive(Debug, Default, Deserialize)]
pub struct PostDetailQueryDto {
    /// 姓名或头衔关键字
    pub search: Option<String>,
    /// all / high / medium / low
    pub icp: Option<String>,
}

/// 互动者聚合查询参数
#[derive(Debug, Default, Deserialize)]
pub struct EngagersQueryDto {
    /// 只保留高匹配度的互动者
    #[serde(default)]
    pub icp_only: bool,
}

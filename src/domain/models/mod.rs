// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 抓取作业（scrape_job）：一次抓取请求及其生命周期
/// - 帖子（post）：被跟踪的社交媒体帖子
/// - 互动（engagement）：某个账号在帖子上的一次反应
pub mod engagement;
pub mod post;
pub mod scrape_job;

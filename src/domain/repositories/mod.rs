// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 该模块定义了领域层的仓库接口，遵循依赖倒置原则。
/// 具体实现由基础设施层基于 SeaORM 提供。
///
/// 包含的仓库接口：
/// - 抓取作业仓库（scrape_job_repository）：作业的创建与状态流转
/// - 帖子仓库（post_repository）：帖子的查询
/// - 互动仓库（engagement_repository）：互动的查询与联系标记
/// - 作业结果仓库（job_results_repository）：抓取结果的原子提交
pub mod engagement_repository;
pub mod job_results_repository;
pub mod post_repository;
pub mod scrape_job_repository;

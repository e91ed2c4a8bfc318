// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::scrape_job::ScrapeJob;
use async_trait::async_trait;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 记录未找到
    #[error("Record not found")]
    NotFound,
}

/// 抓取作业仓库特质
///
/// 定义作业数据访问接口。所有状态写入都是条件更新，
/// 终态作业不会被覆盖。
#[async_trait]
pub trait ScrapeJobRepository: Send + Sync {
    /// 创建新作业
    async fn create(&self, job: &ScrapeJob) -> Result<ScrapeJob, RepositoryError>;
    /// 根据ID查找作业
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ScrapeJob>, RepositoryError>;
    /// 查找属于指定用户的作业
    async fn find_for_user(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<ScrapeJob>, RepositoryError>;
    /// 持久化 Pending → Processing 的转换
    ///
    /// `job` 是已完成转换的作业；仅当库中状态仍为 Pending 时写入，返回是否有行被更新
    async fn mark_processing(&self, job: &ScrapeJob) -> Result<bool, RepositoryError>;
    /// 持久化 非终态 → Failed 的转换
    ///
    /// 仅当库中状态仍为非终态时写入，返回是否有行被更新
    async fn mark_failed(&self, job: &ScrapeJob) -> Result<bool, RepositoryError>;
}

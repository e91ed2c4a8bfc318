// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::engagement::ReactionRecord;
use crate::domain::models::scrape_job::{ScrapeJob, ScrapeJobStatus};
use crate::domain::repositories::scrape_job_repository::RepositoryError;
use async_trait::async_trait;
use uuid::Uuid;

/// 结果提交的结局
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// 本次调用完成了作业并写入了互动
    Committed { post_id: Uuid, engagements: u64 },
    /// 作业已被其他解析路径置为终态，未写入任何数据
    AlreadyTerminal(ScrapeJobStatus),
}

/// 作业结果仓库特质
///
/// 在单个事务内完成：作业状态的比较并交换、帖子查找或创建、互动批量写入。
/// 状态交换失败时整个事务回滚，保证同一作业的互动只写入一次。
#[async_trait]
pub trait JobResultsRepository: Send + Sync {
    async fn commit_results(
        &self,
        job: &ScrapeJob,
        records: &[ReactionRecord],
    ) -> Result<CommitOutcome, RepositoryError>;
}

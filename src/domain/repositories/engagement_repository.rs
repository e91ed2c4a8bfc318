// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::engagement::Engagement;
use crate::domain::repositories::scrape_job_repository::RepositoryError;
use async_trait::async_trait;
use uuid::Uuid;

/// 互动仓库特质
///
/// 默认列表只返回未隐藏的互动
#[async_trait]
pub trait EngagementRepository: Send + Sync {
    /// 根据ID查找互动
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Engagement>, RepositoryError>;
    /// 列出帖子下未隐藏的互动，按创建时间倒序
    async fn list_visible_for_post(&self, post_id: Uuid)
        -> Result<Vec<Engagement>, RepositoryError>;
    /// 列出多条帖子下未隐藏的互动，按创建时间倒序
    async fn list_visible_for_posts(
        &self,
        post_ids: &[Uuid],
    ) -> Result<Vec<Engagement>, RepositoryError>;
    /// 统计某个作业写入的互动数量
    async fn count_by_job(&self, job_id: Uuid) -> Result<u64, RepositoryError>;
    /// 持久化联系状态（contacted / hidden / updated_at）
    async fn save_contact_state(&self, engagement: &Engagement) -> Result<(), RepositoryError>;
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::post::Post;
use crate::domain::repositories::scrape_job_repository::RepositoryError;
use async_trait::async_trait;
use uuid::Uuid;

/// 帖子仓库特质
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// 根据ID查找帖子
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepositoryError>;
    /// 根据源URL查找帖子
    async fn find_by_url(&self, url: &str) -> Result<Option<Post>, RepositoryError>;
    /// 列出用户的活跃帖子，按创建时间倒序
    async fn list_active_for_user(&self, user_id: Uuid) -> Result<Vec<Post>, RepositoryError>;
}

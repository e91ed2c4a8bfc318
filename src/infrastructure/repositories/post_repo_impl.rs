// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::models::post::Post;
use crate::domain::repositories::post_repository::PostRepository;
use crate::domain::repositories::scrape_job_repository::RepositoryError;
use crate::infrastructure::database::entities::post as post_entity;
use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use std::sync::Arc;
use uuid::Uuid;

/// 帖子仓库实现
#[derive(Clone)]
pub struct PostRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl PostRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<post_entity::Model> for Post {
    fn from(model: post_entity::Model) -> Self {
        Self {
            id: model.id,
            url: model.url,
            user_id: model.user_id,
            author_name: model.author_name,
            author_headline: model.author_headline,
            content: model.content,
            total_reactions: model.total_reactions,
            posted_at: model.posted_at,
            last_scraped_at: model.last_scraped_at,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<Post> for post_entity::ActiveModel {
    fn from(post: Post) -> Self {
        Self {
            id: Set(post.id),
            url: Set(post.url),
            user_id: Set(post.user_id),
            author_name: Set(post.author_name),
            author_headline: Set(post.author_headline),
            content: Set(post.content),
            total_reactions: Set(post.total_reactions),
            posted_at: Set(post.posted_at),
            last_scraped_at: Set(post.last_scraped_at),
            is_active: Set(post.is_active),
            created_at: Set(post.created_at),
            updated_at: Set(post.updated_at),
        }
    }
}

#[async_trait]
impl PostRepository for PostRepositoryImpl {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepositoryError> {
        let model = post_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<Post>, RepositoryError> {
        let model = post_entity::Entity::find()
            .filter(post_entity::Column::Url.eq(url))
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn list_active_for_user(&self, user_id: Uuid) -> Result<Vec<Post>, RepositoryError> {
        let models = post_entity::Entity::find()
            .filter(post_entity::Column::UserId.eq(user_id))
            .filter(post_entity::Column::IsActive.eq(true))
            .order_by_desc(post_entity::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }
}

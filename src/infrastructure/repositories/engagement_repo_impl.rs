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

use crate::domain::models::engagement::Engagement;
use crate::domain::repositories::engagement_repository::EngagementRepository;
use crate::domain::repositories::scrape_job_repository::RepositoryError;
use crate::infrastructure::database::entities::engagement as engagement_entity;
use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

/// 互动仓库实现
#[derive(Clone)]
pub struct EngagementRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl EngagementRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<engagement_entity::Model> for Engagement {
    fn from(model: engagement_entity::Model) -> Self {
        Self {
            id: model.id,
            post_id: model.post_id,
            job_id: model.job_id,
            user_id: model.user_id,
            name: model.name,
            profile_url: model.profile_url,
            headline: model.headline,
            profile_image_url: model.profile_image_url,
            reaction_type: model.reaction_type,
            icp_score: model.icp_score,
            icp_fit: model.icp_fit.and_then(|fit| fit.parse().ok()),
            contacted: model.contacted,
            hidden: model.hidden,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<Engagement> for engagement_entity::ActiveModel {
    fn from(e: Engagement) -> Self {
        Self {
            id: Set(e.id),
            post_id: Set(e.post_id),
            job_id: Set(e.job_id),
            user_id: Set(e.user_id),
            name: Set(e.name),
            profile_url: Set(e.profile_url),
            headline: Set(e.headline),
            profile_image_url: Set(e.profile_image_url),
            reaction_type: Set(e.reaction_type),
            icp_score: Set(e.icp_score),
            icp_fit: Set(e.icp_fit.map(|fit| fit.to_string())),
            contacted: Set(e.contacted),
            hidden: Set(e.hidden),
            created_at: Set(e.created_at),
            updated_at: Set(e.updated_at),
        }
    }
}

#[async_trait]
impl EngagementRepository for EngagementRepositoryImpl {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Engagement>, RepositoryError> {
        let model = engagement_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn list_visible_for_post(
        &self,
        post_id: Uuid,
    ) -> Result<Vec<Engagement>, RepositoryError> {
        self.list_visible_for_posts(&[post_id]).await
    }

    async fn list_visible_for_posts(
        &self,
        post_ids: &[Uuid],
    ) -> Result<Vec<Engagement>, RepositoryError> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = engagement_entity::Entity::find()
            .filter(engagement_entity::Column::PostId.is_in(post_ids.iter().copied()))
            .filter(engagement_entity::Column::Hidden.eq(false))
            .order_by_desc(engagement_entity::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn count_by_job(&self, job_id: Uuid) -> Result<u64, RepositoryError> {
        let count = engagement_entity::Entity::find()
            .filter(engagement_entity::Column::JobId.eq(job_id))
            .count(self.db.as_ref())
            .await?;
        Ok(count)
    }

    async fn save_contact_state(&self, engagement: &Engagement) -> Result<(), RepositoryError> {
        let result = engagement_entity::Entity::update_many()
            .col_expr(
                engagement_entity::Column::Contacted,
                Expr::value(engagement.contacted),
            )
            .col_expr(engagement_entity::Column::Hidden, Expr::value(engagement.hidden))
            .col_expr(
                engagement_entity::Column::UpdatedAt,
                Expr::value(engagement.updated_at),
            )
            .filter(engagement_entity::Column::Id.eq(engagement.id))
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

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

use crate::domain::models::scrape_job::{ScrapeJob, ScrapeJobStatus};
use crate::domain::repositories::scrape_job_repository::{RepositoryError, ScrapeJobRepository};
use crate::infrastructure::database::entities::scrape_job as job_entity;
use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set,
};
use std::sync::Arc;
use uuid::Uuid;

/// 抓取作业仓库实现
///
/// 基于SeaORM实现。状态写入均带状态前置条件，避免覆盖终态。
#[derive(Clone)]
pub struct ScrapeJobRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl ScrapeJobRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

pub(crate) fn status_strings(statuses: &[ScrapeJobStatus]) -> Vec<String> {
    statuses.iter().map(ToString::to_string).collect()
}

impl From<job_entity::Model> for ScrapeJob {
    fn from(model: job_entity::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            post_url: model.post_url,
            status: model.status.parse().unwrap_or_default(),
            external_run_id: model.external_run_id,
            error_message: model.error_message,
            created_at: model.created_at,
            updated_at: model.updated_at,
            completed_at: model.completed_at,
        }
    }
}

impl From<ScrapeJob> for job_entity::ActiveModel {
    fn from(job: ScrapeJob) -> Self {
        Self {
            id: Set(job.id),
            user_id: Set(job.user_id),
            post_url: Set(job.post_url),
            status: Set(job.status.to_string()),
            external_run_id: Set(job.external_run_id),
            error_message: Set(job.error_message),
            created_at: Set(job.created_at),
            updated_at: Set(job.updated_at),
            completed_at: Set(job.completed_at),
        }
    }
}

#[async_trait]
impl ScrapeJobRepository for ScrapeJobRepositoryImpl {
    async fn create(&self, job: &ScrapeJob) -> Result<ScrapeJob, RepositoryError> {
        let model: job_entity::ActiveModel = job.clone().into();
        let inserted = model.insert(self.db.as_ref()).await?;
        Ok(inserted.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ScrapeJob>, RepositoryError> {
        let model = job_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn find_for_user(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<ScrapeJob>, RepositoryError> {
        let model = job_entity::Entity::find_by_id(id)
            .filter(job_entity::Column::UserId.eq(user_id))
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn mark_processing(&self, job: &ScrapeJob) -> Result<bool, RepositoryError> {
        let result = job_entity::Entity::update_many()
            .col_expr(
                job_entity::Column::Status,
                Expr::value(ScrapeJobStatus::Processing.to_string()),
            )
            .col_expr(
                job_entity::Column::ExternalRunId,
                Expr::value(job.external_run_id.clone()),
            )
            .col_expr(job_entity::Column::UpdatedAt, Expr::value(job.updated_at))
            .filter(job_entity::Column::Id.eq(job.id))
            .filter(job_entity::Column::Status.eq(ScrapeJobStatus::Pending.to_string()))
            .exec(self.db.as_ref())
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn mark_failed(&self, job: &ScrapeJob) -> Result<bool, RepositoryError> {
        let result = job_entity::Entity::update_many()
            .col_expr(
                job_entity::Column::Status,
                Expr::value(ScrapeJobStatus::Failed.to_string()),
            )
            .col_expr(
                job_entity::Column::ErrorMessage,
                Expr::value(job.error_message.clone()),
            )
            .col_expr(job_entity::Column::CompletedAt, Expr::value(job.completed_at))
            .col_expr(job_entity::Column::UpdatedAt, Expr::value(job.updated_at))
            .filter(job_entity::Column::Id.eq(job.id))
            .filter(
                job_entity::Column::Status
                    .is_in(status_strings(&ScrapeJobStatus::non_terminal())),
            )
            .exec(self.db.as_ref())
            .await?;
        Ok(result.rows_affected > 0)
    }
}

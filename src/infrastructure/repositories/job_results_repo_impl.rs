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

use crate::domain::models::engagement::{Engagement, ReactionRecord};
use crate::domain::models::post::Post;
use crate::domain::models::scrape_job::{ScrapeJob, ScrapeJobStatus};
use crate::domain::repositories::job_results_repository::{CommitOutcome, JobResultsRepository};
use crate::domain::repositories::scrape_job_repository::RepositoryError;
use crate::infrastructure::database::entities::{
    engagement as engagement_entity, post as post_entity, scrape_job as job_entity,
};
use crate::infrastructure::repositories::scrape_job_repo_impl::status_strings;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{
    sea_query::{Expr, OnConflict},
    ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, QueryFilter,
    TransactionTrait,
};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// 作业结果仓库实现
///
/// 结果提交在单个事务中完成：
/// 1. 作业状态从非终态比较并交换为 Completed
/// 2. 按URL查找或创建帖子
/// 3. 批量写入互动
#[derive(Clone)]
pub struct JobResultsRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl JobResultsRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// 查找或创建帖子，容忍并发插入同一URL
    async fn upsert_post(
        txn: &DatabaseTransaction,
        job: &ScrapeJob,
        total_reactions: i32,
        now: DateTime<FixedOffset>,
    ) -> Result<Uuid, RepositoryError> {
        let existing = post_entity::Entity::find()
            .filter(post_entity::Column::Url.eq(job.post_url.as_str()))
            .one(txn)
            .await?;

        if let Some(post) = existing {
            post_entity::Entity::update_many()
                .col_expr(post_entity::Column::LastScrapedAt, Expr::value(Some(now)))
                .col_expr(post_entity::Column::UpdatedAt, Expr::value(now))
                .filter(post_entity::Column::Id.eq(post.id))
                .exec(txn)
                .await?;
            return Ok(post.id);
        }

        let post = Post::from_scrape(job.post_url.clone(), job.user_id, total_reactions);
        let model: post_entity::ActiveModel = post.into();
        let inserted = post_entity::Entity::insert(model)
            .on_conflict(
                OnConflict::column(post_entity::Column::Url)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(txn)
            .await?;
        if inserted == 0 {
            debug!(post_url = %job.post_url, "Post inserted concurrently");
        }

        post_entity::Entity::find()
            .filter(post_entity::Column::Url.eq(job.post_url.as_str()))
            .one(txn)
            .await?
            .map(|post| post.id)
            .ok_or(RepositoryError::NotFound)
    }
}

#[async_trait]
impl JobResultsRepository for JobResultsRepositoryImpl {
    async fn commit_results(
        &self,
        job: &ScrapeJob,
        records: &[ReactionRecord],
    ) -> Result<CommitOutcome, RepositoryError> {
        let completed = match job.clone().complete() {
            Ok(completed) => completed,
            Err(_) => return Ok(CommitOutcome::AlreadyTerminal(job.status)),
        };

        let txn = self.db.begin().await?;

        let swapped = job_entity::Entity::update_many()
            .col_expr(
                job_entity::Column::Status,
                Expr::value(ScrapeJobStatus::Completed.to_string()),
            )
            .col_expr(
                job_entity::Column::CompletedAt,
                Expr::value(completed.completed_at),
            )
            .col_expr(job_entity::Column::UpdatedAt, Expr::value(completed.updated_at))
            .filter(job_entity::Column::Id.eq(job.id))
            .filter(
                job_entity::Column::Status
                    .is_in(status_strings(&ScrapeJobStatus::non_terminal())),
            )
            .exec(&txn)
            .await?;

        if swapped.rows_affected == 0 {
            txn.rollback().await?;
            let current = job_entity::Entity::find_by_id(job.id)
                .one(self.db.as_ref())
                .await?
                .ok_or(RepositoryError::NotFound)?;
            let status = current.status.parse().unwrap_or_default();
            return Ok(CommitOutcome::AlreadyTerminal(status));
        }

        let now: DateTime<FixedOffset> = Utc::now().into();
        let total_reactions = i32::try_from(records.len()).unwrap_or(i32::MAX);
        let post_id = Self::upsert_post(&txn, job, total_reactions, now).await?;

        let engagements: Vec<engagement_entity::ActiveModel> = records
            .iter()
            .map(|record| Engagement::from_record(record, post_id, job.id, job.user_id).into())
            .collect();

        let inserted = if engagements.is_empty() {
            0
        } else {
            engagement_entity::Entity::insert_many(engagements)
                .exec_without_returning(&txn)
                .await?
        };

        txn.commit().await?;

        Ok(CommitOutcome::Committed {
            post_id,
            engagements: inserted,
        })
    }
}

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

use crate::{
    application::{
        dto::{
            post_query::{EngagersQueryDto, PostDetailQueryDto},
            post_response::{
                EngagementDto, EngagersResponseDto, PostDetailResponseDto, PostListResponseDto,
                PostWithStatsDto, SuccessResponseDto,
            },
        },
        use_cases::error::UseCaseError,
    },
    domain::{
        models::engagement::IcpFit,
        repositories::{engagement_repository::EngagementRepository, post_repository::PostRepository},
        services::engagement_stats::{
            aggregate_engagers, EngagementFilter, EngagerSummary, PostDetailStats,
            PostSummaryStats,
        },
    },
};
use chrono::{DateTime, FixedOffset, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// 帖子与互动的读取视图，以及互动的联系标记
///
/// 所有查询都限定在调用者自己的帖子范围内
pub struct EngagementUseCase<PR, ER> {
    post_repo: Arc<PR>,
    engagement_repo: Arc<ER>,
}

impl<PR, ER> EngagementUseCase<PR, ER>
where
    PR: PostRepository + 'static,
    ER: EngagementRepository + 'static,
{
    pub fn new(post_repo: Arc<PR>, engagement_repo: Arc<ER>) -> Self {
        Self {
            post_repo,
            engagement_repo,
        }
    }

    fn now() -> DateTime<FixedOffset> {
        Utc::now().into()
    }

    /// 调用者的活跃帖子及其统计，最新的在前
    pub async fn list_posts(&self, user_id: Uuid) -> Result<PostListResponseDto, UseCaseError> {
        let posts = self.post_repo.list_active_for_user(user_id).await?;
        let post_ids: Vec<Uuid> = posts.iter().map(|p| p.id).collect();
        let engagements = self.engagement_repo.list_visible_for_posts(&post_ids).await?;

        let mut by_post: HashMap<Uuid, Vec<_>> = HashMap::new();
        for engagement in engagements {
            by_post.entry(engagement.post_id).or_default().push(engagement);
        }

        let now = Self::now();
        let posts = posts
            .into_iter()
            .map(|post| {
                let engagements = by_post.remove(&post.id).unwrap_or_default();
                PostWithStatsDto {
                    stats: PostSummaryStats::compute(&engagements, now),
                    post: post.into(),
                }
            })
            .collect();

        Ok(PostListResponseDto { posts })
    }

    /// 帖子详情
    ///
    /// 过滤条件只作用于互动列表，统计基于完整列表
    pub async fn post_detail(
        &self,
        user_id: Uuid,
        post_id: Uuid,
        query: PostDetailQueryDto,
    ) -> Result<PostDetailResponseDto, UseCaseError> {
        let filter = EngagementFilter {
            search: query.search,
            icp: parse_icp_filter(query.icp.as_deref())?,
        };

        let post = self
            .post_repo
            .find_by_id(post_id)
            .await?
            .filter(|p| p.user_id == user_id)
            .ok_or_else(|| UseCaseError::NotFound("Post not found".to_string()))?;

        let engagements = self.engagement_repo.list_visible_for_post(post.id).await?;
        let stats = PostDetailStats::compute(&engagements, Self::now());
        let engagements = filter
            .apply(engagements)
            .into_iter()
            .map(EngagementDto::from)
            .collect();

        Ok(PostDetailResponseDto {
            post: post.into(),
            engagements,
            stats,
        })
    }

    /// 跨帖子聚合的互动者
    ///
    /// 汇总基于全部互动者，`icp_only` 只过滤返回的列表
    pub async fn engagers(
        &self,
        user_id: Uuid,
        query: EngagersQueryDto,
    ) -> Result<EngagersResponseDto, UseCaseError> {
        let posts = self.post_repo.list_active_for_user(user_id).await?;
        let post_ids: Vec<Uuid> = posts.iter().map(|p| p.id).collect();
        let engagements = self.engagement_repo.list_visible_for_posts(&post_ids).await?;

        let engagers = aggregate_engagers(&engagements);
        let summary = EngagerSummary::compute(&engagers);
        let engagers = if query.icp_only {
            engagers
                .into_iter()
                .filter(|e| e.icp_fit == Some(IcpFit::High))
                .collect()
        } else {
            engagers
        };

        Ok(EngagersResponseDto { engagers, summary })
    }

    /// 标记互动为已联系，同时从默认列表隐藏
    pub async fn mark_contacted(
        &self,
        user_id: Uuid,
        engagement_id: Uuid,
    ) -> Result<SuccessResponseDto, UseCaseError> {
        let mut engagement = self
            .engagement_repo
            .find_by_id(engagement_id)
            .await?
            .ok_or_else(|| UseCaseError::NotFound("Engagement not found".to_string()))?;

        let owner = self
            .post_repo
            .find_by_id(engagement.post_id)
            .await?
            .map(|post| post.user_id);
        if owner != Some(user_id) {
            return Err(UseCaseError::Forbidden("Forbidden".to_string()));
        }

        engagement.mark_contacted();
        self.engagement_repo.save_contact_state(&engagement).await?;
        info!(engagement_id = %engagement.id, "Engagement marked as contacted");

        Ok(SuccessResponseDto::ok())
    }
}

fn parse_icp_filter(raw: Option<&str>) -> Result<Option<IcpFit>, UseCaseError> {
    match raw.map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some(value) => value
            .parse::<IcpFit>()
            .map(Some)
            .map_err(|_| UseCaseError::Validation(format!("Invalid icp filter: {}", value))),
    }
}

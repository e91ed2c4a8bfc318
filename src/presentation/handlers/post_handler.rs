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

use axum::{
    extract::Extension,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    application::{
        dto::{
            post_query::{EngagersQueryDto, PostDetailQueryDto},
            post_response::{EngagersResponseDto, PostDetailResponseDto, PostListResponseDto},
        },
        use_cases::engagement_use_case::EngagementUseCase,
    },
    domain::repositories::{
        engagement_repository::EngagementRepository, post_repository::PostRepository,
    },
    presentation::{
        errors::AppError,
        extractors::{
            current_user::CurrentUser,
            rejection::{AppPath, AppQuery},
        },
    },
};

/// 列出调用者的帖子及统计
pub async fn list_posts<PR, ER>(
    Extension(post_repo): Extension<Arc<PR>>,
    Extension(engagement_repo): Extension<Arc<ER>>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<PostListResponseDto>, AppError>
where
    PR: PostRepository + 'static,
    ER: EngagementRepository + 'static,
{
    let use_case = EngagementUseCase::new(post_repo, engagement_repo);
    Ok(Json(use_case.list_posts(user_id).await?))
}

/// 帖子详情
pub async fn get_post<PR, ER>(
    Extension(post_repo): Extension<Arc<PR>>,
    Extension(engagement_repo): Extension<Arc<ER>>,
    CurrentUser(user_id): CurrentUser,
    AppPath(post_id): AppPath<Uuid>,
    AppQuery(query): AppQuery<PostDetailQueryDto>,
) -> Result<Json<PostDetailResponseDto>, AppError>
where
    PR: PostRepository + 'static,
    ER: EngagementRepository + 'static,
{
    let use_case = EngagementUseCase::new(post_repo, engagement_repo);
    Ok(Json(use_case.post_detail(user_id, post_id, query).await?))
}

/// 跨帖子聚合的互动者
pub async fn list_engagers<PR, ER>(
    Extension(post_repo): Extension<Arc<PR>>,
    Extension(engagement_repo): Extension<Arc<ER>>,
    CurrentUser(user_id): CurrentUser,
    AppQuery(query): AppQuery<EngagersQueryDto>,
) -> Result<Json<EngagersResponseDto>, AppError>
where
    PR: PostRepository + 'static,
    ER: EngagementRepository + 'static,
{
    let use_case = EngagementUseCase::new(post_repo, engagement_repo);
    Ok(Json(use_case.engagers(user_id, query).await?))
}

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
        dto::post_response::SuccessResponseDto, use_cases::engagement_use_case::EngagementUseCase,
    },
    domain::repositories::{
        engagement_repository::EngagementRepository, post_repository::PostRepository,
    },
    presentation::{
        errors::AppError,
        extractors::{current_user::CurrentUser, rejection::AppPath},
    },
};

/// 标记互动为已联系
pub async fn mark_contacted<PR, ER>(
    Extension(post_repo): Extension<Arc<PR>>,
    Extension(engagement_repo): Extension<Arc<ER>>,
    CurrentUser(user_id): CurrentUser,
    AppPath(engagement_id): AppPath<Uuid>,
) -> Result<Json<SuccessResponseDto>, AppError>
where
    PR: PostRepository + 'static,
    ER: EngagementRepository + 'static,
{
    let use_case = EngagementUseCase::new(post_repo, engagement_repo);
    Ok(Json(use_case.mark_contacted(user_id, engagement_id).await?))
}

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

use axum::{extract::Extension, Json};
use std::sync::Arc;

use crate::{
    application::{
        dto::{
            scrape_request::{PollRequestDto, ScrapeRequestDto},
            scrape_response::{InitiateScrapeResponseDto, JobStatusResponseDto},
        },
        use_cases::scrape_use_case::ScrapeUseCase,
    },
    config::settings::Settings,
    domain::{
        repositories::{
            engagement_repository::EngagementRepository,
            job_results_repository::JobResultsRepository,
            scrape_job_repository::ScrapeJobRepository,
        },
        services::actor_service::ActorService,
    },
    presentation::{
        errors::AppError,
        extractors::{current_user::CurrentUser, rejection::AppJson},
    },
};

/// 发起抓取作业
pub async fn initiate_scrape<JR, ER, RR, AS>(
    Extension(job_repo): Extension<Arc<JR>>,
    Extension(engagement_repo): Extension<Arc<ER>>,
    Extension(results_repo): Extension<Arc<RR>>,
    Extension(actor): Extension<Arc<AS>>,
    Extension(settings): Extension<Arc<Settings>>,
    CurrentUser(user_id): CurrentUser,
    AppJson(payload): AppJson<ScrapeRequestDto>,
) -> Result<Json<InitiateScrapeResponseDto>, AppError>
where
    JR: ScrapeJobRepository + 'static,
    ER: EngagementRepository + 'static,
    RR: JobResultsRepository + 'static,
    AS: ActorService + 'static,
{
    let use_case = ScrapeUseCase::new(
        job_repo,
        engagement_repo,
        results_repo,
        actor,
        settings.apify.callback_url.clone(),
    );
    Ok(Json(use_case.initiate(user_id, payload).await?))
}

/// 轮询作业状态
pub async fn poll_scrape<JR, ER, RR, AS>(
    Extension(job_repo): Extension<Arc<JR>>,
    Extension(engagement_repo): Extension<Arc<ER>>,
    Extension(results_repo): Extension<Arc<RR>>,
    Extension(actor): Extension<Arc<AS>>,
    CurrentUser(user_id): CurrentUser,
    AppJson(payload): AppJson<PollRequestDto>,
) -> Result<Json<JobStatusResponseDto>, AppError>
where
    JR: ScrapeJobRepository + 'static,
    ER: EngagementRepository + 'static,
    RR: JobResultsRepository + 'static,
    AS: ActorService + 'static,
{
    let use_case = ScrapeUseCase::new(job_repo, engagement_repo, results_repo, actor, None);
    Ok(Json(use_case.poll(user_id, payload).await?))
}

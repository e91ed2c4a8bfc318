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

use axum::{body::Bytes, extract::Extension, http::HeaderMap, Json};
use std::sync::Arc;
use tracing::warn;

use crate::{
    application::{
        dto::{scrape_request::WebhookPayloadDto, scrape_response::WebhookResponseDto},
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
    presentation::errors::AppError,
    utils::signature::{self, SIGNATURE_HEADER},
};

/// 校验回调签名
///
/// 未配置密钥时跳过校验
fn check_signature(settings: &Settings, headers: &HeaderMap, body: &[u8]) -> Result<(), AppError> {
    let Some(secret) = settings.webhook.secret.as_deref().filter(|s| !s.is_empty()) else {
        warn!("Webhook secret not configured, skipping signature verification");
        return Ok(());
    };

    let provided = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if signature::verify(secret, body, provided) {
        Ok(())
    } else {
        warn!("Invalid webhook signature");
        Err(AppError::Unauthorized)
    }
}

/// 接收抓取平台的运行成功回调
///
/// 签名基于原始请求体计算，因此这里自行解析 JSON
pub async fn receive_webhook<JR, ER, RR, AS>(
    Extension(job_repo): Extension<Arc<JR>>,
    Extension(engagement_repo): Extension<Arc<ER>>,
    Extension(results_repo): Extension<Arc<RR>>,
    Extension(actor): Extension<Arc<AS>>,
    Extension(settings): Extension<Arc<Settings>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookResponseDto>, AppError>
where
    JR: ScrapeJobRepository + 'static,
    ER: EngagementRepository + 'static,
    RR: JobResultsRepository + 'static,
    AS: ActorService + 'static,
{
    check_signature(&settings, &headers, &body)?;

    let payload: WebhookPayloadDto = serde_json::from_slice(&body)
        .map_err(|e| AppError::Validation(format!("Invalid webhook payload: {}", e)))?;

    let use_case = ScrapeUseCase::new(job_repo, engagement_repo, results_repo, actor, None);
    Ok(Json(use_case.handle_callback(payload).await?))
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::ApifySettings;
use crate::domain::models::engagement::ReactionRecord;
use crate::domain::services::actor_service::{
    ActorError, ActorRun, ActorRunStatus, ActorService, StartRunRequest,
};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

/// 回调注册的事件类型
const RUN_SUCCEEDED_EVENT: &str = "ACTOR.RUN.SUCCEEDED";

#[derive(Serialize)]
struct RunInput<'a> {
    post_url: &'a str,
    reaction_type: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse<T> {
    data: T,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RunData {
    id: String,
    status: String,
    #[serde(default)]
    default_dataset_id: Option<String>,
}

impl From<RunData> for ActorRun {
    fn from(data: RunData) -> Self {
        Self {
            id: data.id,
            status: ActorRunStatus::parse(&data.status),
            default_dataset_id: data.default_dataset_id.filter(|id| !id.is_empty()),
        }
    }
}

impl From<reqwest::Error> for ActorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ActorError::Parse(err.to_string())
        } else {
            ActorError::Network(err.to_string())
        }
    }
}

/// 生成 `webhooks` 查询参数
///
/// 平台要求 Base64 编码的 JSON 数组，负载模板中的变量会被替换为 JSON 值
fn encode_webhooks(job_id: Uuid, callback_url: &str) -> String {
    let payload_template = format!(
        r#"{{"jobId":"{}","runId":{{{{resource.id}}}},"datasetId":{{{{resource.defaultDatasetId}}}}}}"#,
        job_id
    );
    let webhooks = json!([{
        "eventTypes": [RUN_SUCCEEDED_EVENT],
        "requestUrl": callback_url,
        "payloadTemplate": payload_template,
    }]);
    STANDARD.encode(webhooks.to_string())
}

/// 基于 Apify REST API v2 的 Actor 服务实现
pub struct ApifyActorService {
    client: reqwest::Client,
    base_url: String,
    token: String,
    actor_id: String,
}

impl ApifyActorService {
    pub fn new(settings: &ApifySettings) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            token: settings.token.clone(),
            actor_id: settings.actor_id.clone(),
        }
    }

    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ActorError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(ActorError::Api {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl ActorService for ApifyActorService {
    async fn start_run(&self, request: &StartRunRequest) -> Result<ActorRun, ActorError> {
        let url = format!("{}/acts/{}/runs", self.base_url, self.actor_id);
        let input = RunInput {
            post_url: &request.post_url,
            reaction_type: "ALL",
        };

        let mut builder = self.client.post(&url).bearer_auth(&self.token).json(&input);
        if let Some(callback_url) = &request.callback_url {
            builder = builder.query(&[("webhooks", encode_webhooks(request.job_id, callback_url))]);
        }

        let resp = Self::check(builder.send().await?).await?;
        let api_resp: ApiResponse<RunData> = resp.json().await?;
        Ok(api_resp.data.into())
    }

    async fn get_run(&self, run_id: &str) -> Result<ActorRun, ActorError> {
        let url = format!("{}/actor-runs/{}", self.base_url, run_id);
        let resp = self.client.get(&url).bearer_auth(&self.token).send().await?;
        let resp = Self::check(resp).await?;
        let api_resp: ApiResponse<RunData> = resp.json().await?;
        debug!(run_id, status = %api_resp.data.status, "Fetched run status");
        Ok(api_resp.data.into())
    }

    async fn fetch_dataset(&self, dataset_id: &str) -> Result<Vec<ReactionRecord>, ActorError> {
        let url = format!("{}/datasets/{}/items", self.base_url, dataset_id);
        let resp = self
            .client
            .get(&url)
            .query(&[("format", "json")])
            .bearer_auth(&self.token)
            .send()
            .await?;
        let resp = Self::check(resp).await?;
        let items: Vec<ReactionRecord> = resp.json().await?;
        debug!(dataset_id, count = items.len(), "Fetched dataset items");
        Ok(items)
    }
}

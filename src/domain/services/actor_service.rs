// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::engagement::ReactionRecord;
use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

/// 错误信息在作业上保留的最大长度
const MAX_ERROR_TEXT_LEN: usize = 200;
/// JSON 错误体中没有 message 时的描述
const START_FAILED_MESSAGE: &str = "Failed to start scraping";

/// 外部抓取 Actor 错误
#[derive(Debug, Error)]
pub enum ActorError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: Option<ApiErrorDetail>,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: Option<String>,
}

impl ActorError {
    /// 面向用户的错误描述
    ///
    /// API 错误优先取响应体中的 `error.message`，
    /// 响应体不是 JSON 时截取前 200 个字符
    pub fn user_message(&self) -> String {
        match self {
            ActorError::Api { body, .. } => match serde_json::from_str::<ApiErrorBody>(body) {
                Ok(parsed) => parsed
                    .error
                    .and_then(|detail| detail.message)
                    .unwrap_or_else(|| START_FAILED_MESSAGE.to_string()),
                Err(_) => body.chars().take(MAX_ERROR_TEXT_LEN).collect(),
            },
            other => other.to_string(),
        }
    }
}

/// 外部运行状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActorRunStatus {
    Ready,
    Running,
    Succeeded,
    Failed,
    TimingOut,
    TimedOut,
    Aborting,
    Aborted,
    Other(String),
}

impl ActorRunStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "READY" => ActorRunStatus::Ready,
            "RUNNING" => ActorRunStatus::Running,
            "SUCCEEDED" => ActorRunStatus::Succeeded,
            "FAILED" => ActorRunStatus::Failed,
            "TIMING-OUT" => ActorRunStatus::TimingOut,
            "TIMED-OUT" => ActorRunStatus::TimedOut,
            "ABORTING" => ActorRunStatus::Aborting,
            "ABORTED" => ActorRunStatus::Aborted,
            other => ActorRunStatus::Other(other.to_string()),
        }
    }

    /// 平台使用的原始状态字符串
    pub fn as_str(&self) -> &str {
        match self {
            ActorRunStatus::Ready => "READY",
            ActorRunStatus::Running => "RUNNING",
            ActorRunStatus::Succeeded => "SUCCEEDED",
            ActorRunStatus::Failed => "FAILED",
            ActorRunStatus::TimingOut => "TIMING-OUT",
            ActorRunStatus::TimedOut => "TIMED-OUT",
            ActorRunStatus::Aborting => "ABORTING",
            ActorRunStatus::Aborted => "ABORTED",
            ActorRunStatus::Other(raw) => raw,
        }
    }

    /// 运行尚未结束
    pub fn is_in_progress(&self) -> bool {
        matches!(
            self,
            ActorRunStatus::Ready
                | ActorRunStatus::Running
                | ActorRunStatus::TimingOut
                | ActorRunStatus::Aborting
        )
    }

    /// 运行以失败告终
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            ActorRunStatus::Failed | ActorRunStatus::TimedOut | ActorRunStatus::Aborted
        )
    }
}

/// 外部运行信息
#[derive(Debug, Clone)]
pub struct ActorRun {
    pub id: String,
    pub status: ActorRunStatus,
    pub default_dataset_id: Option<String>,
}

/// 启动运行的请求
#[derive(Debug, Clone)]
pub struct StartRunRequest {
    /// 作业ID，写入回调负载模板
    pub job_id: Uuid,
    pub post_url: String,
    /// 回调地址，为空时不注册 Webhook
    pub callback_url: Option<String>,
}

/// 外部抓取 Actor 服务特质
///
/// 启动运行、查询运行状态、读取结果数据集
#[async_trait]
pub trait ActorService: Send + Sync {
    async fn start_run(&self, request: &StartRunRequest) -> Result<ActorRun, ActorError>;

    async fn get_run(&self, run_id: &str) -> Result<ActorRun, ActorError>;

    async fn fetch_dataset(&self, dataset_id: &str) -> Result<Vec<ReactionRecord>, ActorError>;
}

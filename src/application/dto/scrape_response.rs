// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 发起抓取的响应
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiateScrapeResponseDto {
    pub job_id: Uuid,
    /// 外部运行ID
    pub run_id: String,
}

/// 作业状态响应
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatusResponseDto {
    /// pending / processing / completed / failed
    pub status: String,
    pub job_id: Uuid,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engagements_count: Option<u64>,
}

impl JobStatusResponseDto {
    pub fn processing(job_id: Uuid, message: impl Into<String>) -> Self {
        Self {
            status: "processing".to_string(),
            job_id,
            message: message.into(),
            engagements_count: None,
        }
    }

    pub fn failed(job_id: Uuid, message: impl Into<String>) -> Self {
        Self {
            status: "failed".to_string(),
            job_id,
            message: message.into(),
            engagements_count: None,
        }
    }

    pub fn completed(job_id: Uuid, message: impl Into<String>, engagements: u64) -> Self {
        Self {
            status: "completed".to_string(),
            job_id,
            message: message.into(),
            engagements_count: Some(engagements),
        }
    }
}

/// 回调处理响应
#[derive(Debug, Deserialize, Serialize)]
pub struct WebhookResponseDto {
    pub success: bool,
    pub message: String,
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::scrape_job::DomainError;
use crate::domain::repositories::scrape_job_repository::RepositoryError;
use thiserror::Error;
use uuid::Uuid;

/// 用例错误类型
#[derive(Error, Debug)]
pub enum UseCaseError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Forbidden(String),
    /// 外部抓取平台调用失败，可能已关联到某个作业
    #[error("{message}")]
    ExternalService {
        message: String,
        job_id: Option<Uuid>,
    },
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::application::use_cases::error::UseCaseError;
use crate::domain::repositories::scrape_job_repository::RepositoryError;

/// 应用错误类型
///
/// 封装所有可能的应用层错误，统一转换为 `{ error, jobId? }` 响应
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("{message}")]
    ExternalService {
        message: String,
        job_id: Option<Uuid>,
    },
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::ExternalService { .. } | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            AppError::ExternalService {
                message,
                job_id: Some(job_id),
            } => json!({ "error": message, "jobId": job_id }),
            AppError::Internal(err) => {
                tracing::error!("Internal error: {:#}", err);
                json!({ "error": self.to_string() })
            }
            other => json!({ "error": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => AppError::NotFound(err.to_string()),
            RepositoryError::Database(_) => AppError::Internal(err.into()),
        }
    }
}

impl From<UseCaseError> for AppError {
    fn from(err: UseCaseError) -> Self {
        match err {
            UseCaseError::Validation(msg) => AppError::Validation(msg),
            UseCaseError::NotFound(msg) => AppError::NotFound(msg),
            UseCaseError::Forbidden(msg) => AppError::Forbidden(msg),
            UseCaseError::ExternalService { message, job_id } => {
                AppError::ExternalService { message, job_id }
            }
            UseCaseError::Repository(e) => e.into(),
            UseCaseError::Domain(e) => AppError::Internal(e.into()),
        }
    }
}

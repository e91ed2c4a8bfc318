// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// 抓取作业实体
///
/// 表示一次针对某条帖子的互动数据抓取请求。作业在提交时创建，
/// 随外部 Actor 运行的推进由轮询或 Webhook 更新，
/// 最终停留在 Completed 或 Failed 终态。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeJob {
    /// 作业唯一标识符
    pub id: Uuid,
    /// 所属用户ID
    pub user_id: Uuid,
    /// 被抓取的帖子URL
    pub post_url: String,
    /// 作业状态
    pub status: ScrapeJobStatus,
    /// 外部 Actor 运行ID，启动成功后写入
    pub external_run_id: Option<String>,
    /// 失败原因
    pub error_message: Option<String>,
    /// 创建时间
    pub created_at: DateTime<FixedOffset>,
    /// 更新时间
    pub updated_at: DateTime<FixedOffset>,
    /// 进入终态的时间
    pub completed_at: Option<DateTime<FixedOffset>>,
}

/// 抓取作业状态枚举
///
/// 状态转换遵循以下流程：
/// Pending → Processing → Completed/Failed
///
/// 非终态可以直接进入任一终态，终态不可再变。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScrapeJobStatus {
    /// 已创建，外部运行尚未启动
    #[default]
    Pending,
    /// 外部运行进行中
    Processing,
    /// 结果已入库
    Completed,
    /// 已失败
    Failed,
}

impl ScrapeJobStatus {
    /// 是否为终态
    pub fn is_terminal(&self) -> bool {
        matches!(self, ScrapeJobStatus::Completed | ScrapeJobStatus::Failed)
    }

    /// 所有非终态，供条件更新使用
    pub fn non_terminal() -> [ScrapeJobStatus; 2] {
        [ScrapeJobStatus::Pending, ScrapeJobStatus::Processing]
    }
}

impl fmt::Display for ScrapeJobStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScrapeJobStatus::Pending => write!(f, "pending"),
            ScrapeJobStatus::Processing => write!(f, "processing"),
            ScrapeJobStatus::Completed => write!(f, "completed"),
            ScrapeJobStatus::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for ScrapeJobStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ScrapeJobStatus::Pending),
            "processing" => Ok(ScrapeJobStatus::Processing),
            "completed" => Ok(ScrapeJobStatus::Completed),
            "failed" => Ok(ScrapeJobStatus::Failed),
            _ => Err(()),
        }
    }
}

/// 领域错误类型
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    /// 无效的状态转换
    #[error("Invalid state transition from {from} to {to}")]
    InvalidStateTransition {
        from: ScrapeJobStatus,
        to: ScrapeJobStatus,
    },
}

impl ScrapeJob {
    /// 创建一个新的待处理作业
    ///
    /// # 参数
    ///
    /// * `user_id` - 所属用户ID
    /// * `post_url` - 帖子URL
    pub fn new(user_id: Uuid, post_url: String) -> Self {
        let now: DateTime<FixedOffset> = Utc::now().into();
        Self {
            id: Uuid::new_v4(),
            user_id,
            post_url,
            status: ScrapeJobStatus::Pending,
            external_run_id: None,
            error_message: None,
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    /// 外部运行启动成功
    ///
    /// 将状态从Pending变更为Processing，并记录运行ID
    pub fn start_processing(mut self, run_id: String) -> Result<Self, DomainError> {
        match self.status {
            ScrapeJobStatus::Pending => {
                self.status = ScrapeJobStatus::Processing;
                self.external_run_id = Some(run_id);
                self.updated_at = Utc::now().into();
                Ok(self)
            }
            from => Err(DomainError::InvalidStateTransition {
                from,
                to: ScrapeJobStatus::Processing,
            }),
        }
    }

    /// 标记作业完成
    pub fn complete(mut self) -> Result<Self, DomainError> {
        if self.status.is_terminal() {
            return Err(DomainError::InvalidStateTransition {
                from: self.status,
                to: ScrapeJobStatus::Completed,
            });
        }
        let now: DateTime<FixedOffset> = Utc::now().into();
        self.status = ScrapeJobStatus::Completed;
        self.completed_at = Some(now);
        self.updated_at = now;
        Ok(self)
    }

    /// 标记作业失败并记录原因
    pub fn fail(mut self, message: impl Into<String>) -> Result<Self, DomainError> {
        if self.status.is_terminal() {
            return Err(DomainError::InvalidStateTransition {
                from: self.status,
                to: ScrapeJobStatus::Failed,
            });
        }
        let now: DateTime<FixedOffset> = Utc::now().into();
        self.status = ScrapeJobStatus::Failed;
        self.error_message = Some(message.into());
        self.completed_at = Some(now);
        self.updated_at = now;
        Ok(self)
    }
}

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

use crate::{
    application::{
        dto::{
            scrape_request::{PollRequestDto, ScrapeRequestDto, WebhookPayloadDto},
            scrape_response::{InitiateScrapeResponseDto, JobStatusResponseDto, WebhookResponseDto},
        },
        use_cases::error::UseCaseError,
    },
    domain::{
        models::{
            engagement::ReactionRecord,
            scrape_job::{ScrapeJob, ScrapeJobStatus},
        },
        repositories::{
            engagement_repository::EngagementRepository,
            job_results_repository::{CommitOutcome, JobResultsRepository},
            scrape_job_repository::ScrapeJobRepository,
        },
        services::actor_service::{ActorRunStatus, ActorService, StartRunRequest},
    },
    utils::validators::validate_post_url,
};
use metrics::counter;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;
use validator::Validate;

const JOB_NOT_FOUND: &str = "Job not found";

/// 抓取作业用例
///
/// 负责作业的发起，以及轮询与回调两条解析路径。
/// 两条路径共用 [`JobResultsRepository::commit_results`] 写入结果。
pub struct ScrapeUseCase<JR, ER, RR, AS> {
    job_repo: Arc<JR>,
    engagement_repo: Arc<ER>,
    results_repo: Arc<RR>,
    actor: Arc<AS>,
    callback_url: Option<String>,
}

impl<JR, ER, RR, AS> ScrapeUseCase<JR, ER, RR, AS>
where
    JR: ScrapeJobRepository + 'static,
    ER: EngagementRepository + 'static,
    RR: JobResultsRepository + 'static,
    AS: ActorService + 'static,
{
    pub fn new(
        job_repo: Arc<JR>,
        engagement_repo: Arc<ER>,
        results_repo: Arc<RR>,
        actor: Arc<AS>,
        callback_url: Option<String>,
    ) -> Self {
        Self {
            job_repo,
            engagement_repo,
            results_repo,
            actor,
            callback_url,
        }
    }

    /// 校验URL、创建作业并启动外部运行
    pub async fn initiate(
        &self,
        user_id: Uuid,
        dto: ScrapeRequestDto,
    ) -> Result<InitiateScrapeResponseDto, UseCaseError> {
        dto.validate()
            .map_err(|e| UseCaseError::Validation(e.to_string()))?;
        validate_post_url(&dto.url).map_err(|e| UseCaseError::Validation(e.to_string()))?;

        let job = self
            .job_repo
            .create(&ScrapeJob::new(user_id, dto.url.trim().to_string()))
            .await?;
        counter!("scrape_jobs_total").increment(1);
        info!(job_id = %job.id, post_url = %job.post_url, "Scrape job created");

        let request = StartRunRequest {
            job_id: job.id,
            post_url: job.post_url.clone(),
            callback_url: self.callback_url.clone(),
        };

        match self.actor.start_run(&request).await {
            Ok(run) => {
                let processing = job.clone().start_processing(run.id.clone())?;
                // 回调可能已先行完成作业，此时保持终态
                if !self.job_repo.mark_processing(&processing).await? {
                    warn!(job_id = %job.id, "Job left pending before run id was stored");
                }
                info!(job_id = %job.id, run_id = %run.id, "Actor run started");
                Ok(InitiateScrapeResponseDto {
                    job_id: job.id,
                    run_id: run.id,
                })
            }
            Err(e) => {
                let job_id = job.id;
                let message = e.user_message();
                error!(job_id = %job_id, error = %e, "Failed to start actor run");
                self.job_repo.mark_failed(&job.fail(message.clone())?).await?;
                counter!("scrape_jobs_failed_total").increment(1);
                Err(UseCaseError::ExternalService {
                    message,
                    job_id: Some(job_id),
                })
            }
        }
    }

    /// 轮询作业状态，必要时写入结果
    pub async fn poll(
        &self,
        user_id: Uuid,
        dto: PollRequestDto,
    ) -> Result<JobStatusResponseDto, UseCaseError> {
        let raw_id = dto
            .job_id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| UseCaseError::Validation("Job ID required".to_string()))?;
        let job_id = Uuid::parse_str(raw_id.trim())
            .map_err(|_| UseCaseError::NotFound(JOB_NOT_FOUND.to_string()))?;

        let job = self
            .job_repo
            .find_for_user(job_id, user_id)
            .await?
            .ok_or_else(|| UseCaseError::NotFound(JOB_NOT_FOUND.to_string()))?;

        if job.status.is_terminal() {
            return self.terminal_response(&job).await;
        }

        let Some(run_id) = job.external_run_id.clone() else {
            return Ok(JobStatusResponseDto::processing(job.id, "Waiting for run to start"));
        };

        let run = match self.actor.get_run(&run_id).await {
            Ok(run) => run,
            Err(e) => {
                warn!(job_id = %job.id, run_id = %run_id, error = %e, "Unable to check run status");
                return Ok(JobStatusResponseDto::processing(job.id, "Unable to check status"));
            }
        };

        if run.status.is_in_progress() {
            return Ok(JobStatusResponseDto::processing(job.id, "Scraping in progress"));
        }

        if run.status.is_failure() {
            let status = run.status.as_str().to_lowercase();
            let failed = job.fail(format!("Apify run {}", status))?;
            if !self.job_repo.mark_failed(&failed).await? {
                return self.reload_terminal(failed.id).await;
            }
            counter!("scrape_jobs_failed_total").increment(1);
            info!(job_id = %failed.id, run_status = %status, "Actor run ended without results");
            return Ok(JobStatusResponseDto::failed(
                failed.id,
                format!("Scraping {}", status),
            ));
        }

        if run.status != ActorRunStatus::Succeeded {
            return Ok(JobStatusResponseDto::processing(job.id, "Checking status..."));
        }

        let Some(dataset_id) = run.default_dataset_id else {
            warn!(job_id = %job.id, "Run succeeded without a dataset id");
            return Ok(JobStatusResponseDto::processing(job.id, "Waiting for dataset"));
        };

        let records = match self.actor.fetch_dataset(&dataset_id).await {
            Ok(records) => records,
            Err(e) => {
                error!(job_id = %job.id, dataset_id = %dataset_id, error = %e, "Failed to fetch dataset");
                let message = "Failed to fetch results";
                if !self.job_repo.mark_failed(&job.clone().fail(message)?).await? {
                    return self.reload_terminal(job.id).await;
                }
                counter!("scrape_jobs_failed_total").increment(1);
                return Ok(JobStatusResponseDto::failed(job.id, message));
            }
        };

        match self.ingest(&job, &records).await? {
            CommitOutcome::Committed { engagements, .. } => Ok(JobStatusResponseDto::completed(
                job.id,
                format!("Successfully scraped {} engagements", engagements),
                engagements,
            )),
            CommitOutcome::AlreadyTerminal(_) => self.reload_terminal(job.id).await,
        }
    }

    /// 处理平台的运行成功回调
    pub async fn handle_callback(
        &self,
        dto: WebhookPayloadDto,
    ) -> Result<WebhookResponseDto, UseCaseError> {
        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        let (Some(raw_job_id), Some(dataset_id)) = (non_empty(dto.job_id), non_empty(dto.dataset_id))
        else {
            return Err(UseCaseError::Validation("Missing required fields".to_string()));
        };
        let job_id = Uuid::parse_str(raw_job_id.trim())
            .map_err(|_| UseCaseError::NotFound(JOB_NOT_FOUND.to_string()))?;

        let job = self
            .job_repo
            .find_by_id(job_id)
            .await?
            .ok_or_else(|| UseCaseError::NotFound(JOB_NOT_FOUND.to_string()))?;

        if job.status.is_terminal() {
            info!(job_id = %job.id, status = %job.status, "Callback for finished job ignored");
            return Ok(WebhookResponseDto {
                success: true,
                message: format!("Job already {}", job.status),
            });
        }

        let records = match self.actor.fetch_dataset(&dataset_id).await {
            Ok(records) => records,
            Err(e) => {
                error!(job_id = %job.id, dataset_id = %dataset_id, error = %e, "Failed to fetch dataset");
                let failed = job.clone().fail("Failed to fetch scraping results")?;
                if self.job_repo.mark_failed(&failed).await? {
                    counter!("scrape_jobs_failed_total").increment(1);
                }
                return Err(UseCaseError::ExternalService {
                    message: "Failed to fetch dataset".to_string(),
                    job_id: Some(job.id),
                });
            }
        };

        let message = match self.ingest(&job, &records).await? {
            CommitOutcome::Committed { engagements, .. } => {
                format!("Processed {} engagements", engagements)
            }
            CommitOutcome::AlreadyTerminal(status) => format!("Job already {}", status),
        };
        Ok(WebhookResponseDto {
            success: true,
            message,
        })
    }

    async fn ingest(
        &self,
        job: &ScrapeJob,
        records: &[ReactionRecord],
    ) -> Result<CommitOutcome, UseCaseError> {
        let outcome = self.results_repo.commit_results(job, records).await?;
        match &outcome {
            CommitOutcome::Committed {
                post_id,
                engagements,
            } => {
                counter!("scrape_jobs_completed_total").increment(1);
                counter!("engagements_ingested_total").increment(*engagements);
                info!(job_id = %job.id, post_id = %post_id, engagements, "Job completed");
            }
            CommitOutcome::AlreadyTerminal(status) => {
                info!(job_id = %job.id, status = %status, "Job finished by another resolver");
            }
        }
        Ok(outcome)
    }

    async fn reload_terminal(&self, job_id: Uuid) -> Result<JobStatusResponseDto, UseCaseError> {
        let job = self
            .job_repo
            .find_by_id(job_id)
            .await?
            .ok_or_else(|| UseCaseError::NotFound(JOB_NOT_FOUND.to_string()))?;
        self.terminal_response(&job).await
    }

    async fn terminal_response(
        &self,
        job: &ScrapeJob,
    ) -> Result<JobStatusResponseDto, UseCaseError> {
        match job.status {
            ScrapeJobStatus::Completed => {
                let count = self.engagement_repo.count_by_job(job.id).await?;
                Ok(JobStatusResponseDto::completed(job.id, "Job completed", count))
            }
            _ => Ok(JobStatusResponseDto::failed(
                job.id,
                job.error_message.clone().unwrap_or_default(),
            )),
        }
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::super::helpers::{setup_db, POST_URL};
use engagetrackr::domain::models::engagement::{ReactionRecord, Reactor};
use engagetrackr::domain::models::scrape_job::{ScrapeJob, ScrapeJobStatus};
use engagetrackr::domain::repositories::engagement_repository::EngagementRepository;
use engagetrackr::domain::repositories::job_results_repository::{
    CommitOutcome, JobResultsRepository,
};
use engagetrackr::domain::repositories::post_repository::PostRepository;
use engagetrackr::domain::repositories::scrape_job_repository::ScrapeJobRepository;
use engagetrackr::infrastructure::repositories::engagement_repo_impl::EngagementRepositoryImpl;
use engagetrackr::infrastructure::repositories::job_results_repo_impl::JobResultsRepositoryImpl;
use engagetrackr::infrastructure::repositories::post_repo_impl::PostRepositoryImpl;
use engagetrackr::infrastructure::repositories::scrape_job_repo_impl::ScrapeJobRepositoryImpl;
use uuid::Uuid;

fn record(name: &str) -> ReactionRecord {
    ReactionRecord {
        reactor: Some(Reactor {
            name: Some(name.to_string()),
            profile_url: Some(format!("https://www.linkedin.com/in/{}", name.to_lowercase())),
            headline: None,
            profile_pictures: None,
        }),
        reaction_type: Some("LIKE".to_string()),
    }
}

async fn processing_job(jobs: &ScrapeJobRepositoryImpl, user_id: Uuid) -> ScrapeJob {
    let job = jobs
        .create(&ScrapeJob::new(user_id, POST_URL.to_string()))
        .await
        .unwrap();
    let job = job.start_processing("run-1".to_string()).unwrap();
    assert!(jobs.mark_processing(&job).await.unwrap());
    job
}

#[tokio::test]
async fn test_commit_results_is_exactly_once() {
    let db = setup_db().await;
    let jobs = ScrapeJobRepositoryImpl::new(db.clone());
    let results = JobResultsRepositoryImpl::new(db.clone());
    let engagements = EngagementRepositoryImpl::new(db.clone());
    let posts = PostRepositoryImpl::new(db.clone());

    let user_id = Uuid::new_v4();
    let job = processing_job(&jobs, user_id).await;
    let records = vec![record("Ada"), record("Grace")];

    // 两个解析路径持有同一份过期快照
    let first = results.commit_results(&job, &records).await.unwrap();
    let second = results.commit_results(&job, &records).await.unwrap();

    let post = posts.find_by_url(POST_URL).await.unwrap().unwrap();
    assert_eq!(
        first,
        CommitOutcome::Committed {
            post_id: post.id,
            engagements: 2
        }
    );
    assert_eq!(second, CommitOutcome::AlreadyTerminal(ScrapeJobStatus::Completed));
    assert_eq!(engagements.count_by_job(job.id).await.unwrap(), 2);
    assert_eq!(post.user_id, user_id);
    assert_eq!(post.total_reactions, 2);

    let stored = jobs.find_by_id(job.id).await.unwrap().unwrap();
    assert_eq!(stored.status, ScrapeJobStatus::Completed);
    assert!(stored.completed_at.is_some());
}

#[tokio::test]
async fn test_commit_results_skips_failed_job() {
    let db = setup_db().await;
    let jobs = ScrapeJobRepositoryImpl::new(db.clone());
    let results = JobResultsRepositoryImpl::new(db.clone());
    let engagements = EngagementRepositoryImpl::new(db.clone());
    let posts = PostRepositoryImpl::new(db.clone());

    let job = processing_job(&jobs, Uuid::new_v4()).await;
    let failed = job.clone().fail("Apify run aborted").unwrap();
    assert!(jobs.mark_failed(&failed).await.unwrap());

    let outcome = results.commit_results(&job, &[record("Ada")]).await.unwrap();

    assert_eq!(outcome, CommitOutcome::AlreadyTerminal(ScrapeJobStatus::Failed));
    assert_eq!(engagements.count_by_job(job.id).await.unwrap(), 0);
    assert!(posts.find_by_url(POST_URL).await.unwrap().is_none());
}

#[tokio::test]
async fn test_commit_results_reuses_existing_post() {
    let db = setup_db().await;
    let jobs = ScrapeJobRepositoryImpl::new(db.clone());
    let results = JobResultsRepositoryImpl::new(db.clone());
    let posts = PostRepositoryImpl::new(db.clone());

    let owner = Uuid::new_v4();
    let first = processing_job(&jobs, owner).await;
    results.commit_results(&first, &[record("Ada")]).await.unwrap();
    let created = posts.find_by_url(POST_URL).await.unwrap().unwrap();

    let second = processing_job(&jobs, Uuid::new_v4()).await;
    let outcome = results.commit_results(&second, &[]).await.unwrap();

    assert_eq!(
        outcome,
        CommitOutcome::Committed {
            post_id: created.id,
            engagements: 0
        }
    );
    let reused = posts.find_by_url(POST_URL).await.unwrap().unwrap();
    assert_eq!(reused.user_id, owner);
    assert!(reused.last_scraped_at >= created.last_scraped_at);
}

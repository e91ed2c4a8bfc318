// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::super::helpers::{setup_db, POST_URL};
use engagetrackr::domain::models::scrape_job::{ScrapeJob, ScrapeJobStatus};
use engagetrackr::domain::repositories::scrape_job_repository::ScrapeJobRepository;
use engagetrackr::infrastructure::repositories::scrape_job_repo_impl::ScrapeJobRepositoryImpl;
use uuid::Uuid;

#[tokio::test]
async fn test_create_and_find_for_user() {
    let db = setup_db().await;
    let repo = ScrapeJobRepositoryImpl::new(db);
    let user_id = Uuid::new_v4();

    let job = repo
        .create(&ScrapeJob::new(user_id, POST_URL.to_string()))
        .await
        .unwrap();

    let found = repo.find_for_user(job.id, user_id).await.unwrap().unwrap();
    assert_eq!(found.status, ScrapeJobStatus::Pending);
    assert_eq!(found.post_url, POST_URL);
    assert!(found.external_run_id.is_none());

    assert!(repo.find_for_user(job.id, Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_terminal_job_is_never_overwritten() {
    let db = setup_db().await;
    let repo = ScrapeJobRepositoryImpl::new(db);

    let job = repo
        .create(&ScrapeJob::new(Uuid::new_v4(), POST_URL.to_string()))
        .await
        .unwrap();
    let processing = job.start_processing("run-7".to_string()).unwrap();
    assert!(repo.mark_processing(&processing).await.unwrap());

    let failed = processing.clone().fail("Apify run timed-out").unwrap();
    assert!(repo.mark_failed(&failed).await.unwrap());

    // 过期快照上的转换不会生效
    let late = processing.fail("Failed to fetch results").unwrap();
    assert!(!repo.mark_failed(&late).await.unwrap());
    assert!(!repo.mark_processing(&failed).await.unwrap());

    let stored = repo.find_by_id(failed.id).await.unwrap().unwrap();
    assert_eq!(stored.status, ScrapeJobStatus::Failed);
    assert_eq!(stored.error_message.as_deref(), Some("Apify run timed-out"));
}

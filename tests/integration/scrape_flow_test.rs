// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{
    create_test_app, mount_run_status, mount_start_run, mount_successful_run, three_reactions,
    token_for, ACTOR_ID, POST_URL,
};
use axum::http::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_scrape_end_to_end_via_poll() {
    // Given: 平台运行成功并返回三条反应
    let app = create_test_app().await;
    mount_successful_run(&app.apify, POST_URL, "run-1", three_reactions()).await;

    // When: 发起抓取
    let started = app.initiate(POST_URL).await;
    let job_id = started["jobId"].as_str().unwrap().to_string();
    assert_eq!(started["runId"], "run-1");

    // Then: 作业处于处理中并记录了运行ID
    let job = app.job(&job_id).await;
    assert_eq!(job.status, "processing");
    assert_eq!(job.external_run_id.as_deref(), Some("run-1"));

    // When: 轮询
    let polled = app.poll(&job_id).await;

    // Then: 作业完成，写入一个帖子和三条互动
    assert_eq!(polled["status"], "completed");
    assert_eq!(polled["engagementsCount"], 3);
    assert_eq!(polled["message"], "Successfully scraped 3 engagements");
    assert_eq!(app.post_count().await, 1);
    assert_eq!(app.engagement_count().await, 3);

    let job = app.job(&job_id).await;
    assert_eq!(job.status, "completed");
    assert!(job.completed_at.is_some());

    // When: 再次轮询
    let again = app.poll(&job_id).await;

    // Then: 直接返回终态，不会重复写入
    assert_eq!(again["status"], "completed");
    assert_eq!(again["message"], "Job completed");
    assert_eq!(again["engagementsCount"], 3);
    assert_eq!(app.engagement_count().await, 3);
}

#[tokio::test]
async fn test_ingested_engagements_use_defaults() {
    let app = create_test_app().await;
    mount_successful_run(&app.apify, POST_URL, "run-1", three_reactions()).await;
    let job_id = app.initiate(POST_URL).await["jobId"]
        .as_str()
        .unwrap()
        .to_string();
    app.poll(&job_id).await;

    let posts = app
        .server
        .get("/api/posts")
        .authorization_bearer(&app.token)
        .await
        .json::<Value>();
    let post_id = posts["posts"][0]["id"].as_str().unwrap().to_string();

    let detail = app
        .server
        .get(&format!("/api/posts/{}", post_id))
        .authorization_bearer(&app.token)
        .await
        .json::<Value>();
    let engagements = detail["engagements"].as_array().unwrap();

    let ada = engagements.iter().find(|e| e["name"] == "Ada Lovelace").unwrap();
    assert_eq!(ada["profileImageUrl"], "https://media.example.com/ada-large.jpg");
    assert_eq!(ada["reactionType"], "like");

    let grace = engagements.iter().find(|e| e["name"] == "Grace Hopper").unwrap();
    assert_eq!(grace["profileImageUrl"], "https://media.example.com/grace-medium.jpg");
    assert_eq!(grace["reactionType"], "praise");

    let unknown = engagements.iter().find(|e| e["name"] == "Unknown User").unwrap();
    assert_eq!(unknown["headline"], "");
    assert_eq!(unknown["profileImageUrl"], "");
    assert_eq!(unknown["reactionType"], "like");
    assert_eq!(unknown["contacted"], false);
}

#[tokio::test]
async fn test_same_url_scraped_twice_shares_post() {
    let app = create_test_app().await;
    mount_successful_run(&app.apify, POST_URL, "run-1", three_reactions()).await;

    let first = app.initiate(POST_URL).await["jobId"].as_str().unwrap().to_string();
    app.poll(&first).await;
    let second = app.initiate(POST_URL).await["jobId"].as_str().unwrap().to_string();
    let polled = app.poll(&second).await;

    assert_eq!(polled["status"], "completed");
    assert_eq!(app.post_count().await, 1);
    assert_eq!(app.engagement_count().await, 6);
}

#[tokio::test]
async fn test_invalid_url_creates_no_job() {
    let app = create_test_app().await;

    for url in ["https://example.com/foo", "not a url", "https://www.linkedin.com/in/jane"] {
        let response = app
            .server
            .post("/api/scrape/initiate")
            .authorization_bearer(&app.token)
            .json(&json!({ "url": url }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert!(response.json::<Value>()["error"].is_string());
    }

    let response = app
        .server
        .post("/api/scrape/initiate")
        .authorization_bearer(&app.token)
        .json(&json!({}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    assert_eq!(app.job_count().await, 0);
}

#[tokio::test]
async fn test_start_failure_returns_job_id_and_fails_job() {
    // Given: 平台拒绝启动运行
    let app = create_test_app().await;
    Mock::given(method("POST"))
        .and(path(format!("/acts/{}/runs", ACTOR_ID)))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "type": "invalid-input", "message": "Input is not valid" }
        })))
        .mount(&app.apify)
        .await;

    // When: 发起抓取
    let response = app
        .server
        .post("/api/scrape/initiate")
        .authorization_bearer(&app.token)
        .json(&json!({ "url": POST_URL }))
        .await;

    // Then: 返回 500、平台错误信息与作业ID，作业被置为失败
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json::<Value>();
    assert_eq!(body["error"], "Input is not valid");
    let job_id = body["jobId"].as_str().unwrap().to_string();

    let job = app.job(&job_id).await;
    assert_eq!(job.status, "failed");
    assert_eq!(job.error_message.as_deref(), Some("Input is not valid"));

    // Then: 轮询始终返回同一失败信息
    for _ in 0..2 {
        let polled = app.poll(&job_id).await;
        assert_eq!(polled["status"], "failed");
        assert_eq!(polled["message"], "Input is not valid");
    }
}

#[tokio::test]
async fn test_failed_run_is_reported_consistently() {
    let app = create_test_app().await;
    mount_start_run(&app.apify, POST_URL, "run-9", "ds-9").await;
    mount_run_status(&app.apify, "run-9", "FAILED", "ds-9").await;

    let job_id = app.initiate(POST_URL).await["jobId"].as_str().unwrap().to_string();

    let first = app.poll(&job_id).await;
    assert_eq!(first["status"], "failed");
    assert_eq!(first["message"], "Scraping failed");

    let job = app.job(&job_id).await;
    assert_eq!(job.status, "failed");
    assert_eq!(job.error_message.as_deref(), Some("Apify run failed"));

    let second = app.poll(&job_id).await;
    let third = app.poll(&job_id).await;
    assert_eq!(second["status"], "failed");
    assert_eq!(second["message"], "Apify run failed");
    assert_eq!(second, third);
    assert_eq!(app.engagement_count().await, 0);
}

#[tokio::test]
async fn test_running_job_reports_progress() {
    let app = create_test_app().await;
    mount_start_run(&app.apify, POST_URL, "run-2", "ds-2").await;
    mount_run_status(&app.apify, "run-2", "RUNNING", "ds-2").await;

    let job_id = app.initiate(POST_URL).await["jobId"].as_str().unwrap().to_string();
    let polled = app.poll(&job_id).await;

    assert_eq!(polled["status"], "processing");
    assert_eq!(polled["message"], "Scraping in progress");
    assert_eq!(app.job(&job_id).await.status, "processing");
}

#[tokio::test]
async fn test_poll_rejects_missing_and_foreign_jobs() {
    let app = create_test_app().await;
    mount_start_run(&app.apify, POST_URL, "run-3", "ds-3").await;
    let job_id = app.initiate(POST_URL).await["jobId"].as_str().unwrap().to_string();

    let missing = app
        .server
        .post("/api/scrape/poll")
        .authorization_bearer(&app.token)
        .json(&json!({}))
        .await;
    assert_eq!(missing.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(missing.json::<Value>()["error"], "Job ID required");

    let unknown = app
        .server
        .post("/api/scrape/poll")
        .authorization_bearer(&app.token)
        .json(&json!({ "jobId": Uuid::new_v4() }))
        .await;
    assert_eq!(unknown.status_code(), StatusCode::NOT_FOUND);

    let malformed = app
        .server
        .post("/api/scrape/poll")
        .authorization_bearer(&app.token)
        .json(&json!({ "jobId": "not-a-uuid" }))
        .await;
    assert_eq!(malformed.status_code(), StatusCode::NOT_FOUND);

    let foreign = app
        .server
        .post("/api/scrape/poll")
        .authorization_bearer(&token_for(Uuid::new_v4()))
        .json(&json!({ "jobId": job_id }))
        .await;
    assert_eq!(foreign.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_bodies_return_json_errors() {
    let app = create_test_app().await;

    let wrong_type = app
        .server
        .post("/api/scrape/initiate")
        .authorization_bearer(&app.token)
        .json(&json!({ "url": 42 }))
        .await;
    assert_eq!(wrong_type.status_code(), StatusCode::BAD_REQUEST);
    assert!(wrong_type.json::<Value>()["error"].is_string());

    let not_json = app
        .server
        .post("/api/scrape/initiate")
        .authorization_bearer(&app.token)
        .text("url=https://www.linkedin.com/posts/x")
        .await;
    assert_eq!(not_json.status_code(), StatusCode::BAD_REQUEST);
    assert!(not_json.json::<Value>()["error"].is_string());

    let broken = app
        .server
        .post("/api/scrape/poll")
        .authorization_bearer(&app.token)
        .content_type("application/json")
        .bytes(axum::body::Bytes::from_static(b"{\"jobId\":"))
        .await;
    assert_eq!(broken.status_code(), StatusCode::BAD_REQUEST);
    assert!(broken.json::<Value>()["error"].is_string());

    assert_eq!(app.job_count().await, 0);
}

#[tokio::test]
async fn test_poll_dataset_failure_fails_job() {
    // Given: 运行成功但数据集读取失败
    let app = create_test_app().await;
    mount_start_run(&app.apify, POST_URL, "run-4", "ds-4").await;
    mount_run_status(&app.apify, "run-4", "SUCCEEDED", "ds-4").await;
    Mock::given(method("GET"))
        .and(path("/datasets/ds-4/items"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&app.apify)
        .await;
    let job_id = app.initiate(POST_URL).await["jobId"].as_str().unwrap().to_string();

    // When: 轮询
    let first = app.poll(&job_id).await;

    // Then: 作业失败并保存错误信息
    assert_eq!(first["status"], "failed");
    assert_eq!(first["message"], "Failed to fetch results");
    let job = app.job(&job_id).await;
    assert_eq!(job.status, "failed");
    assert_eq!(job.error_message.as_deref(), Some("Failed to fetch results"));
    assert!(job.completed_at.is_some());

    // Then: 再次轮询返回相同信息
    let second = app.poll(&job_id).await;
    assert_eq!(second["status"], "failed");
    assert_eq!(second["message"], "Failed to fetch results");
    assert_eq!(app.engagement_count().await, 0);
}

#[tokio::test]
async fn test_succeeded_run_without_dataset_keeps_waiting() {
    let app = create_test_app().await;
    mount_start_run(&app.apify, POST_URL, "run-5", "ds-5").await;
    Mock::given(method("GET"))
        .and(path("/actor-runs/run-5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "id": "run-5", "status": "SUCCEEDED" }
        })))
        .mount(&app.apify)
        .await;
    let job_id = app.initiate(POST_URL).await["jobId"].as_str().unwrap().to_string();

    let polled = app.poll(&job_id).await;

    assert_eq!(polled["status"], "processing");
    assert_eq!(polled["message"], "Waiting for dataset");
    assert_eq!(app.job(&job_id).await.status, "processing");
}

#[tokio::test]
async fn test_status_lookup_failure_leaves_job_untouched() {
    let app = create_test_app().await;
    mount_start_run(&app.apify, POST_URL, "run-6", "ds-6").await;
    Mock::given(method("GET"))
        .and(path("/actor-runs/run-6"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&app.apify)
        .await;
    let job_id = app.initiate(POST_URL).await["jobId"].as_str().unwrap().to_string();
    let before = app.job(&job_id).await;

    let polled = app.poll(&job_id).await;

    assert_eq!(polled["status"], "processing");
    assert_eq!(polled["message"], "Unable to check status");
    let after = app.job(&job_id).await;
    assert_eq!(after.status, "processing");
    assert!(after.error_message.is_none());
    assert_eq!(after.updated_at, before.updated_at);
}

#[tokio::test]
async fn test_unknown_run_status_keeps_checking() {
    let app = create_test_app().await;
    mount_start_run(&app.apify, POST_URL, "run-7", "ds-7").await;
    mount_run_status(&app.apify, "run-7", "PAUSED", "ds-7").await;
    let job_id = app.initiate(POST_URL).await["jobId"].as_str().unwrap().to_string();

    let polled = app.poll(&job_id).await;

    assert_eq!(polled["status"], "processing");
    assert_eq!(polled["message"], "Checking status...");
    assert_eq!(app.job(&job_id).await.status, "processing");
}

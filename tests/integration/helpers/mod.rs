// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum_test::TestServer;
use chrono::{Duration, Utc};
use engagetrackr::config::settings::{
    ApifySettings, AuthSettings, DatabaseSettings, MetricsSettings, ServerSettings, Settings,
    TelemetrySettings, WebhookSettings,
};
use engagetrackr::infrastructure::database::entities::{engagement, post, scrape_job};
use engagetrackr::infrastructure::services::actor_service_impl::ApifyActorService;
use engagetrackr::presentation::middleware::auth_middleware::Claims;
use engagetrackr::presentation::routes;
use jsonwebtoken::{encode, EncodingKey, Header};
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection, EntityTrait, PaginatorTrait};
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const JWT_SECRET: &str = "integration-secret";
pub const ACTOR_ID: &str = "apimaestro~linkedin-post-reactions";
pub const POST_URL: &str = "https://www.linkedin.com/posts/jane_activity-123";

#[allow(dead_code)]
pub struct TestApp {
    pub server: TestServer,
    pub db: Arc<DatabaseConnection>,
    pub apify: MockServer,
    pub user_id: Uuid,
    pub token: String,
}

pub async fn create_test_app() -> TestApp {
    create_test_app_with_secret(None).await
}

pub async fn create_test_app_with_secret(webhook_secret: Option<&str>) -> TestApp {
    let apify = MockServer::start().await;

    let db = setup_db().await;
    let settings = Arc::new(test_settings(apify.uri(), webhook_secret));
    let actor = Arc::new(ApifyActorService::new(&settings.apify));
    let server = TestServer::new(routes::app(db.clone(), actor, settings)).unwrap();

    let user_id = Uuid::new_v4();
    TestApp {
        server,
        db,
        apify,
        user_id,
        token: token_for(user_id),
    }
}

/// 创建已迁移的内存数据库
pub async fn setup_db() -> Arc<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    Arc::new(db)
}

fn test_settings(apify_url: String, webhook_secret: Option<&str>) -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseSettings {
            url: "sqlite::memory:".to_string(),
            max_connections: Some(1),
            min_connections: None,
            connect_timeout: None,
            idle_timeout: None,
        },
        apify: ApifySettings {
            token: "apify-test-token".to_string(),
            base_url: apify_url,
            actor_id: ACTOR_ID.to_string(),
            callback_url: None,
            timeout_secs: 5,
        },
        webhook: WebhookSettings {
            secret: webhook_secret.map(str::to_string),
        },
        auth: AuthSettings {
            jwt_secret: JWT_SECRET.to_string(),
            issuer: None,
        },
        metrics: MetricsSettings {
            enabled: false,
            address: "127.0.0.1:0".to_string(),
        },
        telemetry: TelemetrySettings { json_logs: false },
    }
}

/// 为指定用户签发测试令牌
pub fn token_for(user_id: Uuid) -> String {
    let claims = Claims {
        sub: user_id.to_string(),
        exp: (Utc::now() + Duration::hours(1)).timestamp(),
        iss: None,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

/// 三条反应记录，覆盖默认值映射
pub fn three_reactions() -> Value {
    json!([
        {
            "reactor": {
                "name": "Ada Lovelace",
                "profile_url": "https://www.linkedin.com/in/ada",
                "headline": "Engineer at Analytical Engines",
                "profile_pictures": {
                    "large": "https://media.example.com/ada-large.jpg",
                    "medium": "https://media.example.com/ada-medium.jpg"
                }
            },
            "reaction_type": "LIKE"
        },
        {
            "reactor": {
                "name": "Grace Hopper",
                "profile_url": "https://www.linkedin.com/in/grace",
                "headline": "Rear Admiral",
                "profile_pictures": { "medium": "https://media.example.com/grace-medium.jpg" }
            },
            "reaction_type": "PRAISE"
        },
        {
            "reactor": { "profile_url": "https://www.linkedin.com/in/anonymous" }
        }
    ])
}

/// 启动运行成功，返回指定运行ID
pub async fn mount_start_run(apify: &MockServer, post_url: &str, run_id: &str, dataset_id: &str) {
    Mock::given(method("POST"))
        .and(path(format!("/acts/{}/runs", ACTOR_ID)))
        .and(body_partial_json(json!({ "post_url": post_url, "reaction_type": "ALL" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": { "id": run_id, "status": "READY", "defaultDatasetId": dataset_id }
        })))
        .mount(apify)
        .await;
}

pub async fn mount_run_status(apify: &MockServer, run_id: &str, status: &str, dataset_id: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/actor-runs/{}", run_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "id": run_id, "status": status, "defaultDatasetId": dataset_id }
        })))
        .mount(apify)
        .await;
}

pub async fn mount_dataset(apify: &MockServer, dataset_id: &str, items: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/datasets/{}/items", dataset_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(items))
        .mount(apify)
        .await;
}

/// 挂载完整的成功流程：启动、状态 SUCCEEDED、数据集
pub async fn mount_successful_run(apify: &MockServer, post_url: &str, run_id: &str, items: Value) {
    let dataset_id = format!("ds-{}", run_id);
    mount_start_run(apify, post_url, run_id, &dataset_id).await;
    mount_run_status(apify, run_id, "SUCCEEDED", &dataset_id).await;
    mount_dataset(apify, &dataset_id, items).await;
}

impl TestApp {
    pub async fn initiate(&self, url: &str) -> Value {
        let response = self
            .server
            .post("/api/scrape/initiate")
            .authorization_bearer(&self.token)
            .json(&json!({ "url": url }))
            .await;
        response.assert_status_ok();
        response.json::<Value>()
    }

    pub async fn poll(&self, job_id: &str) -> Value {
        let response = self
            .server
            .post("/api/scrape/poll")
            .authorization_bearer(&self.token)
            .json(&json!({ "jobId": job_id }))
            .await;
        response.assert_status_ok();
        response.json::<Value>()
    }

    pub async fn job(&self, job_id: &str) -> scrape_job::Model {
        scrape_job::Entity::find_by_id(Uuid::parse_str(job_id).unwrap())
            .one(self.db.as_ref())
            .await
            .unwrap()
            .unwrap()
    }

    pub async fn job_count(&self) -> u64 {
        scrape_job::Entity::find().count(self.db.as_ref()).await.unwrap()
    }

    pub async fn post_count(&self) -> u64 {
        post::Entity::find().count(self.db.as_ref()).await.unwrap()
    }

    pub async fn engagement_count(&self) -> u64 {
        engagement::Entity::find().count(self.db.as_ref()).await.unwrap()
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::Settings;
use crate::infrastructure::repositories::engagement_repo_impl::EngagementRepositoryImpl;
use crate::infrastructure::repositories::job_results_repo_impl::JobResultsRepositoryImpl;
use crate::infrastructure::repositories::post_repo_impl::PostRepositoryImpl;
use crate::infrastructure::repositories::scrape_job_repo_impl::ScrapeJobRepositoryImpl;
use crate::infrastructure::services::actor_service_impl::ApifyActorService;
use crate::presentation::handlers::{
    engagement_handler, post_handler, scrape_handler, webhook_handler,
};
use crate::presentation::middleware::auth_middleware::{auth_middleware, AuthState};
use axum::{
    middleware,
    routing::{get, patch, post},
    Extension, Router,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

type JobRepo = ScrapeJobRepositoryImpl;
type PostRepo = PostRepositoryImpl;
type EngagementRepo = EngagementRepositoryImpl;
type ResultsRepo = JobResultsRepositoryImpl;
type Actor = ApifyActorService;

/// 创建应用路由
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes() -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version))
        .route(
            "/api/scrape/webhook",
            post(webhook_handler::receive_webhook::<JobRepo, EngagementRepo, ResultsRepo, Actor>),
        );

    let protected_routes = Router::new()
        .route(
            "/api/scrape/initiate",
            post(scrape_handler::initiate_scrape::<JobRepo, EngagementRepo, ResultsRepo, Actor>),
        )
        .route(
            "/api/scrape/poll",
            post(scrape_handler::poll_scrape::<JobRepo, EngagementRepo, ResultsRepo, Actor>),
        )
        .route("/api/posts", get(post_handler::list_posts::<PostRepo, EngagementRepo>))
        .route(
            "/api/posts/{post_id}",
            get(post_handler::get_post::<PostRepo, EngagementRepo>),
        )
        .route(
            "/api/engagers",
            get(post_handler::list_engagers::<PostRepo, EngagementRepo>),
        )
        .route(
            "/api/engagements/{engagement_id}/contacted",
            patch(engagement_handler::mark_contacted::<PostRepo, EngagementRepo>),
        );

    Router::new().merge(public_routes).merge(protected_routes)
}

/// 组装完整应用
///
/// 数据库连接与抓取平台客户端由调用方创建后传入
pub fn app(
    db: Arc<DatabaseConnection>,
    actor: Arc<ApifyActorService>,
    settings: Arc<Settings>,
) -> Router {
    let auth_state = AuthState::new(&settings.auth);

    routes()
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware))
        .layer(Extension(Arc::new(ScrapeJobRepositoryImpl::new(db.clone()))))
        .layer(Extension(Arc::new(PostRepositoryImpl::new(db.clone()))))
        .layer(Extension(Arc::new(EngagementRepositoryImpl::new(db.clone()))))
        .layer(Extension(Arc::new(JobResultsRepositoryImpl::new(db))))
        .layer(Extension(actor))
        .layer(Extension(settings))
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

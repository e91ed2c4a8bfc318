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

use engagetrackr::config::settings::Settings;
use engagetrackr::infrastructure::database::connection;
use engagetrackr::infrastructure::metrics;
use engagetrackr::infrastructure::services::actor_service_impl::ApifyActorService;
use engagetrackr::presentation::routes;
use engagetrackr::utils::telemetry;
use migration::{Migrator, MigratorTrait};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration
    let settings = Arc::new(Settings::new()?);

    // 2. Initialize logging
    telemetry::init_telemetry(settings.telemetry.json_logs);
    info!("Starting engagetrackr...");

    if settings.metrics.enabled {
        metrics::init_metrics(&settings.metrics.address);
    }

    if settings.apify.token.is_empty() {
        warn!("Apify token is empty, actor calls will be rejected");
    }
    if settings.webhook.secret.is_none() {
        warn!("Webhook secret not configured, callbacks are accepted unsigned");
    }

    // 3. Connect to database
    let db = connection::create_pool(&settings.database).await?;
    let db = Arc::new(db);
    info!("Database connection established");

    info!("Running database migrations...");
    Migrator::up(db.as_ref(), None).await?;
    info!("Database migrations applied");

    // 4. External clients
    let actor = Arc::new(ApifyActorService::new(&settings.apify));

    // 5. Start HTTP server
    let app = routes::app(db, actor, settings.clone());

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}

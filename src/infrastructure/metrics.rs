// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::describe_counter;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

/// 初始化指标导出
///
/// 在 `address` 上启动 Prometheus 导出器并注册抓取作业相关的计数器
pub fn init_metrics(address: &str) {
    let addr: SocketAddr = match address.parse() {
        Ok(addr) => addr,
        Err(e) => {
            warn!("Invalid metrics address {}: {}. Metrics disabled.", address, e);
            return;
        }
    };

    // 端口被占用时只记录日志
    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!("Failed to install Prometheus recorder: {}. This might happen if the port is already in use.", e);
        return;
    }

    describe_counter!("scrape_jobs_total", "Total number of scrape jobs submitted");
    describe_counter!(
        "scrape_jobs_completed_total",
        "Total number of scrape jobs completed"
    );
    describe_counter!(
        "scrape_jobs_failed_total",
        "Total number of scrape jobs failed"
    );
    describe_counter!(
        "engagements_ingested_total",
        "Total number of engagement rows written"
    );

    info!("Metrics exporter listening on {}", addr);
}

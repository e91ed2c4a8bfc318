// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::create_test_app;
use axum::http::StatusCode;

#[tokio::test]
async fn test_health_check_is_public() {
    let app = create_test_app().await;

    let response = app.server.get("/health").await;

    response.assert_status_ok();
    response.assert_text("OK");
}

#[tokio::test]
async fn test_version_reports_package() {
    let app = create_test_app().await;

    let response = app.server.get("/v1/version").await;

    response.assert_status_ok();
    response.assert_text(env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = create_test_app().await;

    let response = app.server.get("/api/posts").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_test_app, login_as, SETUP_KEY};
use axum::http::StatusCode;

#[tokio::test]
async fn test_setup_database_wrong_key() {
    let app = create_test_app().await;

    let response = app.server.get("/setup-database/not-the-key").await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(response.text(), "Access denied");
}

#[tokio::test]
async fn test_setup_database_reports_tables() {
    let app = create_test_app().await;
    login_as(&app, "alice", "secret").await;

    let response = app
        .server
        .get(&format!("/setup-database/{}", SETUP_KEY))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.text();
    assert!(body.starts_with("<h1>Database Setup</h1>"));
    assert!(body.contains("participants"));
    assert!(body.contains("User model OK. Count: 1"));
}

/// `recreate=true` 清空所有数据
#[tokio::test]
async fn test_setup_database_recreate() {
    let app = create_test_app().await;
    login_as(&app, "alice", "secret").await;

    let response = app
        .server
        .get(&format!("/setup-database/{}", SETUP_KEY))
        .add_query_param("recreate", "true")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("User model OK. Count: 0"));
}

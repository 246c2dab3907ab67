// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_test_app, csv_form, mount_profile};
use axum::http::StatusCode;
use wiremock::MockServer;

/// 无需登录即可检查积分，结果按 CSV 顺序输出
#[tokio::test]
async fn test_check_renders_points_in_row_order() {
    let app = create_test_app().await;
    let mock = MockServer::start().await;
    mount_profile(&mock, "/users/ana", "1,250 points").await;
    mount_profile(&mock, "/users/ben", "40 points").await;

    let csv = format!(
        "Name,profile,mail\nAna,{0}/users/ana,ana@example.com\nBen,{0}/users/ben,\nCid,,\n",
        mock.uri()
    );
    let response = app
        .server
        .post("/check")
        .multipart(csv_form("people.csv", &csv))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.text();
    let ana = body.find("Ana").unwrap();
    let ben = body.find("Ben").unwrap();
    let cid = body.find("Cid").unwrap();
    assert!(ana < ben && ben < cid);
    assert!(body.contains("1250"));
    assert!(body.contains("40"));
    assert!(body.contains("unavailable"));
    assert!(body.contains("Copy names"));
    assert!(!body.contains("Weekly"));
}

#[tokio::test]
async fn test_check_rejects_non_csv_file() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/check")
        .multipart(csv_form("people.txt", "Name,profile\nAna,x\n"))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(response.text().contains("Only CSV files are allowed"));
}

#[tokio::test]
async fn test_check_reports_missing_columns() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/check")
        .multipart(csv_form("people.csv", "Full name,url\nAna,x\n"))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(response
        .text()
        .contains("Missing required columns: Name, profile"));
}

#[tokio::test]
async fn test_check_form_is_public() {
    let app = create_test_app().await;

    let response = app.server.get("/check").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("name=\"csv_file\""));
}

#[tokio::test]
async fn test_check_rejects_unterminated_quote() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/check")
        .multipart(csv_form(
            "people.csv",
            "Name,profile\nAna,\"https://example.com/ana\nBen,https://example.com/ben\n",
        ))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(response
        .text()
        .contains("Error validating CSV: unterminated quoted field starting at line 2"));
}

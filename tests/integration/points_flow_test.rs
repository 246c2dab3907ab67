// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{
    cookie, create_test_app, csv_form, flash_messages, location, login_as, mount_profile,
    profile_html,
};
use axum::http::StatusCode;
use points_tracker::infrastructure::database::entities::{participant, refresh_log};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_upload_requires_login() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/upload")
        .multipart(csv_form("people.csv", "Name,profile\nAna,\n"))
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    assert_eq!(
        flash_messages(&response),
        vec![(
            "error".to_string(),
            "Please log in to access this page.".to_string()
        )]
    );
}

#[tokio::test]
async fn test_upload_invalid_csv_redirects_home() {
    let app = create_test_app().await;
    let session = login_as(&app, "alice", "secret").await;

    let response = app
        .server
        .post("/upload")
        .add_header("Cookie", session)
        .multipart(csv_form("people.csv", "Name,profile\n,https://example.com/u/a\n"))
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    assert_eq!(
        flash_messages(&response),
        vec![(
            "error".to_string(),
            "Missing values in 'Name' column at rows: 2".to_string()
        )]
    );
}

/// 上传、查看参与者、过早刷新、过期后刷新的完整流程
#[tokio::test]
async fn test_upload_then_refresh_weekly_points() {
    let app = create_test_app().await;
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/ana"))
        .respond_with(ResponseTemplate::new(200).set_body_string(profile_html("100 points")))
        .up_to_n_times(1)
        .mount(&mock)
        .await;
    mount_profile(&mock, "/users/ana", "130 points").await;
    mount_profile(&mock, "/users/ben", "50 points").await;

    let session = login_as(&app, "alice", "secret").await;
    let csv = format!(
        "Name,profile,mail\nAna,{0}/users/ana,ana@example.com\nBen,{0}/users/ben,\n",
        mock.uri()
    );

    let upload = app
        .server
        .post("/upload")
        .add_header("Cookie", session.clone())
        .multipart(csv_form("people.csv", &csv))
        .await;
    assert_eq!(upload.status_code(), StatusCode::OK);
    let body = upload.text();
    assert!(body.contains("CSV file processed successfully in"));
    assert!(body.contains("2 participants updated."));
    assert!(body.contains("N/A (first upload)"));

    let participants = participant::Entity::find().all(app.db.as_ref()).await.unwrap();
    assert_eq!(participants.len(), 2);
    let ana = participants.iter().find(|p| p.name == "Ana").unwrap();
    assert_eq!(ana.current_points, 100);

    // upload counts as a refresh
    let too_soon = app
        .server
        .get("/refresh")
        .add_header("Cookie", session.clone())
        .await;
    assert_eq!(too_soon.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(location(&too_soon), "/participants");
    let flashes = flash_messages(&too_soon);
    assert_eq!(flashes[0].0, "warning");
    assert!(flashes[0]
        .1
        .starts_with("Points were last refreshed 0 days and 0 hours ago."));

    let next = app
        .server
        .get("/next_refresh")
        .add_header("Cookie", session.clone())
        .await;
    let json: Value = next.json();
    assert_eq!(json["can_refresh"], Value::Bool(false));
    assert!(json["time_remaining"].as_str().unwrap().starts_with("6d 23h"));

    refresh_log::Entity::delete_many()
        .exec(app.db.as_ref())
        .await
        .unwrap();

    let refresh = app
        .server
        .get("/refresh")
        .add_header("Cookie", session.clone())
        .await;
    assert_eq!(refresh.status_code(), StatusCode::OK);
    let body = refresh.text();
    assert!(body.contains("Points refreshed successfully in"));
    assert!(body.contains("<td data-copy>30</td>"));
    assert!(body.contains("<td data-copy>0</td>"));
    assert!(body.find("Ana").unwrap() < body.find("Ben").unwrap());

    let list = app
        .server
        .get("/participants")
        .add_header("Cookie", session.clone())
        .await;
    assert_eq!(list.status_code(), StatusCode::OK);
    let body = list.text();
    assert!(body.contains("<table id=\"participants\">"));
    // uploads leave no history, so the first refresh is the whole total
    assert!(body.contains("<td data-copy>130</td><td data-copy>0</td><td data-copy>130</td>"));

    let history = app
        .server
        .get(&format!("/participant/{}", ana.id))
        .add_header("Cookie", session)
        .await;
    assert_eq!(history.status_code(), StatusCode::OK);
    let body = history.text();
    assert!(body.contains("<td>130</td>"));
    assert!(!body.contains("<td>100</td>"));
}

#[tokio::test]
async fn test_refresh_without_participants() {
    let app = create_test_app().await;
    let session = login_as(&app, "alice", "secret").await;

    let response = app
        .server
        .get("/refresh")
        .add_header("Cookie", session)
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    assert_eq!(
        flash_messages(&response),
        vec![(
            "warning".to_string(),
            "No participants found. Please upload a CSV file first.".to_string()
        )]
    );
}

/// 其他用户的参与者历史返回 404
#[tokio::test]
async fn test_history_of_other_users_participant_is_not_found() {
    let app = create_test_app().await;
    let alice = login_as(&app, "alice", "secret").await;
    let bob = login_as(&app, "bob", "secret").await;

    app.server
        .post("/upload")
        .add_header("Cookie", alice)
        .multipart(csv_form("people.csv", "Name,profile\nAna,\n"))
        .await;

    let ana = participant::Entity::find()
        .filter(participant::Column::Name.eq("Ana"))
        .one(app.db.as_ref())
        .await
        .unwrap()
        .unwrap();

    let response = app
        .server
        .get(&format!("/participant/{}", ana.id))
        .add_header("Cookie", bob.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let malformed = app
        .server
        .get("/participant/not-a-uuid")
        .add_header("Cookie", bob)
        .await;
    assert_eq!(malformed.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_next_refresh_for_anonymous_caller() {
    let app = create_test_app().await;

    let response = app.server.get("/next_refresh").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let json: Value = response.json();
    assert_eq!(json["can_refresh"], Value::Bool(true));
    assert!(json.get("time_remaining").is_none());
}

/// 跳转留下的消息在结果页显示一次，然后被清除
#[tokio::test]
async fn test_upload_results_consume_pending_flash() {
    let app = create_test_app().await;
    let mock = MockServer::start().await;
    mount_profile(&mock, "/users/ana", "10 points").await;

    app.server
        .post("/register")
        .form(&[("username", "alice"), ("password", "secret")])
        .await;
    let login = app
        .server
        .post("/login")
        .form(&[("username", "alice"), ("password", "secret")])
        .await;
    let cookies = format!(
        "{}; {}",
        cookie(&login, "session").unwrap(),
        cookie(&login, "flash").unwrap()
    );

    let upload = app
        .server
        .post("/upload")
        .add_header("Cookie", cookies)
        .multipart(csv_form(
            "people.csv",
            &format!("Name,profile\nAna,{}/users/ana\n", mock.uri()),
        ))
        .await;

    assert_eq!(upload.status_code(), StatusCode::OK);
    let body = upload.text();
    assert!(body.contains("Welcome back, alice!"));
    assert!(body.contains("CSV file processed successfully in"));
    assert_eq!(cookie(&upload, "flash").as_deref(), Some("flash="));
}

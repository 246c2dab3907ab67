// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{cookie, create_test_app, flash_messages, location, login_as};
use axum::http::StatusCode;

/// 注册成功后跳转到登录页并带上成功提示
#[tokio::test]
async fn test_register_redirects_to_login() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/register")
        .form(&[("username", "alice"), ("password", "secret")])
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    assert_eq!(
        flash_messages(&response),
        vec![(
            "success".to_string(),
            "Registration successful! Please login.".to_string()
        )]
    );
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = create_test_app().await;
    let form = [("username", "alice"), ("password", "secret")];

    app.server.post("/register").form(&form).await;
    let response = app.server.post("/register").form(&form).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("User alice is already registered."));
}

#[tokio::test]
async fn test_register_requires_password() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/register")
        .form(&[("username", "alice"), ("password", "")])
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("Password is required."));
}

#[tokio::test]
async fn test_login_errors() {
    let app = create_test_app().await;
    app.server
        .post("/register")
        .form(&[("username", "alice"), ("password", "secret")])
        .await;

    let unknown = app
        .server
        .post("/login")
        .form(&[("username", "bob"), ("password", "secret")])
        .await;
    assert!(unknown.text().contains("Invalid username."));
    assert!(cookie(&unknown, "session").is_none());

    let wrong = app
        .server
        .post("/login")
        .form(&[("username", "alice"), ("password", "nope")])
        .await;
    assert!(wrong.text().contains("Invalid password."));
    assert!(cookie(&wrong, "session").is_none());
}

/// 登录后首页显示上传表单，退出后会话被清除
#[tokio::test]
async fn test_login_and_logout() {
    let app = create_test_app().await;
    let session = login_as(&app, "alice", "secret").await;

    let home = app.server.get("/").add_header("Cookie", session.clone()).await;
    assert_eq!(home.status_code(), StatusCode::OK);
    let body = home.text();
    assert!(body.contains("alice"));
    assert!(body.contains("action=\"/upload\""));

    let logout = app
        .server
        .get("/logout")
        .add_header("Cookie", session)
        .await;
    assert_eq!(logout.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(location(&logout), "/");
    assert_eq!(cookie(&logout, "session").as_deref(), Some("session="));
    assert_eq!(
        flash_messages(&logout),
        vec![("info".to_string(), "You have been logged out.".to_string())]
    );
}

#[tokio::test]
async fn test_login_sets_welcome_flash() {
    let app = create_test_app().await;
    app.server
        .post("/register")
        .form(&[("username", "alice"), ("password", "secret")])
        .await;

    let response = app
        .server
        .post("/login")
        .form(&[("username", "  alice "), ("password", "secret")])
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    assert_eq!(
        flash_messages(&response),
        vec![("success".to_string(), "Welcome back, alice!".to_string())]
    );

    let flash = cookie(&response, "flash").unwrap();
    let home = app.server.get("/").add_header("Cookie", flash).await;
    assert!(home.text().contains("Welcome back, alice!"));
}

#[tokio::test]
async fn test_tampered_session_is_anonymous() {
    let app = create_test_app().await;
    let session = login_as(&app, "alice", "secret").await;
    let tampered = format!("{}0", session);

    let response = app
        .server
        .get("/participants")
        .add_header("Cookie", tampered)
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

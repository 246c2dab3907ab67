// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum_test::multipart::{MultipartForm, Part};
use axum_test::{TestResponse, TestServer};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use migration::{Migrator, MigratorTrait};
use points_tracker::config::settings::Settings;
use points_tracker::infrastructure::database::connection;
use points_tracker::presentation::routes;
use points_tracker::presentation::state::AppState;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const SETUP_KEY: &str = "test-setup-key";

#[allow(dead_code)]
pub struct TestApp {
    pub server: TestServer,
    pub db: Arc<DatabaseConnection>,
    pub settings: Arc<Settings>,
}

/// 内存 SQLite、无抓取延迟、允许访问本地 mock 服务的应用
pub async fn create_test_app() -> TestApp {
    let settings: Settings = Settings::default_builder()
        .unwrap()
        .set_override("database.url", "sqlite::memory:")
        .unwrap()
        .set_override("scraper.allow_private_hosts", true)
        .unwrap()
        .set_override("scraper.min_delay_ms", 0)
        .unwrap()
        .set_override("scraper.max_delay_ms", 0)
        .unwrap()
        .set_override("auth.password_iterations", 1_000)
        .unwrap()
        .set_override("backup.enabled", false)
        .unwrap()
        .set_override("admin.setup_key", SETUP_KEY)
        .unwrap()
        .build()
        .unwrap()
        .try_deserialize()
        .unwrap();
    let settings = Arc::new(settings);

    let db = Arc::new(connection::create_pool(&settings.database).await.unwrap());
    Migrator::up(db.as_ref(), None).await.unwrap();

    let state = AppState::new(settings.clone(), db.clone()).unwrap();
    let server = TestServer::new(routes::routes(state)).unwrap();

    TestApp {
        server,
        db,
        settings,
    }
}

/// 取出响应中某个 Cookie 的 `name=value` 部分
pub fn cookie(response: &TestResponse, name: &str) -> Option<String> {
    let prefix = format!("{}=", name);
    response
        .headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&prefix))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

/// 解码响应写入的闪现消息
pub fn flash_messages(response: &TestResponse) -> Vec<(String, String)> {
    let Some(cookie) = cookie(response, "flash") else {
        return Vec::new();
    };
    let encoded = cookie.trim_start_matches("flash=");
    let bytes = URL_SAFE_NO_PAD.decode(encoded).unwrap_or_default();
    let flashes: Vec<Value> = serde_json::from_slice(&bytes).unwrap_or_default();
    flashes
        .into_iter()
        .map(|f| {
            (
                f["category"].as_str().unwrap_or_default().to_string(),
                f["message"].as_str().unwrap_or_default().to_string(),
            )
        })
        .collect()
}

pub fn location(response: &TestResponse) -> String {
    response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// 注册并登录，返回可以放进 `Cookie` 请求头的会话值
pub async fn login_as(app: &TestApp, username: &str, password: &str) -> String {
    app.server
        .post("/register")
        .form(&[("username", username), ("password", password)])
        .await;
    let response = app
        .server
        .post("/login")
        .form(&[("username", username), ("password", password)])
        .await;
    cookie(&response, "session").expect("login should set a session cookie")
}

pub fn csv_form(file_name: &str, contents: &str) -> MultipartForm {
    MultipartForm::new().add_part(
        "csv_file",
        Part::bytes(contents.as_bytes().to_vec())
            .file_name(file_name)
            .mime_type("text/csv"),
    )
}

/// 挂载一个个人主页
pub async fn mount_profile(server: &MockServer, at: &str, points: &str) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200).set_body_string(profile_html(points)))
        .mount(server)
        .await;
}

pub fn profile_html(points: &str) -> String {
    format!(
        "<html><body><div class=\"profile-league\"><strong>{}</strong></div></body></html>",
        points
    )
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Extension, Router,
};
use tower_http::trace::TraceLayer;

use crate::presentation::handlers::{
    auth_handler, check_handler, home_handler, participant_handler, points_handler, setup_handler,
};
use crate::presentation::state::AppState;

/// 创建应用路由
///
/// # 参数
///
/// * `state` - 共享的应用状态
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(state: AppState) -> Router {
    let upload_limit = state.settings.upload.max_bytes;

    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/version", get(version))
        .route("/", get(home_handler::index))
        .route("/download_example", get(home_handler::download_example))
        .route(
            "/check",
            get(check_handler::check_form).post(check_handler::check),
        )
        .route(
            "/register",
            get(auth_handler::register_form).post(auth_handler::register),
        )
        .route(
            "/login",
            get(auth_handler::login_form).post(auth_handler::login),
        )
        .route("/logout", get(auth_handler::logout))
        .route("/next_refresh", get(points_handler::next_refresh))
        .route(
            "/setup-database/{key}",
            get(setup_handler::setup_database),
        );

    let protected_routes = Router::new()
        .route("/upload", post(points_handler::upload))
        .route("/refresh", get(points_handler::refresh))
        .route("/participants", get(participant_handler::list_participants))
        .route(
            "/participant/{id}",
            get(participant_handler::participant_history),
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(DefaultBodyLimit::max(upload_limit))
        .layer(Extension(state))
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

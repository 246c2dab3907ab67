// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;

use crate::presentation::middleware::session::{Flash, SessionKeys};

/// 303 跳转并带上一条闪现消息
pub fn redirect_with_flash(sessions: &SessionKeys, to: &str, flash: Flash) -> Response {
    redirect_with_cookies(CookieJar::new(), sessions, to, flash)
}

/// 在已有 Cookie 之外再带上一条闪现消息跳转
pub fn redirect_with_cookies(
    jar: CookieJar,
    sessions: &SessionKeys,
    to: &str,
    flash: Flash,
) -> Response {
    let jar = jar.add(sessions.flash_cookie(&[flash]));
    (jar, Redirect::to(to)).into_response()
}

/// 渲染 HTML 页面
///
/// 页面显示过请求带来的闪现消息后将其清除
pub fn html_page(sessions: &SessionKeys, had_flashes: bool, body: String) -> Response {
    html_page_with_status(sessions, had_flashes, StatusCode::OK, body)
}

pub fn html_page_with_status(
    sessions: &SessionKeys,
    had_flashes: bool,
    status: StatusCode,
    body: String,
) -> Response {
    let mut jar = CookieJar::new();
    if had_flashes {
        jar = jar.add(sessions.clear_flash_cookie());
    }
    (status, jar, Html(body)).into_response()
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{extract::Extension, response::Response, Form};
use axum_extra::extract::cookie::CookieJar;

use crate::application::dto::auth_form::CredentialsForm;
use crate::application::use_cases::error::UseCaseError;
use crate::presentation::errors::AppError;
use crate::presentation::extractors::session_user::{CurrentUser, Flashes};
use crate::presentation::middleware::session::Flash;
use crate::presentation::response::{html_page, redirect_with_cookies, redirect_with_flash};
use crate::presentation::state::AppState;
use crate::presentation::views::{pages, PageContext};

/// 注册页面
pub async fn register_form(
    Extension(state): Extension<AppState>,
    CurrentUser(user): CurrentUser,
    Flashes(flashes): Flashes,
) -> Response {
    let body = pages::register_form(PageContext::new(user.as_ref(), &flashes));
    html_page(&state.sessions, !flashes.is_empty(), body)
}

/// 提交注册
///
/// 成功后跳转到登录页，失败时重新显示表单和错误信息
pub async fn register(
    Extension(state): Extension<AppState>,
    CurrentUser(user): CurrentUser,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, AppError> {
    match state.auth.register(form).await {
        Ok(_) => Ok(redirect_with_flash(
            &state.sessions,
            "/login",
            Flash::success("Registration successful! Please login."),
        )),
        Err(UseCaseError::Validation(message)) => {
            let flashes = [Flash::error(message)];
            let body = pages::register_form(PageContext::new(user.as_ref(), &flashes));
            Ok(html_page(&state.sessions, false, body))
        }
        Err(e) => Err(e.into()),
    }
}

/// 登录页面
pub async fn login_form(
    Extension(state): Extension<AppState>,
    CurrentUser(user): CurrentUser,
    Flashes(flashes): Flashes,
) -> Response {
    let body = pages::login_form(PageContext::new(user.as_ref(), &flashes));
    html_page(&state.sessions, !flashes.is_empty(), body)
}

/// 提交登录
///
/// 成功后签发新的会话 Cookie 并跳转到首页
pub async fn login(
    Extension(state): Extension<AppState>,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, AppError> {
    match state.auth.login(form).await {
        Ok(user) => {
            let jar = CookieJar::new().add(state.sessions.session_cookie(user.id));
            Ok(redirect_with_cookies(
                jar,
                &state.sessions,
                "/",
                Flash::success(format!("Welcome back, {}!", user.username)),
            ))
        }
        Err(UseCaseError::Validation(message)) => {
            let flashes = [Flash::error(message)];
            let body = pages::login_form(PageContext::new(None, &flashes));
            Ok(html_page(&state.sessions, false, body))
        }
        Err(e) => Err(e.into()),
    }
}

/// 退出登录
pub async fn logout(Extension(state): Extension<AppState>) -> Response {
    let jar = CookieJar::new().add(state.sessions.clear_session_cookie());
    redirect_with_cookies(
        jar,
        &state.sessions,
        "/",
        Flash::info("You have been logged out."),
    )
}

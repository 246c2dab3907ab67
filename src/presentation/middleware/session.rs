// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::http::HeaderMap;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::fmt;
use uuid::Uuid;

use crate::config::settings::SessionSettings;

type HmacSha256 = Hmac<Sha256>;

pub const SESSION_COOKIE: &str = "session";
pub const FLASH_COOKIE: &str = "flash";

/// 会话 Cookie 的签名与校验
///
/// Cookie 值格式为 `<user_id>.<过期时间戳>.<hmac hex>`，服务端不保存会话
#[derive(Clone)]
pub struct SessionKeys {
    secret: Vec<u8>,
    ttl: Duration,
    secure: bool,
}

impl fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionKeys")
            .field("ttl", &self.ttl)
            .field("secure", &self.secure)
            .finish_non_exhaustive()
    }
}

impl SessionKeys {
    pub fn new(settings: &SessionSettings) -> Self {
        Self {
            secret: settings.secret.as_bytes().to_vec(),
            ttl: Duration::hours(settings.ttl_hours.max(1)),
            secure: settings.secure_cookie,
        }
    }

    fn mac(&self, payload: &str) -> HmacSha256 {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).expect("HMAC can take key of any size");
        mac.update(payload.as_bytes());
        mac
    }

    /// 生成签名后的会话值
    pub fn sign(&self, user_id: Uuid, now: DateTime<Utc>) -> String {
        let payload = format!("{}.{}", user_id, (now + self.ttl).timestamp());
        let signature = hex::encode(self.mac(&payload).finalize().into_bytes());
        format!("{}.{}", payload, signature)
    }

    /// 校验会话值，签名错误或已过期时返回 `None`
    pub fn verify(&self, value: &str, now: DateTime<Utc>) -> Option<Uuid> {
        let (payload, signature) = value.rsplit_once('.')?;
        let signature = hex::decode(signature).ok()?;
        self.mac(payload).verify_slice(&signature).ok()?;

        let (user_id, expires) = payload.split_once('.')?;
        let expires: i64 = expires.parse().ok()?;
        if now.timestamp() >= expires {
            return None;
        }
        Uuid::parse_str(user_id).ok()
    }

    /// 登录后下发的会话 Cookie
    pub fn session_cookie(&self, user_id: Uuid) -> Cookie<'static> {
        let mut cookie = self.cookie(SESSION_COOKIE, self.sign(user_id, Utc::now()));
        cookie.set_max_age(time::Duration::seconds(self.ttl.num_seconds()));
        cookie
    }

    pub fn clear_session_cookie(&self) -> Cookie<'static> {
        self.removal(SESSION_COOKIE)
    }

    /// 闪现消息 Cookie，只在下一次页面渲染时显示
    pub fn flash_cookie(&self, flashes: &[Flash]) -> Cookie<'static> {
        let json = serde_json::to_vec(flashes).unwrap_or_default();
        self.cookie(FLASH_COOKIE, URL_SAFE_NO_PAD.encode(json))
    }

    pub fn clear_flash_cookie(&self) -> Cookie<'static> {
        self.removal(FLASH_COOKIE)
    }

    fn cookie(&self, name: &'static str, value: String) -> Cookie<'static> {
        Cookie::build((name, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .build()
    }

    fn removal(&self, name: &'static str) -> Cookie<'static> {
        let mut cookie = self.cookie(name, String::new());
        cookie.make_removal();
        cookie
    }
}

/// 闪现消息类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashCategory {
    Success,
    Error,
    Info,
    Warning,
}

impl FlashCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashCategory::Success => "success",
            FlashCategory::Error => "error",
            FlashCategory::Info => "info",
            FlashCategory::Warning => "warning",
        }
    }
}

/// 一次性的页面提示
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub category: FlashCategory,
    pub message: String,
}

impl Flash {
    pub fn new(category: FlashCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(FlashCategory::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(FlashCategory::Error, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(FlashCategory::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(FlashCategory::Warning, message)
    }
}

/// 读取请求中的闪现消息，格式不对时忽略
pub fn read_flashes(headers: &HeaderMap) -> Vec<Flash> {
    cookie_value(headers, FLASH_COOKIE)
        .filter(|v| !v.is_empty())
        .and_then(|v| URL_SAFE_NO_PAD.decode(v).ok())
        .and_then(|bytes| serde_json::from_slice(&bytes).ok())
        .unwrap_or_default()
}

/// 从 `Cookie` 请求头中取出指定名称的值
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(name)
        .map(|cookie| cookie.value().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderValue};

    fn keys_with(secret: &str, secure_cookie: bool) -> SessionKeys {
        SessionKeys::new(&SessionSettings {
            secret: secret.to_string(),
            ttl_hours: 24,
            secure_cookie,
        })
    }

    fn keys(secret: &str) -> SessionKeys {
        keys_with(secret, false)
    }

    #[test]
    fn test_sign_and_verify() {
        let keys = keys("secret");
        let user = Uuid::new_v4();
        let now = Utc::now();
        let value = keys.sign(user, now);
        assert_eq!(keys.verify(&value, now), Some(user));
        assert_eq!(keys.verify(&value, now + Duration::hours(23)), Some(user));
    }

    #[test]
    fn test_expired_session_rejected() {
        let keys = keys("secret");
        let now = Utc::now();
        let value = keys.sign(Uuid::new_v4(), now);
        assert_eq!(keys.verify(&value, now + Duration::hours(25)), None);
    }

    #[test]
    fn test_tampered_session_rejected() {
        let keys = keys("secret");
        let now = Utc::now();
        let value = keys.sign(Uuid::new_v4(), now);

        let (_, rest) = value.split_once('.').unwrap();
        let forged = format!("{}.{}", Uuid::new_v4(), rest);
        assert_eq!(keys.verify(&forged, now), None);
        assert_eq!(self::keys("other").verify(&value, now), None);
        assert_eq!(keys.verify("garbage", now), None);
    }

    #[test]
    fn test_cookie_value_parsing() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; session=abc.123.ff; flash="),
        );
        assert_eq!(cookie_value(&headers, "session").as_deref(), Some("abc.123.ff"));
        assert_eq!(cookie_value(&headers, "flash").as_deref(), Some(""));
        assert_eq!(cookie_value(&headers, "missing"), None);
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = keys("secret").session_cookie(Uuid::new_v4());
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.max_age(), Some(time::Duration::hours(24)));
        assert!(!cookie.to_string().contains("Secure"));

        let secure = keys_with("secret", true).session_cookie(Uuid::new_v4());
        assert_eq!(secure.secure(), Some(true));
        assert!(secure.to_string().contains("Secure"));
    }

    #[test]
    fn test_clear_cookies_expire_immediately() {
        let keys = keys("secret");
        for cookie in [keys.clear_session_cookie(), keys.clear_flash_cookie()] {
            assert_eq!(cookie.value(), "");
            assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
            assert_eq!(cookie.path(), Some("/"));
        }
    }

    #[test]
    fn test_flash_cookie_round_trip() {
        let keys = keys("secret");
        let flashes = vec![Flash::warning("Careful & <slow>")];
        let cookie = keys.flash_cookie(&flashes);

        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&cookie.stripped().to_string()).unwrap(),
        );
        assert_eq!(read_flashes(&headers), flashes);
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::net::IpAddr;
use tokio::net::lookup_host;
use url::Url;

use crate::engines::traits::EngineError;

/// 解析个人主页 URL
///
/// 只接受带主机名的 http/https 地址，不做任何网络访问
pub fn parse_profile_url(raw: &str) -> Result<Url, EngineError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidUrl("empty url".to_string()));
    }

    let url = Url::parse(trimmed).map_err(|e| EngineError::InvalidUrl(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(EngineError::InvalidUrl(format!(
                "unsupported scheme: {}",
                other
            )))
        }
    }
    match url.host_str() {
        Some(host) if !host.is_empty() => {}
        _ => return Err(EngineError::InvalidUrl("missing host".to_string())),
    }

    Ok(url)
}

/// 验证 URL 是否安全 (防止 SSRF)
///
/// 检查解析后的 IP 是否为私有地址或环回地址
pub async fn validate_url(url: &Url) -> Result<(), EngineError> {
    let host = url
        .host_str()
        .ok_or_else(|| EngineError::InvalidUrl("missing host".to_string()))?;

    if host.eq_ignore_ascii_case("localhost") {
        return Err(EngineError::BlockedHost(
            "localhost is not allowed".to_string(),
        ));
    }

    // IPv6 literals come back bracketed from host_str
    let bare = host.trim_start_matches('[').trim_end_matches(']');
    if let Ok(ip) = bare.parse::<IpAddr>() {
        return check_ip(ip);
    }

    let port = url.port_or_known_default().unwrap_or(80);
    let addrs = lookup_host((host, port))
        .await
        .map_err(|e| EngineError::Other(format!("dns lookup failed for {}: {}", host, e)))?;

    for addr in addrs {
        check_ip(addr.ip())?;
    }

    Ok(())
}

fn check_ip(ip: IpAddr) -> Result<(), EngineError> {
    if is_private_ip(ip) {
        return Err(EngineError::BlockedHost(format!(
            "private address is not allowed: {}",
            ip
        )));
    }
    Ok(())
}

fn is_private_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(ipv4) => {
            ipv4.is_private()
                || ipv4.is_loopback()
                || ipv4.is_link_local()
                || ipv4.is_multicast()
                || ipv4.is_unspecified()
                || ipv4.is_broadcast()
        }
        IpAddr::V6(ipv6) => {
            if let Some(mapped) = ipv6.to_ipv4_mapped() {
                return is_private_ip(IpAddr::V4(mapped));
            }
            ipv6.is_loopback()
                || ipv6.is_unspecified()
                // Unique Local Address (fc00::/7)
                || (ipv6.segments()[0] & 0xfe00) == 0xfc00
                // Link-local (fe80::/10)
                || (ipv6.segments()[0] & 0xffc0) == 0xfe80
                // Multicast (ff00::/8)
                || (ipv6.segments()[0] & 0xff00) == 0xff00
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_profile_url_accepts_http_and_https() {
        assert!(parse_profile_url("https://www.cloudskillsboost.google/public_profiles/abc").is_ok());
        assert!(parse_profile_url("  http://example.com/u/1  ").is_ok());
    }

    #[test]
    fn test_parse_profile_url_rejects_garbage() {
        for raw in ["", "   ", "not a url", "ftp://example.com/x", "mailto:a@b.c", "file:///etc/passwd"] {
            assert!(
                matches!(parse_profile_url(raw), Err(EngineError::InvalidUrl(_))),
                "expected {:?} to be rejected",
                raw
            );
        }
    }

    #[tokio::test]
    async fn test_validate_url_blocks_private_literals() {
        for raw in [
            "http://localhost/x",
            "http://127.0.0.1/x",
            "http://10.1.2.3/x",
            "http://192.168.0.10/x",
            "http://172.16.5.4/x",
            "http://169.254.169.254/latest/meta-data",
            "http://[::1]/x",
            "http://[fd00::1]/x",
        ] {
            let url = Url::parse(raw).unwrap();
            assert!(
                matches!(validate_url(&url).await, Err(EngineError::BlockedHost(_))),
                "expected {} to be blocked",
                raw
            );
        }
    }

    #[tokio::test]
    async fn test_validate_url_allows_public_literal() {
        let url = Url::parse("http://93.184.216.34/profile").unwrap();
        assert!(validate_url(&url).await.is_ok());
    }

    #[test]
    fn test_is_private_ip_mapped_v6() {
        let ip: IpAddr = "::ffff:10.0.0.1".parse().unwrap();
        assert!(is_private_ip(ip));
        let ip: IpAddr = "::ffff:8.8.8.8".parse().unwrap();
        assert!(!is_private_ip(ip));
    }
}

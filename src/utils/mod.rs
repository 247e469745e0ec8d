use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::{Extensions, HeaderMap, request::Parts};

use crate::AppState;

/// 无法识别客户端时使用的标识
pub const UNKNOWN_CLIENT: &str = "unknown";

/// 解析客户端标识
///
/// 信任代理头时依次使用 `x-real-ip`、`x-forwarded-for` 中第一个非空地址，
/// 否则（或都缺失时）降级使用连接的对端地址。
pub fn client_id(headers: &HeaderMap, extensions: &Extensions, trust_proxy_headers: bool) -> String {
    // 从连接信息获取原始IP
    let remote_ip = extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ci| ci.0.ip().to_string());

    let forwarded = if trust_proxy_headers {
        headers
            .get("x-real-ip")
            .and_then(|h| h.to_str().ok())
            .filter(|ip| !ip.trim().is_empty())
            .or_else(|| {
                headers
                    .get("x-forwarded-for")
                    .and_then(|h| h.to_str().ok())
                    .and_then(|s| s.split(',').find(|ip| !ip.trim().is_empty()))
            })
    } else {
        None
    };

    forwarded
        .or(remote_ip.as_deref()) // 降级使用连接IP
        .unwrap_or(UNKNOWN_CLIENT)
        .trim()
        .to_string()
}

/// 处理函数使用的客户端标识提取器，配额按此标识计数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientId(pub String);

impl FromRequestParts<AppState> for ClientId {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(ClientId(client_id(
            &parts.headers,
            &parts.extensions,
            state.config.trust_proxy_headers,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn with_peer(addr: &str) -> Extensions {
        let mut extensions = Extensions::new();
        extensions.insert(ConnectInfo(addr.parse::<SocketAddr>().unwrap()));
        extensions
    }

    #[test]
    fn test_real_ip_header_wins() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("203.0.113.7"));
        headers.insert("x-forwarded-for", HeaderValue::from_static("198.51.100.1"));

        assert_eq!(client_id(&headers, &with_peer("10.0.0.1:5000"), true), "203.0.113.7");
    }

    #[test]
    fn test_first_forwarded_for_entry() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static(" , 198.51.100.1 , 10.0.0.2"));

        assert_eq!(client_id(&headers, &Extensions::new(), true), "198.51.100.1");
    }

    #[test]
    fn test_falls_back_to_peer_address() {
        assert_eq!(
            client_id(&HeaderMap::new(), &with_peer("192.0.2.10:41234"), true),
            "192.0.2.10"
        );
    }

    #[test]
    fn test_headers_ignored_when_not_trusted() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("203.0.113.7"));

        assert_eq!(client_id(&headers, &with_peer("192.0.2.10:1"), false), "192.0.2.10");
        assert_eq!(client_id(&headers, &Extensions::new(), false), UNKNOWN_CLIENT);
    }
}

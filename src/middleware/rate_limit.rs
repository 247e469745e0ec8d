use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{cache::RateLimitStore, cache::keys::rate_limit_key, error::AppError, utils::client_id};

/// 固定窗口限流器
///
/// 每个客户端在一个窗口内最多 `max_requests` 次请求，超出后直接返回 429，
/// 请求不会进入后续处理。
#[derive(Clone, Debug)]
pub struct RateLimiter {
    store: Arc<RateLimitStore>,
    scope: &'static str,
    max_requests: u32,
    window: Duration,
    trust_proxy_headers: bool,
}

impl RateLimiter {
    pub fn new(
        store: Arc<RateLimitStore>,
        scope: &'static str,
        max_requests: u32,
        window: Duration,
        trust_proxy_headers: bool,
    ) -> Self {
        Self {
            store,
            scope,
            max_requests,
            window,
            trust_proxy_headers,
        }
    }

    pub async fn check_rate_limit(&self, req: Request<Body>, next: Next) -> Response {
        let client = client_id(req.headers(), req.extensions(), self.trust_proxy_headers);
        let key = rate_limit_key(self.scope, &client);

        let count = match self.store.increment(&key, self.window).await {
            Ok(count) => count,
            Err(e) => {
                tracing::error!("Rate limit store unavailable: {}", e);
                return AppError::Unexpected("Rate limiter unavailable".to_string())
                    .into_response();
            }
        };

        if count > self.max_requests {
            tracing::info!(
                "Rate limit '{}' exceeded for {} ({} > {})",
                self.scope,
                client,
                count,
                self.max_requests
            );
            return AppError::RateLimited {
                retry_after_secs: self.window.as_secs(),
            }
            .into_response();
        }

        next.run(req).await
    }
}

pub async fn rate_limit(
    State(limiter): State<Arc<RateLimiter>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    limiter.check_rate_limit(req, next).await
}

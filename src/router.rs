use std::sync::Arc;

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};

use crate::{
    AppState,
    cache::RateLimitStore,
    config::Config,
    middleware::{RateLimiter, log_errors, rate_limit},
    routes,
};

/// 全局窗口与 `/check_news` 窗口两个限流器，共用同一个计数存储
#[derive(Clone, Debug)]
pub struct RateLimiters {
    pub global: Arc<RateLimiter>,
    pub check_news: Arc<RateLimiter>,
}

impl RateLimiters {
    pub fn from_config(config: &Config, store: Arc<RateLimitStore>) -> Self {
        Self {
            global: Arc::new(RateLimiter::new(
                store.clone(),
                "global",
                config.rate_limit_requests,
                config.rate_limit_window(),
                config.trust_proxy_headers,
            )),
            check_news: Arc::new(RateLimiter::new(
                store,
                "check_news",
                config.check_rate_limit_requests,
                config.rate_limit_window(),
                config.trust_proxy_headers,
            )),
        }
    }
}

// 创建主路由
// `/check_news` 只受自己的窗口限制，不计入全局窗口
pub fn create_router(state: AppState, limiters: RateLimiters) -> Router {
    let default_limited = Router::new()
        .route("/", get(routes::news::home))
        .layer(from_fn_with_state(limiters.global, rate_limit));

    let check_limited = Router::new().route(
        "/check_news",
        post(routes::news::check_news).layer(from_fn_with_state(limiters.check_news, rate_limit)),
    );

    // 健康检查不限流
    Router::new()
        .route("/healthz", get(routes::news::healthz))
        .merge(default_limited)
        .merge(check_limited)
        .layer(from_fn(log_errors))
        .with_state(state)
}

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use news_checker::{
    AppState,
    cache::RateLimitStore,
    checker::FactChecker,
    config::Config,
    router::{RateLimiters, create_router},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 加载配置
    let config = Config::from_env().expect("Failed to load configuration");

    #[cfg(debug_assertions)]
    tracing::info!("Running in debug mode with CORS enabled");

    #[cfg(not(debug_assertions))]
    tracing::info!("Running in production mode with CORS disabled");

    // 设置限流计数存储
    let store = match &config.redis_url {
        Some(url) => {
            tracing::info!("Using Redis rate limit store");
            let client =
                redis::Client::open(url.as_str()).expect("Failed to create Redis client");
            RateLimitStore::redis(client)
        }
        None => RateLimitStore::memory(),
    };
    let limiters = RateLimiters::from_config(&config, Arc::new(store));

    // 设置应用状态
    let checker = FactChecker::from_config(&config).expect("Failed to build HTTP clients");
    let state = AppState::new(config.clone(), checker);

    let router = create_router(state, limiters);

    // 根据编译模式决定是否添加CORS
    #[cfg(debug_assertions)]
    let router = {
        tracing::debug!("Adding CORS layer for development mode");
        // 设置开发环境的CORS，允许所有来源
        router.layer(tower_http::cors::CorsLayer::permissive())
    };

    // 启动服务器
    let addr = SocketAddr::new(
        config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        config.server_port,
    );
    tracing::info!(
        "Server listening on {} (cache ttl {}s, quota {} per client)",
        addr,
        config.cache_ttl_secs,
        config.quota_limit
    );
    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Failed to start server");
}

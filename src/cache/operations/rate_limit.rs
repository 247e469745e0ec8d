use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use redis::{Client as RedisClient, Pipeline};

use crate::cache::models::rate_limit::CachedRateLimit;

/// 限流计数存储
///
/// 单进程部署用内存表；配置 `REDIS_URL` 时改用 Redis，计数在多个实例之间共享。
pub enum RateLimitStore {
    Memory(Mutex<HashMap<String, CachedRateLimit>>),
    Redis(Arc<RedisClient>),
}

impl RateLimitStore {
    pub fn memory() -> Self {
        Self::Memory(Mutex::new(HashMap::new()))
    }

    pub fn redis(client: RedisClient) -> Self {
        Self::Redis(Arc::new(client))
    }

    /// 增加当前窗口内的计数并返回新值
    pub async fn increment(&self, key: &str, window: Duration) -> Result<u32, redis::RedisError> {
        match self {
            Self::Memory(windows) => Ok(Self::increment_memory(
                windows,
                key,
                window,
                chrono::Utc::now().timestamp(),
            )),
            Self::Redis(redis) => {
                let mut conn = redis.get_multiplexed_async_connection().await?;
                let (count,): (u32,) = Self::window_pipeline(key, window)
                    .query_async(&mut conn)
                    .await?;
                Ok(count)
            }
        }
    }

    // MULTI 中先以 SET NX EX 建立带过期时间的窗口，再 INCR；INCR 保留已有 TTL
    fn window_pipeline(key: &str, window: Duration) -> Pipeline {
        let mut pipe = redis::pipe();
        pipe.atomic()
            .cmd("SET")
            .arg(key)
            .arg(0)
            .arg("EX")
            .arg(window.as_secs().max(1))
            .arg("NX")
            .ignore()
            .incr(key, 1);
        pipe
    }

    fn increment_memory(
        windows: &Mutex<HashMap<String, CachedRateLimit>>,
        key: &str,
        window: Duration,
        now: i64,
    ) -> u32 {
        let mut windows = windows
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        // 顺手清理已过期的窗口
        windows.retain(|_, entry| entry.reset_at > now);

        let entry = windows
            .entry(key.to_string())
            .or_insert_with(|| CachedRateLimit {
                count: 0,
                reset_at: now + window.as_secs() as i64,
            });
        entry.count = entry.count.saturating_add(1);
        entry.count
    }
}

impl std::fmt::Debug for RateLimitStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Memory(_) => f.write_str("RateLimitStore::Memory"),
            Self::Redis(_) => f.write_str("RateLimitStore::Redis"),
        }
    }
}

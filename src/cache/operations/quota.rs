use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::cache::models::quota::CachedQuota;

/// 客户端配额计数器
///
/// 进程内计数，不持久化。未配置重置窗口时计数只增不减；
/// 配置后窗口到期的计数视为 0，并在下一次 `increment` 时重新开窗。
#[derive(Debug)]
pub struct QuotaTracker {
    counters: Mutex<HashMap<String, CachedQuota>>,
    limit: u32,
    reset_window: Option<Duration>,
}

impl QuotaTracker {
    pub fn new(limit: u32, reset_window: Option<Duration>) -> Self {
        Self {
            counters: Mutex::new(HashMap::new()),
            limit,
            reset_window,
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// 当前计数严格小于上限时允许通过，不修改状态
    pub fn check_admission(&self, client_id: &str) -> bool {
        self.used_at(client_id, chrono::Utc::now().timestamp()) < self.limit
    }

    /// 计数加一并返回新值，只应在 `check_admission` 通过后调用
    pub fn increment(&self, client_id: &str) -> u32 {
        self.increment_at(client_id, chrono::Utc::now().timestamp())
    }

    /// 当前已用次数
    pub fn used(&self, client_id: &str) -> u32 {
        self.used_at(client_id, chrono::Utc::now().timestamp())
    }

    fn used_at(&self, client_id: &str, now: i64) -> u32 {
        let counters = self.lock();
        counters
            .get(client_id)
            .filter(|quota| !self.window_elapsed(quota, now))
            .map_or(0, |quota| quota.count)
    }

    fn increment_at(&self, client_id: &str, now: i64) -> u32 {
        let mut counters = self.lock();
        let quota = counters
            .entry(client_id.to_string())
            .or_insert_with(|| CachedQuota {
                count: 0,
                window_started_at: now,
            });

        if self.window_elapsed(quota, now) {
            tracing::debug!("Quota window reset for client {}", client_id);
            quota.count = 0;
            quota.window_started_at = now;
        }

        quota.count = quota.count.saturating_add(1);
        quota.count
    }

    fn window_elapsed(&self, quota: &CachedQuota, now: i64) -> bool {
        match self.reset_window {
            Some(window) => now.saturating_sub(quota.window_started_at) >= window.as_secs() as i64,
            None => false,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, CachedQuota>> {
        self.counters
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

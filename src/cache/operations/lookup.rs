use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::cache::models::lookup::{CachedLookup, LookupOutcome};

/// 新闻检索结果缓存
///
/// 以原始查询文本为键，条目超过 TTL 后不再返回，并在下一次 `sweep` 时删除。
/// 所有读写共用一把互斥锁，锁内不做任何 IO。
#[derive(Debug)]
pub struct ResultCache {
    entries: Mutex<HashMap<String, CachedLookup>>,
    ttl: Duration,
}

impl ResultCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// 获取未过期的缓存条目
    pub fn get(&self, query: &str) -> Option<CachedLookup> {
        self.get_at(query, chrono::Utc::now().timestamp())
    }

    /// 写入（或覆盖）缓存条目，时间戳为当前时间
    pub fn put(&self, query: &str, outcome: &LookupOutcome) {
        self.put_at(query, outcome, chrono::Utc::now().timestamp());
    }

    /// 删除所有过期条目，返回删除数量
    pub fn sweep(&self) -> usize {
        self.sweep_at(chrono::Utc::now().timestamp())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get_at(&self, query: &str, now: i64) -> Option<CachedLookup> {
        let entries = self.lock();
        entries
            .get(query)
            .filter(|entry| entry.is_fresh(now, self.ttl.as_secs()))
            .cloned()
    }

    fn put_at(&self, query: &str, outcome: &LookupOutcome, now: i64) {
        let entry = CachedLookup {
            query: query.to_string(),
            found: outcome.found,
            title: outcome.title.clone(),
            stored_at: now,
        };
        self.lock().insert(query.to_string(), entry);
    }

    fn sweep_at(&self, now: i64) -> usize {
        let ttl_secs = self.ttl.as_secs();
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, entry| entry.is_fresh(now, ttl_secs));
        let removed = before - entries.len();
        if removed > 0 {
            tracing::debug!("Swept {} expired lookup cache entries", removed);
        }
        removed
    }

    // 锁中毒时沿用内部数据
    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, CachedLookup>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(300);

    #[test]
    fn test_put_and_get_found() {
        let cache = ResultCache::new(TTL);
        cache.put("moon landing", &LookupOutcome::found("Apollo 11 lands"));

        let entry = cache.get("moon landing").unwrap();
        assert!(entry.found);
        assert_eq!(entry.title.as_deref(), Some("Apollo 11 lands"));
        assert_eq!(entry.query, "moon landing");
    }

    #[test]
    fn test_negative_results_are_cached() {
        let cache = ResultCache::new(TTL);
        cache.put("nothing here", &LookupOutcome::not_found());

        let entry = cache.get("nothing here").unwrap();
        assert!(!entry.found);
        assert!(entry.title.is_none());
    }

    #[test]
    fn test_keys_are_exact_query_strings() {
        let cache = ResultCache::new(TTL);
        cache.put("Mars", &LookupOutcome::found("Rover"));

        assert!(cache.get("mars").is_none());
        assert!(cache.get("Mars ").is_none());
    }

    #[test]
    fn test_put_overwrites_existing_entry() {
        let cache = ResultCache::new(TTL);
        cache.put_at("q", &LookupOutcome::not_found(), 1_000);
        cache.put_at("q", &LookupOutcome::found("Fresh"), 1_100);

        let entry = cache.get_at("q", 1_100).unwrap();
        assert_eq!(entry.title.as_deref(), Some("Fresh"));
        assert_eq!(entry.stored_at, 1_100);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_entry_valid_up_to_ttl_boundary() {
        let cache = ResultCache::new(TTL);
        cache.put_at("q", &LookupOutcome::found("T"), 1_000);

        assert!(cache.get_at("q", 1_300).is_some());
        assert!(cache.get_at("q", 1_301).is_none());
    }

    #[test]
    fn test_expired_entry_not_returned_but_kept_until_sweep() {
        let cache = ResultCache::new(TTL);
        cache.put_at("old", &LookupOutcome::found("T"), 1_000);

        assert!(cache.get_at("old", 2_000).is_none());
        // get 不修改状态
        assert_eq!(cache.len(), 1);

        assert_eq!(cache.sweep_at(2_000), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_sweep_keeps_fresh_entries() {
        let cache = ResultCache::new(TTL);
        cache.put_at("old", &LookupOutcome::not_found(), 1_000);
        cache.put_at("new", &LookupOutcome::found("T"), 1_900);

        assert_eq!(cache.sweep_at(2_000), 1);
        assert!(cache.get_at("new", 2_000).is_some());
        assert!(cache.get_at("old", 2_000).is_none());
    }

    #[test]
    fn test_sweep_uses_wall_clock() {
        let cache = ResultCache::new(TTL);
        let long_ago = chrono::Utc::now().timestamp() - 3_600;
        cache.put_at("stale", &LookupOutcome::found("T"), long_ago);
        cache.put("fresh", &LookupOutcome::found("T"));

        assert!(cache.get("stale").is_none());
        assert_eq!(cache.sweep(), 1);
        assert!(cache.get("fresh").is_some());
    }
}

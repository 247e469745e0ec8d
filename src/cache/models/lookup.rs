/// 新闻检索结果（缓存值）
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LookupOutcome {
    pub found: bool,
    pub title: Option<String>,
}

impl LookupOutcome {
    pub fn found(title: impl Into<String>) -> Self {
        Self {
            found: true,
            title: Some(title.into()),
        }
    }

    pub fn not_found() -> Self {
        Self::default()
    }
}

/// 新闻检索缓存条目
#[derive(Debug, Clone)]
pub struct CachedLookup {
    pub query: String,
    pub found: bool,
    pub title: Option<String>,
    pub stored_at: i64, // Unix timestamp
}

impl CachedLookup {
    /// 条目在 `now - stored_at <= ttl` 期间有效
    pub fn is_fresh(&self, now: i64, ttl_secs: u64) -> bool {
        now.saturating_sub(self.stored_at) <= ttl_secs as i64
    }

    pub fn outcome(&self) -> LookupOutcome {
        LookupOutcome {
            found: self.found,
            title: self.title.clone(),
        }
    }
}

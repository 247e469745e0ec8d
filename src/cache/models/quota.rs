/// 客户端配额计数
#[derive(Debug, Clone)]
pub struct CachedQuota {
    pub count: u32,
    pub window_started_at: i64, // Unix timestamp
}

/// 固定窗口限流计数
#[derive(Debug, Clone)]
pub struct CachedRateLimit {
    pub count: u32,
    pub reset_at: i64, // Unix timestamp
}

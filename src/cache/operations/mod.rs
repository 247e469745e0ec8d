/// 缓存操作
/// 提供缓存操作的功能实现

// 新闻检索结果缓存
pub mod lookup;

// 客户端配额
pub mod quota;

pub mod rate_limit;

// 重新导出常用操作
pub use lookup::ResultCache;
pub use quota::QuotaTracker;
pub use rate_limit::RateLimitStore;

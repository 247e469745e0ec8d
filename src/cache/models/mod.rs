/// 缓存数据模型
/// 定义缓存数据的结构体
// 新闻检索缓存模型
pub mod lookup;

// 配额计数模型
pub mod quota;

pub mod rate_limit;

// 重新导出常用类型
pub use lookup::{CachedLookup, LookupOutcome};
pub use quota::CachedQuota;
pub use rate_limit::CachedRateLimit;

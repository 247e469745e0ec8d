/// 缓存键
/// 限流计数键，scope 区分全局窗口与单个接口的窗口
pub fn rate_limit_key(scope: &str, client_id: &str) -> String {
    format!("rate_limit:{}:{}", scope, client_id)
}

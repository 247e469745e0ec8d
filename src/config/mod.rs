use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_NEWS_API_URL: &str = "https://newsapi.org/v2/everything";
pub const DEFAULT_LLM_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_LLM_MODEL: &str = "llama3-70b-8192";

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub news_api_key: String,
    pub news_api_url: String,
    pub groq_api_key: String,
    pub llm_api_url: String,
    pub llm_model: String,
    pub llm_temperature: f32,
    pub search_timeout_secs: u64,
    pub llm_timeout_secs: u64,
    pub cache_ttl_secs: u64,
    pub quota_limit: u32,
    pub quota_reset_secs: Option<u64>,
    pub rate_limit_window_secs: u64,
    pub rate_limit_requests: u32,
    pub check_rate_limit_requests: u32,
    pub trust_proxy_headers: bool,
    pub redis_url: Option<String>,
    pub server_host: String,
    pub server_port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            news_api_key: String::new(),
            news_api_url: DEFAULT_NEWS_API_URL.to_string(),
            groq_api_key: String::new(),
            llm_api_url: DEFAULT_LLM_API_URL.to_string(),
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            llm_temperature: 0.3,
            search_timeout_secs: 10,
            llm_timeout_secs: 15,
            cache_ttl_secs: 300,
            quota_limit: 100,
            quota_reset_secs: None,
            rate_limit_window_secs: 60,
            rate_limit_requests: 10,
            check_rate_limit_requests: 5,
            trust_proxy_headers: false,
            redis_url: None,
            server_host: "0.0.0.0".to_string(),
            server_port: 5000,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 从任意键值来源构建配置，数值解析失败时使用默认值
    pub fn from_lookup<F>(lookup: F) -> Result<Self, env::VarError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let required = |name: &str| lookup(name).ok_or(env::VarError::NotPresent);
        let parsed = |name: &str, default| parse_or(lookup(name), default);

        // Render 等平台通过 PORT 注入端口
        let server_port = lookup("SERVER_PORT")
            .or_else(|| lookup("PORT"))
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.server_port);

        Ok(Config {
            news_api_key: required("NEWS_API_KEY")?,
            news_api_url: lookup("NEWS_API_URL").unwrap_or(defaults.news_api_url),
            groq_api_key: required("GROQ_API_KEY")?,
            llm_api_url: lookup("LLM_API_URL").unwrap_or(defaults.llm_api_url),
            llm_model: lookup("LLM_MODEL").unwrap_or(defaults.llm_model),
            llm_temperature: parse_or(lookup("LLM_TEMPERATURE"), defaults.llm_temperature),
            search_timeout_secs: parsed("SEARCH_TIMEOUT_SECS", defaults.search_timeout_secs),
            llm_timeout_secs: parsed("LLM_TIMEOUT_SECS", defaults.llm_timeout_secs),
            cache_ttl_secs: parsed("CACHE_TTL", defaults.cache_ttl_secs),
            quota_limit: parse_or(lookup("QUOTA_LIMIT"), defaults.quota_limit),
            quota_reset_secs: lookup("QUOTA_RESET_SECS")
                .and_then(|v| v.trim().parse().ok())
                .filter(|secs| *secs > 0),
            rate_limit_window_secs: parsed("RATE_LIMIT_WINDOW", defaults.rate_limit_window_secs),
            rate_limit_requests: parse_or(
                lookup("RATE_LIMIT_REQUESTS"),
                defaults.rate_limit_requests,
            ),
            check_rate_limit_requests: parse_or(
                lookup("CHECK_RATE_LIMIT_REQUESTS"),
                defaults.check_rate_limit_requests,
            ),
            trust_proxy_headers: lookup("TRUST_PROXY_HEADERS")
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.trust_proxy_headers),
            redis_url: lookup("REDIS_URL").filter(|v| !v.trim().is_empty()),
            server_host: lookup("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port,
        })
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn quota_reset_window(&self) -> Option<Duration> {
        self.quota_reset_secs.map(Duration::from_secs)
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }

    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_with_only_keys() {
        let config =
            Config::from_lookup(lookup_from(&[("NEWS_API_KEY", "n"), ("GROQ_API_KEY", "g")]))
                .unwrap();

        assert_eq!(config.news_api_key, "n");
        assert_eq!(config.groq_api_key, "g");
        assert_eq!(config.cache_ttl(), Duration::from_secs(300));
        assert_eq!(config.quota_limit, 100);
        assert_eq!(config.quota_reset_window(), None);
        assert_eq!(config.rate_limit_requests, 10);
        assert_eq!(config.check_rate_limit_requests, 5);
        assert_eq!(config.search_timeout(), Duration::from_secs(10));
        assert_eq!(config.llm_timeout(), Duration::from_secs(15));
        assert_eq!(config.server_port, 5000);
        assert_eq!(config.llm_model, DEFAULT_LLM_MODEL);
        assert!(!config.trust_proxy_headers);
        assert!(config.redis_url.is_none());
    }

    #[test]
    fn test_missing_api_key_is_an_error() {
        let result = Config::from_lookup(lookup_from(&[("NEWS_API_KEY", "n")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides_and_bad_numbers() {
        let config = Config::from_lookup(lookup_from(&[
            ("NEWS_API_KEY", "n"),
            ("GROQ_API_KEY", "g"),
            ("CACHE_TTL", "30"),
            ("QUOTA_LIMIT", "not-a-number"),
            ("QUOTA_RESET_SECS", "86400"),
            ("PORT", "8080"),
            ("TRUST_PROXY_HEADERS", "true"),
            ("REDIS_URL", ""),
        ]))
        .unwrap();

        assert_eq!(config.cache_ttl_secs, 30);
        assert_eq!(config.quota_limit, 100);
        assert_eq!(config.quota_reset_window(), Some(Duration::from_secs(86_400)));
        assert_eq!(config.server_port, 8080);
        assert!(config.trust_proxy_headers);
        assert!(config.redis_url.is_none());
    }

    #[test]
    fn test_server_port_takes_precedence_over_port() {
        let config = Config::from_lookup(lookup_from(&[
            ("NEWS_API_KEY", "n"),
            ("GROQ_API_KEY", "g"),
            ("SERVER_PORT", "3000"),
            ("PORT", "8080"),
        ]))
        .unwrap();
        assert_eq!(config.server_port, 3000);
    }
}

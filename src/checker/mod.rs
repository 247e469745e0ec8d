// 事实核查流程
// 输入校验 -> 配额 -> 新闻检索（带缓存）-> 大模型兜底

mod lookup;
mod prompt;

use std::sync::Arc;

pub use lookup::NewsLookup;
pub use prompt::{build_prompt, extract_json_object};

use crate::{
    cache::{QuotaTracker, ResultCache},
    clients::{FactCheckModel, GroqClient, NewsApiClient, NewsSearch},
    config::Config,
    error::AppError,
    models::{ClassificationResult, ModelVerdict, NewsStatus},
};

pub const NEWS_VERIFIED_EXPLANATION: &str = "Verified from live news sources (NewsAPI)";

pub struct FactChecker {
    quota: QuotaTracker,
    lookup: NewsLookup,
    model: Arc<dyn FactCheckModel>,
}

impl FactChecker {
    pub fn new(quota: QuotaTracker, lookup: NewsLookup, model: Arc<dyn FactCheckModel>) -> Self {
        Self {
            quota,
            lookup,
            model,
        }
    }

    /// 按配置创建真实的 NewsAPI 与 Groq 客户端
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let search: Arc<dyn NewsSearch> = Arc::new(NewsApiClient::new(config)?);
        let model: Arc<dyn FactCheckModel> = Arc::new(GroqClient::new(config)?);
        Ok(Self::with_backends(config, search, model))
    }

    pub fn with_backends(
        config: &Config,
        search: Arc<dyn NewsSearch>,
        model: Arc<dyn FactCheckModel>,
    ) -> Self {
        let cache = Arc::new(ResultCache::new(config.cache_ttl()));
        let quota = QuotaTracker::new(config.quota_limit, config.quota_reset_window());
        Self::new(quota, NewsLookup::new(cache, search), model)
    }

    pub fn quota(&self) -> &QuotaTracker {
        &self.quota
    }

    pub fn cache(&self) -> &Arc<ResultCache> {
        self.lookup.cache()
    }

    pub async fn check(
        &self,
        client_id: &str,
        news: Option<&str>,
    ) -> Result<ClassificationResult, AppError> {
        let news = news.map(str::trim).filter(|text| !text.is_empty());
        let Some(news) = news else {
            return Err(AppError::Input);
        };

        if !self.quota.check_admission(client_id) {
            tracing::info!("Quota exceeded for client {}", client_id);
            return Err(AppError::QuotaExceeded);
        }
        let quota_used = self.quota.increment(client_id);
        let quota_limit = self.quota.limit();

        let outcome = self.lookup.lookup(news).await;
        if outcome.found {
            return Ok(ClassificationResult {
                status: NewsStatus::Real,
                corrected_news: outcome.title,
                explanation: NEWS_VERIFIED_EXPLANATION.to_string(),
                quota_used,
                quota_limit,
            });
        }

        let verdict = self.ask_model(news).await?;
        Ok(ClassificationResult::from_verdict(
            verdict,
            quota_used,
            quota_limit,
        ))
    }

    async fn ask_model(&self, news: &str) -> Result<ModelVerdict, AppError> {
        let reply = self.model.complete(&build_prompt(news)).await.map_err(|e| {
            tracing::error!("Language model call failed: {}", e);
            AppError::from(e)
        })?;

        let Some(json) = extract_json_object(&reply) else {
            return Err(AppError::ResponseParse {
                raw_response: reply,
            });
        };

        let value: serde_json::Value = match serde_json::from_str(json) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Model reply JSON failed to parse: {}", e);
                return Err(AppError::ResponseParse {
                    raw_response: reply,
                });
            }
        };

        // JSON 合法但字段不符合判定结构
        serde_json::from_value(value).map_err(|e| {
            tracing::warn!("Model verdict has unexpected shape: {}", e);
            AppError::InvalidVerdict {
                details: e.to_string(),
                raw_response: reply.clone(),
            }
        })
    }
}

use std::sync::Arc;

use crate::cache::{LookupOutcome, ResultCache};
use crate::clients::NewsSearch;

/// 带缓存的新闻检索
///
/// 缓存命中时不发请求；未命中时请求一次检索接口，结果（包括未找到和请求失败）
/// 以原始查询文本为键写回缓存。检索失败一律视为未找到，不向上抛出。
pub struct NewsLookup {
    cache: Arc<ResultCache>,
    search: Arc<dyn NewsSearch>,
}

impl NewsLookup {
    pub fn new(cache: Arc<ResultCache>, search: Arc<dyn NewsSearch>) -> Self {
        Self { cache, search }
    }

    pub fn cache(&self) -> &Arc<ResultCache> {
        &self.cache
    }

    pub async fn lookup(&self, query: &str) -> LookupOutcome {
        self.cache.sweep();

        if let Some(entry) = self.cache.get(query) {
            tracing::debug!("Lookup cache hit for query: {:?}", query);
            return entry.outcome();
        }

        let outcome = match self.search.search(query).await {
            Ok(articles) => match articles.into_iter().next() {
                Some(article) => LookupOutcome {
                    found: true,
                    title: article.title,
                },
                None => LookupOutcome::not_found(),
            },
            Err(e) => {
                tracing::warn!("News search failed, treating as not found: {}", e);
                LookupOutcome::not_found()
            }
        };

        self.cache.put(query, &outcome);
        outcome
    }
}

// 外部服务客户端
// 新闻检索（NewsAPI）与大模型（Groq）两个远程接口

pub mod groq;
pub mod news;

use async_trait::async_trait;

pub use groq::{GroqClient, ModelError};
pub use news::{Article, NewsApiClient, SearchError};

/// 新闻检索后端
#[async_trait]
pub trait NewsSearch: Send + Sync {
    /// 按原始查询文本检索英文新闻，按发布时间倒序
    async fn search(&self, query: &str) -> Result<Vec<Article>, SearchError>;
}

/// 事实核查大模型后端
#[async_trait]
pub trait FactCheckModel: Send + Sync {
    /// 发送单轮提示词，返回模型的原始文本回复
    async fn complete(&self, prompt: &str) -> Result<String, ModelError>;
}

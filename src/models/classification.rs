use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CheckNewsRequest {
    #[serde(default)]
    pub news: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum NewsStatus {
    #[serde(alias = "real", alias = "REAL")]
    Real,
    #[serde(alias = "fake", alias = "FAKE")]
    Fake,
    #[serde(alias = "unverified", alias = "UNVERIFIED")]
    Unverified,
}

/// 大模型返回的判定结果
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ModelVerdict {
    pub status: NewsStatus,
    #[serde(default)]
    pub corrected_news: Option<String>,
    /// 缺失或为 null 时按空串处理
    #[serde(default)]
    pub explanation: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    pub status: NewsStatus,
    pub corrected_news: Option<String>,
    pub explanation: String,
    pub quota_used: u32,
    pub quota_limit: u32,
}

impl ClassificationResult {
    pub fn from_verdict(verdict: ModelVerdict, quota_used: u32, quota_limit: u32) -> Self {
        Self {
            status: verdict.status,
            corrected_news: verdict.corrected_news,
            explanation: verdict.explanation.unwrap_or_default(),
            quota_used,
            quota_limit,
        }
    }
}

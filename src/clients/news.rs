use std::fmt;

use async_trait::async_trait;
use serde::Deserialize;

use super::NewsSearch;
use crate::config::Config;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Article {
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug)]
pub enum SearchError {
    Transport(reqwest::Error),
    Status(u16),
    Decode(reqwest::Error),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::Transport(e) => write!(f, "news search request failed: {}", e),
            SearchError::Status(status) => write!(f, "news search returned status {}", status),
            SearchError::Decode(e) => write!(f, "news search response was not valid JSON: {}", e),
        }
    }
}

impl std::error::Error for SearchError {}

/// NewsAPI `/v2/everything` 客户端
#[derive(Clone)]
pub struct NewsApiClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
}

impl NewsApiClient {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.search_timeout())
            .build()?;

        Ok(Self {
            http,
            url: config.news_api_url.clone(),
            api_key: config.news_api_key.clone(),
        })
    }
}

#[async_trait]
impl NewsSearch for NewsApiClient {
    async fn search(&self, query: &str) -> Result<Vec<Article>, SearchError> {
        let response = self
            .http
            .get(&self.url)
            .query(&[
                ("q", query),
                ("language", "en"),
                ("sortBy", "publishedAt"),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(SearchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status.as_u16()));
        }

        let body: SearchResponse = response.json().await.map_err(SearchError::Decode)?;
        Ok(body.articles)
    }
}

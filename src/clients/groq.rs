use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::FactCheckModel;
use crate::config::Config;

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
struct ChatMessage {
    #[serde(default)]
    role: String,
    #[serde(default)]
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Deserialize, Default)]
struct ChatChoice {
    #[serde(default)]
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

impl ChatResponse {
    /// 第一个候选回复的文本，缺失时为空串
    fn into_reply(self) -> String {
        self.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .unwrap_or_default()
    }
}

#[derive(Debug)]
pub enum ModelError {
    /// 网络错误或超时
    Transport(String),
    /// 非 2xx 响应，附带上游返回的正文
    Status { status: u16, body: String },
    /// 2xx 响应但正文无法解析
    Decode(String),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::Transport(e) => write!(f, "language model request failed: {}", e),
            ModelError::Status { status, body } => {
                write!(f, "language model returned status {}: {}", status, body)
            }
            ModelError::Decode(e) => write!(f, "language model response was not valid JSON: {}", e),
        }
    }
}

impl std::error::Error for ModelError {}

/// Groq（OpenAI 兼容）chat completions 客户端
#[derive(Clone)]
pub struct GroqClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl GroqClient {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.llm_timeout())
            .build()?;

        Ok(Self {
            http,
            url: config.llm_api_url.clone(),
            api_key: config.groq_api_key.clone(),
            model: config.llm_model.clone(),
            temperature: config.llm_temperature,
        })
    }
}

#[async_trait]
impl FactCheckModel for GroqClient {
    async fn complete(&self, prompt: &str) -> Result<String, ModelError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: self.temperature,
        };

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ModelError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| ModelError::Decode(e.to_string()))?;
        Ok(body.into_reply())
    }
}

use axum::Json;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::clients::ModelError;

#[derive(Debug)]
pub enum AppError {
    /// 提交的新闻文本为空
    Input,
    QuotaExceeded,
    RateLimited { retry_after_secs: u64 },
    /// 大模型接口网络错误或非 2xx
    UpstreamService { details: String },
    /// 模型回复中找不到或无法解析 JSON
    ResponseParse { raw_response: String },
    /// 模型回复是合法 JSON，但不是预期的判定结构
    InvalidVerdict {
        details: String,
        raw_response: String,
    },
    Unexpected(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw_response: Option<String>,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Input => StatusCode::BAD_REQUEST,
            AppError::QuotaExceeded | AppError::RateLimited { .. } => {
                StatusCode::TOO_MANY_REQUESTS
            }
            AppError::UpstreamService { .. }
            | AppError::ResponseParse { .. }
            | AppError::InvalidVerdict { .. }
            | AppError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Input => f.write_str("No news text provided"),
            AppError::QuotaExceeded => f.write_str("Quota exceeded. Please try again later."),
            AppError::RateLimited { retry_after_secs } => write!(
                f,
                "Too many requests, please retry in {} seconds",
                retry_after_secs
            ),
            AppError::UpstreamService { .. } => f.write_str("Groq API error"),
            AppError::ResponseParse { .. } => f.write_str("AI response did not contain valid JSON"),
            AppError::InvalidVerdict { .. } => {
                f.write_str("AI response JSON did not match the expected verdict format")
            }
            AppError::Unexpected(message) => f.write_str(message),
        }
    }
}

impl std::error::Error for AppError {}

impl From<ModelError> for AppError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Transport(details) => AppError::UpstreamService { details },
            ModelError::Status { body, .. } => AppError::UpstreamService { details: body },
            ModelError::Decode(message) => AppError::Unexpected(message),
        }
    }
}

// 请求体不是合法 JSON 时按输入错误处理
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        AppError::Input
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error = self.to_string();
        let (details, raw_response) = match self {
            AppError::UpstreamService { details } => (Some(details), None),
            AppError::ResponseParse { raw_response } => (None, Some(raw_response)),
            AppError::InvalidVerdict {
                details,
                raw_response,
            } => (Some(details), Some(raw_response)),
            _ => (None, None),
        };

        let body = Json(ErrorResponse {
            error,
            details,
            raw_response,
        });

        (status, body).into_response()
    }
}

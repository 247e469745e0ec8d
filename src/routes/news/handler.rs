use axum::{
    extract::{Json, State, rejection::JsonRejection},
    response::{Html, IntoResponse},
};

use crate::{
    AppState,
    error::AppError,
    models::{CheckNewsRequest, ClassificationResult},
    utils::ClientId,
};

const INDEX_HTML: &str = include_str!("../../../static/index.html");

pub async fn home() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn healthz() -> impl IntoResponse {
    "OK"
}

#[axum::debug_handler]
pub async fn check_news(
    State(state): State<AppState>,
    ClientId(client): ClientId,
    payload: Result<Json<CheckNewsRequest>, JsonRejection>,
) -> Result<Json<ClassificationResult>, AppError> {
    let Json(req) = payload?;

    let result = state.checker.check(&client, req.news.as_deref()).await?;
    tracing::info!(
        "Checked news for {}: {:?} (quota {}/{})",
        client,
        result.status,
        result.quota_used,
        result.quota_limit
    );

    Ok(Json(result))
}

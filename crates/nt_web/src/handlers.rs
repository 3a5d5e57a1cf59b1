use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use nt_core::Article;
use nt_sources::ArticlesResponse;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use crate::AppState;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Article not found: {0}")]
    NotFound(String),

    #[error("Article already exists: {0}")]
    Conflict(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub async fn healthz() -> &'static str {
    "ok"
}

pub async fn list_articles(
    State(state): State<Arc<AppState>>,
) -> Json<ArticlesResponse> {
    let articles = state.articles.read().await.clone();
    tracing::debug!("Serving {} articles", articles.len());
    Json(ArticlesResponse { articles })
}

pub async fn create_article(
    State(state): State<Arc<AppState>>,
    Json(mut article): Json<Article>,
) -> Result<(StatusCode, Json<Article>), ApiError> {
    if article.id.trim().is_empty() {
        article.id = uuid::Uuid::new_v4().to_string();
    }

    let mut articles = state.articles.write().await;
    if articles.iter().any(|a| a.id == article.id) {
        return Err(ApiError::Conflict(article.id));
    }
    tracing::info!("💾 Stored article {}: {}", article.id, article.title);
    articles.push(article.clone());
    Ok((StatusCode::CREATED, Json(article)))
}

pub async fn get_article(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Article>, ApiError> {
    let articles = state.articles.read().await;
    let article = articles.iter().find(|a| a.id == id).cloned();
    article.map(Json).ok_or(ApiError::NotFound(id))
}

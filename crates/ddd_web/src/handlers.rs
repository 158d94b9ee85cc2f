use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use ddd_core::{Article, DigestConfig, DigestHistoryItem, Error, Rating, UserPreferences};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info, warn};
use crate::AppState;

/// Error body returned by every handler.
///
/// `reauthenticate` tells the client to ask for a new API key before retrying.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(Error),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self::Internal(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response(),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response(),
            Self::Internal(err) if err.is_authorization() => {
                warn!("Rejected credentials: {}", err);
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "error": err.to_string(), "reauthenticate": true })),
                )
                    .into_response()
            }
            Self::Internal(err) => {
                error!("Request failed: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": err.to_string() }))).into_response()
            }
        }
    }
}

type ApiResult<T> = std::result::Result<Json<T>, ApiError>;

fn use_preferences_default() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DigestRequest {
    #[serde(default)]
    pub config: DigestConfig,
    #[serde(default = "use_preferences_default")]
    pub use_preferences: bool,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub saved: bool,
}

#[derive(Debug, Deserialize)]
pub struct RateRequest {
    pub article: Article,
    pub rating: Option<Rating>,
}

#[derive(Debug, Serialize)]
pub struct RateResponse {
    pub rating: Option<Rating>,
}

pub async fn generate_digest(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DigestRequest>,
) -> ApiResult<DigestHistoryItem> {
    let prefs = if request.use_preferences {
        Some(state.library.preferences().await)
    } else {
        None
    };

    let articles = state.pipeline.generate_digest(&request.config, prefs.as_ref()).await?;
    let item = state.library.record_digest(&request.config, &articles).await?;
    info!("📰 Served digest {} with {} articles", item.id(), articles.len());
    Ok(Json(item))
}

pub async fn analyze_url(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeRequest>,
) -> ApiResult<DigestHistoryItem> {
    let url = request.url.trim();
    if url.is_empty() {
        return Err(ApiError::BadRequest("url must not be empty".to_string()));
    }

    let article = state.pipeline.analyze_url(url).await?;
    let item = state.library.record_analysis(&article).await?;
    Ok(Json(item))
}

pub async fn list_history(State(state): State<Arc<AppState>>) -> Json<Vec<DigestHistoryItem>> {
    Json(state.library.history().await)
}

pub async fn get_history(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<DigestHistoryItem> {
    state
        .library
        .find_history(&id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("No history item {}", id)))
}

pub async fn list_saved(State(state): State<Arc<AppState>>) -> Json<Vec<Article>> {
    Json(state.library.saved().await)
}

pub async fn toggle_saved(
    State(state): State<Arc<AppState>>,
    Json(article): Json<Article>,
) -> ApiResult<SaveResponse> {
    let saved = state.library.toggle_save(&article).await?;
    Ok(Json(SaveResponse { saved }))
}

pub async fn list_ratings(State(state): State<Arc<AppState>>) -> Json<UserPreferences> {
    Json(state.library.preferences().await)
}

pub async fn rate_article(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RateRequest>,
) -> ApiResult<RateResponse> {
    state.library.rate(&request.article, request.rating).await?;
    Ok(Json(RateResponse { rating: request.rating }))
}

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tokio_util::sync::CancellationToken;

use santara_core::{SearchRequest, SearchResponse};

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/search", post(search))
        .route("/api/v1/health", get(health))
        .route("/api/v1/providers", get(providers))
}

async fn search(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let cancel = CancellationToken::new();
    let response = state.search.search(&cancel, &req).await?;
    Ok(Json(response))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy" }))
}

async fn providers(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({ "providers": state.search.provider_names() }))
}

//! API routes and request/response shapes

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use faqd_core::{FaqEntry, RealtimeAnswer};

use crate::AppState;
use crate::error::ApiError;

#[derive(Deserialize)]
pub struct AddFaqRequest {
    pub question: String,
    pub answer: String,
}

#[derive(Deserialize)]
pub struct RemoveIdxRequest {
    pub idx: usize,
}

#[derive(Deserialize)]
pub struct FaqQueryRequest {
    pub query: String,
    pub topk: usize,
}

#[derive(Deserialize)]
pub struct RealtimeQueryRequest {
    pub query: String,
    #[serde(default = "default_realtime_topk")]
    pub topk: usize,
}

fn default_realtime_topk() -> usize {
    1
}

/// Build the API router
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/health", get(health))
        .route("/get-faq", post(get_faq))
        .route("/add-faq", post(add_faq))
        .route("/delete-faq", post(delete_faq))
        .route("/search-faq", post(search_faq))
        .route("/search-realtime", post(search_realtime));

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn get_faq(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BTreeMap<usize, FaqEntry>>, ApiError> {
    let faq = state.faq.lock().await;
    Ok(Json(faq.list()))
}

async fn add_faq(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AddFaqRequest>,
) -> Result<Json<BTreeMap<usize, FaqEntry>>, ApiError> {
    let mut faq = state.faq.lock().await;
    let listed = faq.add(request.question, request.answer).await?;
    Ok(Json(listed))
}

async fn delete_faq(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RemoveIdxRequest>,
) -> Result<Json<BTreeMap<usize, FaqEntry>>, ApiError> {
    let mut faq = state.faq.lock().await;
    let listed = faq.delete(request.idx).await?;
    Ok(Json(listed))
}

async fn search_faq(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FaqQueryRequest>,
) -> Result<Json<BTreeMap<usize, String>>, ApiError> {
    let faq = state.faq.lock().await;
    let answers = faq.search(&request.query, request.topk).await?;
    Ok(Json(answers))
}

async fn search_realtime(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RealtimeQueryRequest>,
) -> Result<Json<RealtimeAnswer>, ApiError> {
    let realtime = state.realtime.lock().await;
    let answer = realtime.search_realtime(&request.query, request.topk).await?;
    Ok(Json(answer))
}

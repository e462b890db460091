use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::error::PipelineError;
use crate::pipeline;
use crate::search::SearchBackend;
use crate::security;

pub struct AppState<S> {
    pub config: Config,
    pub client: reqwest::Client,
    pub search: S,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub text: String,
}

#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchResponse {
    pub fn success(results: String) -> Self {
        Self {
            results: Some(results),
            error: None,
        }
    }

    pub fn failure(message: &str) -> Self {
        Self {
            results: None,
            error: Some(message.to_string()),
        }
    }
}

/// `POST /api/search`
pub async fn translate_search<S: SearchBackend>(
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
    body: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, PipelineError> {
    if !security::is_authorized(&headers, state.config.api_key.as_deref()) {
        return Err(PipelineError::Unauthorized);
    }

    let Json(request) = body.map_err(|e| PipelineError::InvalidBody(e.body_text()))?;

    let answer = pipeline::run(&state.client, &state.config, &state.search, &request.text).await?;
    info!("Translated search answered");

    Ok(Json(SearchResponse::success(answer)))
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Other methods on `/api/search` get axum's empty 405.
pub fn router<S: SearchBackend + 'static>(state: Arc<AppState<S>>) -> Router {
    Router::new()
        .route("/api/search", post(translate_search::<S>))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

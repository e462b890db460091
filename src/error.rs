use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::handler::SearchResponse;

/// Message returned for every failed request. Causes are only logged.
pub const GENERIC_FAILURE: &str = "Failed to translate and search";

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Missing or invalid API key")]
    Unauthorized,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Forward translation failed: {0:#}")]
    ForwardTranslation(anyhow::Error),

    #[error("{step} returned no text content")]
    NoTextContent { step: &'static str },

    #[error("Translation reply has no '---' delimiter: {reply:?}")]
    MissingDelimiter { reply: String },

    #[error("Search failed: {0:#}")]
    Search(anyhow::Error),

    #[error("Search returned no answer for {query:?}")]
    NoAnswer { query: String },

    #[error("Back translation failed: {0:#}")]
    BackTranslation(anyhow::Error),
}

impl IntoResponse for PipelineError {
    fn into_response(self) -> Response {
        match self {
            PipelineError::Unauthorized => {
                tracing::warn!("Rejected request without a valid API key");
                (
                    StatusCode::UNAUTHORIZED,
                    Json(SearchResponse::failure("Unauthorized")),
                )
                    .into_response()
            }
            err => {
                tracing::error!("Error translating and searching: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(SearchResponse::failure(GENERIC_FAILURE)),
                )
                    .into_response()
            }
        }
    }
}

use crate::config::Config;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::future::Future;
use tracing::debug;

/// One hit returned alongside an answer by the FAQ search service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub title: String,
    pub summary: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_title: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchAnswer {
    pub answer: String,
    pub results: Vec<SearchResult>,
}

/// The FAQ search routine the pipeline delegates to.
///
/// `Ok(None)` means the search ran but produced no answer.
pub trait SearchBackend: Send + Sync {
    fn search(&self, query: &str) -> impl Future<Output = Result<Option<SearchAnswer>>> + Send;
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    results: Vec<SearchResult>,
}

/// Calls a FAQ search service over HTTP: `POST {"query": ...}`
#[derive(Debug, Clone)]
pub struct HttpSearchBackend {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl HttpSearchBackend {
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            url: config.search_api_url.clone(),
            api_key: config.search_api_key.clone(),
        }
    }
}

impl SearchBackend for HttpSearchBackend {
    async fn search(&self, query: &str) -> Result<Option<SearchAnswer>> {
        let mut request = self.client.post(&self.url).json(&SearchRequest { query });
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {}", key));
        }

        let response = request
            .send()
            .await
            .context("Failed to send request to search service")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            anyhow::bail!("Search service error ({}): {}", status, body);
        }

        let body: SearchResponse = response
            .json()
            .await
            .context("Failed to parse search service response")?;

        debug!(results = body.results.len(), "search service responded");

        Ok(body.answer.map(|answer| SearchAnswer {
            answer,
            results: body.results,
        }))
    }
}

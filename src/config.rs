use anyhow::{Context, Result};
use std::time::Duration;

pub const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

#[derive(Debug, Clone)]
pub struct Config {
    // OpenAI
    pub openai_api_key: String,
    pub openai_model: String,
    pub openai_api_url: String,
    pub openai_temperature: f32,
    pub openai_max_attempts: u32,

    // Search collaborator
    pub search_api_url: String,
    pub search_api_key: Option<String>,

    // Server
    pub api_key: Option<String>,
    pub port: u16,

    // Pipeline
    pub pipeline_delay: Duration,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // OpenAI
            openai_api_key: std::env::var("OPENAI_API_KEY")
                .context("OPENAI_API_KEY not set")?,
            openai_model: std::env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| "gpt-4o".to_string()),
            openai_api_url: std::env::var("OPENAI_API_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_API_URL.to_string()),
            openai_temperature: parse_or("OPENAI_TEMPERATURE", 0.9),
            openai_max_attempts: parse_or("OPENAI_MAX_ATTEMPTS", 1u32).max(1),

            // Search collaborator
            search_api_url: std::env::var("SEARCH_API_URL")
                .context("SEARCH_API_URL not set")?,
            search_api_key: non_empty("SEARCH_API_KEY"),

            // Server
            api_key: non_empty("API_KEY"),
            port: parse_or("PORT", 8080),

            // Pipeline
            pipeline_delay: Duration::from_millis(parse_or("PIPELINE_DELAY_MS", 0)),
            request_timeout: Duration::from_secs(parse_or("REQUEST_TIMEOUT_SECS", 60)),
        })
    }
}

fn parse_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn non_empty(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

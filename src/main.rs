use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use translate_search::config::Config;
use translate_search::handler::{self, AppState};
use translate_search::search::HttpSearchBackend;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("translate_search=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;

    let client = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()
        .context("Failed to build HTTP client")?;

    info!(
        model = %config.openai_model,
        search = %config.search_api_url,
        "Starting translate-search"
    );
    if config.api_key.is_none() {
        info!("API_KEY not set, endpoint is open");
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = Arc::new(AppState {
        search: HttpSearchBackend::new(client.clone(), &config),
        client,
        config,
    });

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, handler::router(state)).await?;

    Ok(())
}

//! Translate -> search -> translate back.

use tracing::{debug, info};

use crate::config::Config;
use crate::error::PipelineError;
use crate::search::SearchBackend;
use crate::translation::{self, Translation};

/// Answer `text` in the language it was written in.
///
/// Steps run strictly in sequence and the first failure ends the request.
pub async fn run<S: SearchBackend>(
    client: &reqwest::Client,
    config: &Config,
    search: &S,
    text: &str,
) -> Result<String, PipelineError> {
    info!("Detecting language and translating to English");
    let reply = translation::translate_to_english(client, config, text)
        .await
        .map_err(PipelineError::ForwardTranslation)?
        .ok_or(PipelineError::NoTextContent {
            step: "Forward translation",
        })?;

    let translation = Translation::parse(&reply);
    debug!(?translation, "parsed forward translation");
    let english = translation
        .translated_text
        .ok_or_else(|| PipelineError::MissingDelimiter {
            reply: reply.clone(),
        })?;
    let language = translation.detected_language;

    info!(%language, "Searching with translated phrase");
    let answer = search
        .search(&english)
        .await
        .map_err(PipelineError::Search)?
        .ok_or_else(|| PipelineError::NoAnswer {
            query: english.clone(),
        })?;
    debug!(answer = %answer.answer, results = answer.results.len(), "search answered");

    if !config.pipeline_delay.is_zero() {
        debug!(delay = ?config.pipeline_delay, "Waiting before back translation");
        tokio::time::sleep(config.pipeline_delay).await;
    }

    info!(%language, "Translating answer back");
    let translated = translation::translate_to_original(client, config, &answer.answer, &language)
        .await
        .map_err(PipelineError::BackTranslation)?
        .ok_or(PipelineError::NoTextContent {
            step: "Back translation",
        })?;

    Ok(translated)
}

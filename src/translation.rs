use crate::config::Config;
use crate::openai::{self, Tool};
use anyhow::{Context, Result};
use tracing::debug;

/// Separator between the detected language and the English text in the
/// forward translator's reply, e.g. `Spanish---Hello, how are you?`.
pub const LANGUAGE_DELIMITER: &str = "---";

const SYSTEM_PROMPT_TO_ENGLISH: &str = r#"You are the best translator in the world. You are going to receive a message in a different language.
For each message, you will need to detect the language of the message, and translate the phrase into English. You will return the detected language, three hyphens, and then the translated phrase.
For example, if you receive the message 'Hola, ¿cómo estás?', you should detect the language as Spanish and respond with 'Spanish---Hello, how are you?'. If you receive the message 'Bonjour, comment ça va?', you should detect the language as French and respond with 'French---Hello, how are you?'.
If you receive the message 'Hallo, wie geht es dir?', you should detect the language as German and respond with 'German---Hello, how are you?'. If you receive the message 'Ciao, come stai?', you should detect the language as Italian and respond with 'Italian---Hello, how are you?'.
If you receive the message 'Olá, como você está?', you should detect the language as Portuguese and respond with 'Portuguese---Hello, how are you?'."#;

const SYSTEM_PROMPT_TO_LANGUAGE: &str = r#"You are the best translator in the world. You are going to receive a message in English and a language to translate it into. The messages will be formatted like this: '$message --- $language'. You will return the translated message.
For example, if you receive the message 'Hello, how are you? --- Spanish', you should respond with 'Hola, ¿cómo estás?'. If you receive the message 'Hello, how are you? --- French', you should respond with 'Bonjour, comment ça va?'."#;

/// The forward translator's reply split into its two fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub detected_language: String,
    /// `None` when the reply carried no delimiter
    pub translated_text: Option<String>,
}

impl Translation {
    /// Split a `<language>---<text>` reply.
    ///
    /// Only the first two segments are used; anything after a second
    /// delimiter is dropped.
    pub fn parse(response: &str) -> Self {
        let mut segments = response.split(LANGUAGE_DELIMITER);
        let detected_language = segments.next().unwrap_or_default().trim().to_string();
        let translated_text = segments.next().map(|s| s.trim().to_string());

        Self {
            detected_language,
            translated_text,
        }
    }
}

fn detect_and_translate_tool() -> Tool {
    Tool::function(
        "search_faq",
        "Translate a phrase and detect the language",
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "English search query that needs to be translated"
                }
            },
            "required": ["query"]
        }),
    )
}

fn translate_back_tool() -> Tool {
    Tool::function(
        "search_faq",
        "Translate a phrase to the specified language",
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "English search query result that needs to be translated back to the specified language"
                }
            }
        }),
    )
}

/// Build the user message for the back translator: `<phrase> --- <language>`
pub fn build_back_translation_prompt(phrase: &str, language: &str) -> String {
    format!("{} {} {}", phrase, LANGUAGE_DELIMITER, language)
}

/// Ask the model to detect the phrase's language and translate it to English.
///
/// Returns the raw `<language>---<text>` reply, or `None` if the model
/// answered without text.
pub async fn translate_to_english(
    client: &reqwest::Client,
    config: &Config,
    phrase: &str,
) -> Result<Option<String>> {
    let reply = openai::complete(
        client,
        config,
        SYSTEM_PROMPT_TO_ENGLISH,
        phrase,
        &[detect_and_translate_tool()],
    )
    .await
    .context("Failed to translate phrase to English")?;

    debug!(?reply, "forward translation reply");
    Ok(reply)
}

/// Ask the model to translate an English phrase into `language`.
pub async fn translate_to_original(
    client: &reqwest::Client,
    config: &Config,
    phrase: &str,
    language: &str,
) -> Result<Option<String>> {
    let prompt = build_back_translation_prompt(phrase, language);
    debug!(%prompt, "back translation input");

    let reply = openai::complete(
        client,
        config,
        SYSTEM_PROMPT_TO_LANGUAGE,
        &prompt,
        &[translate_back_tool()],
    )
    .await
    .with_context(|| format!("Failed to translate answer back to {}", language))?;

    debug!(?reply, "back translation reply");
    Ok(reply)
}

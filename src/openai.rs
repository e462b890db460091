use crate::config::Config;
use crate::retry::{with_retry_if, RetryConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum OpenAiError {
    #[error("OpenAI API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Failed to send request to OpenAI API: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Failed to parse OpenAI response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("OpenAI response contained no choices")]
    NoChoices,
}

impl OpenAiError {
    /// 429 and 5xx responses and transport failures are worth another attempt.
    /// Other 4xx errors and malformed bodies are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            OpenAiError::Api { status, .. } => *status == 429 || *status >= 500,
            OpenAiError::Network(_) => true,
            OpenAiError::Decode(_) | OpenAiError::NoChoices => false,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
    temperature: f32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<&'static str>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    #[serde(default)]
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    tool_calls: Vec<ToolCall>,
}

impl Message {
    fn new(role: &str, content: &str) -> Self {
        Self {
            role: role.to_string(),
            content: Some(content.to_string()),
            tool_calls: Vec::new(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ToolCall {
    #[serde(default)]
    id: Option<String>,
    function: FunctionCall,
}

#[derive(Debug, Serialize, Deserialize)]
struct FunctionCall {
    name: String,
    #[serde(default)]
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

/// A function tool advertised to the model. Calls to it are never executed.
#[derive(Debug, Clone, Serialize)]
pub struct Tool {
    #[serde(rename = "type")]
    kind: &'static str,
    function: FunctionDefinition,
}

#[derive(Debug, Clone, Serialize)]
struct FunctionDefinition {
    name: String,
    description: String,
    parameters: serde_json::Value,
}

impl Tool {
    pub fn function(name: &str, description: &str, parameters: serde_json::Value) -> Self {
        Self {
            kind: "function",
            function: FunctionDefinition {
                name: name.to_string(),
                description: description.to_string(),
                parameters,
            },
        }
    }
}

/// Run one system + user chat completion.
///
/// Returns the text content of the first choice, or `None` when the model
/// answered without text (for example with only a tool call).
pub async fn complete(
    client: &reqwest::Client,
    config: &Config,
    system_prompt: &str,
    user_prompt: &str,
    tools: &[Tool],
) -> Result<Option<String>, OpenAiError> {
    let request = ChatRequest {
        model: &config.openai_model,
        messages: vec![
            Message::new("system", system_prompt),
            Message::new("user", user_prompt),
        ],
        temperature: config.openai_temperature,
        tools: tools.to_vec(),
        tool_choice: if tools.is_empty() { None } else { Some("auto") },
    };

    let message = with_retry_if(
        &RetryConfig::model_call(config.openai_max_attempts),
        "OpenAI chat completion",
        || send_chat_request(client, config, &request),
        OpenAiError::is_retryable,
    )
    .await?;

    if !message.tool_calls.is_empty() {
        let names: Vec<&str> = message
            .tool_calls
            .iter()
            .map(|c| c.function.name.as_str())
            .collect();
        warn!("Model requested tool calls {:?}; tools are not executed", names);
    }

    Ok(message.content)
}

async fn send_chat_request(
    client: &reqwest::Client,
    config: &Config,
    request: &ChatRequest<'_>,
) -> Result<Message, OpenAiError> {
    let response = client
        .post(&config.openai_api_url)
        .header("Authorization", format!("Bearer {}", config.openai_api_key))
        .header("Content-Type", "application/json")
        .json(request)
        .send()
        .await
        .map_err(OpenAiError::Network)?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
        return Err(OpenAiError::Api {
            status: status.as_u16(),
            body,
        });
    }

    let chat_response: ChatResponse = response.json().await.map_err(OpenAiError::Decode)?;
    debug!(model = %request.model, "chat completion received");

    chat_response
        .choices
        .into_iter()
        .next()
        .map(|c| c.message)
        .ok_or(OpenAiError::NoChoices)
}

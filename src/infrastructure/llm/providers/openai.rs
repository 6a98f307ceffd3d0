//! OpenAI-compatible API provider
//!
//! Supports OpenAI, Groq, xAI and any endpoint speaking `/chat/completions`.

use serde::{Deserialize, Serialize};

use super::{ProviderConfig, api_error, http_client};
use crate::infrastructure::llm::{Context, Error, Response, TokenUsage};

/// OpenAI API request format
#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

/// OpenAI API response format
#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    model: String,
    choices: Vec<OpenAIChoice>,
    #[serde(default)]
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o";

fn completions_url(base_url: Option<&str>) -> String {
    format!(
        "{}/chat/completions",
        base_url.unwrap_or(DEFAULT_BASE_URL).trim_end_matches('/')
    )
}

fn build_request(model: &str, context: Context) -> OpenAIRequest {
    OpenAIRequest {
        model: model.to_string(),
        messages: context
            .messages
            .into_iter()
            .map(|msg| OpenAIMessage {
                role: msg.role.as_str().to_string(),
                content: msg.content,
            })
            .collect(),
        temperature: context.temperature,
    }
}

/// Content of the first choice plus usage, zeroed when the API omits it.
fn decode_response(openai_response: OpenAIResponse) -> Result<Response, Error> {
    let content = openai_response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| Error::new("openai", "No choices in response"))?;

    let usage = openai_response
        .usage
        .map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        })
        .unwrap_or_default();

    Ok(Response {
        content,
        model: openai_response.model,
        usage,
    })
}

/// Execute a chat request using OpenAI-compatible API
pub async fn chat(config: ProviderConfig, context: Context) -> Result<Response, Error> {
    let model = if config.default_model.is_empty() {
        DEFAULT_MODEL
    } else {
        config.default_model.as_str()
    };
    let url = completions_url(config.base_url.as_deref());
    let request = build_request(model, context);

    let mut request_builder = http_client()
        .post(&url)
        .header("Authorization", format!("Bearer {}", config.api_key))
        .json(&request);

    if let Some(timeout_secs) = config.timeout {
        request_builder = request_builder.timeout(std::time::Duration::from_secs(timeout_secs));
    }

    let response = request_builder
        .send()
        .await
        .map_err(|e| Error::new("openai", format!("HTTP request failed: {}", e)))?;

    let status = response.status();

    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error response".to_string());
        return Err(api_error("openai", status, &error_text));
    }

    let openai_response: OpenAIResponse = response
        .json()
        .await
        .map_err(|e| Error::new("openai", format!("Failed to parse response: {}", e)))?;

    decode_response(openai_response)
}

//! Gemini provider
//!
//! Talks to Google's `generateContent` endpoint. System messages go into the
//! dedicated `systemInstruction` slot rather than the conversation.

use serde::{Deserialize, Serialize};

use super::{ProviderConfig, api_error, http_client};
use crate::infrastructure::llm::{Context, Error, MessageRole, Response, TokenUsage};

/// Gemini API request format
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

/// Gemini content (message)
#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
}

/// Gemini API response format
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    usage_metadata: Option<GeminiUsage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GeminiUsage {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

fn build_request(context: &Context) -> GeminiRequest {
    let system_instruction = context.system_text().map(|text| GeminiContent {
        role: None,
        parts: vec![GeminiPart { text }],
    });

    let contents = context
        .messages
        .iter()
        .filter(|msg| msg.role != MessageRole::System)
        .map(|msg| GeminiContent {
            role: Some("user".to_string()),
            parts: vec![GeminiPart {
                text: msg.content.clone(),
            }],
        })
        .collect();

    let generation_config = context
        .temperature
        .map(|temperature| GenerationConfig { temperature });

    GeminiRequest {
        system_instruction,
        contents,
        generation_config,
    }
}

/// Joined text of the first candidate.
fn extract_text(response: GeminiResponse) -> Result<(String, GeminiUsage), Error> {
    let usage = response.usage_metadata.unwrap_or_default();
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| Error::new("gemini", "No candidates in response"))?;

    let content = candidate.content.ok_or_else(|| {
        Error::new(
            "gemini",
            format!(
                "Empty candidate (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            ),
        )
    })?;

    let text = content
        .parts
        .into_iter()
        .map(|part| part.text)
        .collect::<Vec<_>>()
        .join("\n");
    Ok((text, usage))
}

/// Execute a chat request using Gemini's API
pub async fn chat(config: ProviderConfig, context: Context) -> Result<Response, Error> {
    let base_url = config
        .base_url
        .clone()
        .unwrap_or_else(|| "https://generativelanguage.googleapis.com".to_string());

    let model = if config.default_model.is_empty() {
        "gemini-1.5-flash".to_string()
    } else {
        config.default_model.clone()
    };

    let url = format!("{}/v1beta/models/{}:generateContent", base_url, model);
    let request = build_request(&context);

    let mut request_builder = http_client()
        .post(&url)
        .header("x-goog-api-key", &config.api_key)
        .json(&request);

    if let Some(timeout_secs) = config.timeout {
        request_builder = request_builder.timeout(std::time::Duration::from_secs(timeout_secs));
    }

    let response = request_builder
        .send()
        .await
        .map_err(|e| Error::new("gemini", format!("HTTP request failed: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error response".to_string());
        return Err(api_error("gemini", status, &error_text));
    }

    let gemini_response: GeminiResponse = response
        .json()
        .await
        .map_err(|e| Error::new("gemini", format!("Failed to parse response: {}", e)))?;

    let (content, usage) = extract_text(gemini_response)?;

    Ok(Response {
        content,
        model,
        usage: TokenUsage {
            prompt_tokens: usage.prompt_token_count,
            completion_tokens: usage.candidates_token_count,
            total_tokens: usage.total_token_count,
        },
    })
}

//! # LLM Providers
//!
//! Implementations for specific LLM providers:
//! - Gemini (native `generateContent`)
//! - OpenAI-compatible chat completions (OpenAI, Groq, xAI, custom endpoints)

mod gemini;
mod openai;

use crate::domain::config::AgentConfig;
use crate::infrastructure::llm::{Context, Error, Provider, Response};
use reqwest::Client;

/// Configuration for a provider
#[derive(Clone)]
pub struct ProviderConfig {
    /// API key
    pub api_key: String,
    /// Base URL (for non-default endpoints)
    pub base_url: Option<String>,
    /// Default model
    pub default_model: String,
    /// Timeout in seconds
    pub timeout: Option<u64>,
}

impl ProviderConfig {
    pub fn from_agent_config(config: &AgentConfig) -> Result<Self, Error> {
        let api_key = if let Some(key) = &config.api_key {
            key.clone()
        } else if let Some(env_var) = &config.api_key_env {
            std::env::var(env_var).map_err(|e| {
                Error::new(
                    &config.provider,
                    format!("API key env var {} not set: {}", env_var, e),
                )
            })?
        } else {
            return Err(Error::new(
                &config.provider,
                "No API key provided - set api_key or api_key_env",
            ));
        };

        Ok(Self {
            api_key,
            base_url: config.endpoint.clone(),
            default_model: config.model.clone(),
            timeout: config.timeout,
        })
    }

    fn with_default_base_url(self, url: &str) -> Self {
        Self {
            base_url: self.base_url.or_else(|| Some(url.to_string())),
            ..self
        }
    }
}

/// HTTP client reused across requests. No client-wide timeout: per-agent
/// timeouts are applied on each request.
fn http_client() -> &'static Client {
    use std::sync::OnceLock;
    static CLIENT: OnceLock<Client> = OnceLock::new();
    CLIENT.get_or_init(Client::new)
}

/// Turns a non-2xx body into an error, preferring the API's own message.
fn api_error(provider: &str, status: reqwest::StatusCode, body: &str) -> Error {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        });

    match message {
        Some(msg) => Error::new(provider, msg),
        None => Error::new(provider, format!("HTTP {}: {}", status, body)),
    }
}

/// Execute a chat request with the specified provider
pub async fn chat(
    provider: Provider,
    config: ProviderConfig,
    context: Context,
) -> Result<Response, Error> {
    match provider {
        Provider::OpenAI => openai::chat(config, context).await,
        // Groq and xAI speak the OpenAI protocol
        Provider::Groq => {
            let config = config.with_default_base_url("https://api.groq.com/openai/v1");
            openai::chat(config, context).await
        }
        Provider::XAI => {
            let config = config.with_default_base_url("https://api.x.ai/v1");
            openai::chat(config, context).await
        }
        Provider::Gemini => gemini::chat(config, context).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent(api_key: Option<&str>, env: Option<&str>) -> AgentConfig {
        AgentConfig {
            provider: "openai".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key: api_key.map(str::to_string),
            api_key_env: env.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_inline_key_wins() {
        let config = ProviderConfig::from_agent_config(&agent(Some("k"), Some("UNUSED"))).unwrap();
        assert_eq!(config.api_key, "k");
        assert_eq!(config.default_model, "gpt-4o-mini");
    }

    #[test]
    fn test_no_key_configured() {
        let err = ProviderConfig::from_agent_config(&agent(None, None))
            .err()
            .unwrap();
        assert!(err.message.contains("No API key provided"));
    }

    #[test]
    fn test_endpoint_override_beats_default_base_url() {
        let mut cfg = agent(Some("k"), None);
        cfg.endpoint = Some("http://localhost:8080/v1".to_string());
        let config = ProviderConfig::from_agent_config(&cfg)
            .unwrap()
            .with_default_base_url("https://api.groq.com/openai/v1");
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:8080/v1"));
    }

    #[test]
    fn test_api_error_prefers_message() {
        let err = api_error(
            "openai",
            reqwest::StatusCode::UNAUTHORIZED,
            r#"{"error": {"message": "bad key"}}"#,
        );
        assert_eq!(err.message, "bad key");

        let err = api_error("openai", reqwest::StatusCode::BAD_GATEWAY, "<html>");
        assert!(err.message.starts_with("HTTP 502"));
    }
}

//! # LLM Client
//!
//! Provides the `Client` struct, which acts as the main entry point for LLM interactions.
//! It routes requests to the appropriate provider based on the agent configuration.

use crate::domain::config::AppConfig;
use crate::domain::traits::LlmProvider;
use crate::infrastructure::llm::providers;
use crate::infrastructure::llm::{Context, Error, Provider, Response};
use async_trait::async_trait;

/// Simple LLM client
pub struct Client {
    app_config: AppConfig,
}

impl Client {
    /// Create a new client from application configuration
    pub fn new(app_config: AppConfig) -> Self {
        Self { app_config }
    }

    /// Send a context to an agent
    ///
    /// # Arguments
    /// * `agent_name` - The agent name (e.g., "gemini", "fast")
    /// * `context` - Messages plus an optional temperature override
    pub async fn chat(&self, agent_name: &str, context: Context) -> Result<Response, Error> {
        let agent_config = self
            .app_config
            .agents
            .get(agent_name)
            .ok_or_else(|| Error::new(agent_name, "Agent not found"))?;

        let provider_type = Provider::from_str(&agent_config.provider)
            .ok_or_else(|| Error::new(&agent_config.provider, "Unknown provider"))?;

        let provider_config = providers::ProviderConfig::from_agent_config(agent_config)?;

        let context = match (context.temperature, agent_config.temperature) {
            (None, Some(temp)) => context.with_temperature(temp),
            _ => context,
        };

        tracing::debug!(
            "LLM request agent='{}' provider='{}' messages={}",
            agent_name,
            provider_type.as_str(),
            context.messages.len()
        );
        let response = providers::chat(provider_type, provider_config, context).await?;
        tracing::debug!(
            "LLM response model='{}' tokens={} (prompt {}, completion {})",
            response.model,
            response.usage.total_tokens,
            response.usage.prompt_tokens,
            response.usage.completion_tokens
        );
        Ok(response)
    }
}

#[async_trait]
impl LlmProvider for Client {
    async fn completion(
        &self,
        agent_name: &str,
        system: Option<&str>,
        prompt: &str,
    ) -> Result<String, String> {
        let mut context = Context::new();
        if let Some(system) = system {
            context = context.add_system_message(system);
        }
        context = context.add_user_message(prompt);

        self.chat(agent_name, context)
            .await
            .map(|r| r.content)
            .map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_str() {
        assert_eq!(Provider::from_str("openai"), Some(Provider::OpenAI));
        assert_eq!(Provider::from_str("Gemini"), Some(Provider::Gemini));
        assert_eq!(Provider::from_str("google"), Some(Provider::Gemini));
        assert_eq!(Provider::from_str("groq"), Some(Provider::Groq));
        assert_eq!(Provider::from_str("grok"), Some(Provider::XAI));
        assert_eq!(Provider::from_str("unknown"), None);
    }

    #[test]
    fn test_provider_as_str() {
        assert_eq!(Provider::OpenAI.as_str(), "openai");
        assert_eq!(Provider::Gemini.as_str(), "gemini");
        assert_eq!(Provider::Groq.as_str(), "groq");
        assert_eq!(Provider::XAI.as_str(), "xai");
    }

    #[tokio::test]
    async fn test_unknown_agent_is_an_error() {
        let client = Client::new(AppConfig::default());
        let err = client
            .completion("nobody", None, "hello")
            .await
            .unwrap_err();
        assert!(err.contains("Agent not found"));
    }

    #[tokio::test]
    async fn test_missing_api_key_is_an_error() {
        let yaml = "agents:\n  local:\n    provider: openai\n    model: x\n    api_key_env: INTENT_SHELL_TEST_KEY_THAT_IS_NOT_SET\n";
        let client = Client::new(AppConfig::from_yaml(yaml).unwrap());
        let err = client.completion("local", None, "hi").await.unwrap_err();
        assert!(err.contains("INTENT_SHELL_TEST_KEY_THAT_IS_NOT_SET"));
    }
}

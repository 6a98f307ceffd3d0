//! # Domain Traits
//!
//! Abstract interface for the language-model backends used by the
//! interpreter and the code rewriter. Implemented in the Infrastructure layer
//! and faked in tests.

use async_trait::async_trait;

/// Abstract interface for an LLM Provider
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a completion from the named agent.
    ///
    /// `system` carries standing instructions (schema description, rewrite
    /// rules) when the caller has any; `prompt` is the user turn.
    async fn completion(
        &self,
        agent_name: &str,
        system: Option<&str>,
        prompt: &str,
    ) -> Result<String, String>;
}

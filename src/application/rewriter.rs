//! # Code Rewriter
//!
//! Asks the rewrite agent for a behavior-preserving refactor of a whole file
//! and returns the new content, unwrapped from its code fence.

use std::sync::Arc;

use crate::application::parsing::extract_code_block;
use crate::domain::errors::{CommandError, Result};
use crate::domain::traits::LlmProvider;
use crate::strings::prompts;

pub struct Rewriter {
    llm: Arc<dyn LlmProvider>,
    agent: String,
}

impl Rewriter {
    pub fn new(llm: Arc<dyn LlmProvider>, agent: impl Into<String>) -> Self {
        Self {
            llm,
            agent: agent.into(),
        }
    }

    pub async fn rewrite(&self, filename: &str, source: &str) -> Result<String> {
        let prompt = prompts::refactor_prompt(filename, source);
        let raw = self
            .llm
            .completion(&self.agent, None, &prompt)
            .await
            .map_err(CommandError::Backend)?;

        let code = extract_code_block(&raw);
        // An empty answer would silently wipe the file.
        if code.trim().is_empty() {
            return Err(CommandError::Backend(
                "rewrite backend returned no code".to_string(),
            ));
        }
        if code.contains("```") {
            return Err(CommandError::Backend(
                "rewrite backend returned an unterminated code block".to_string(),
            ));
        }

        let mut code = code.to_string();
        if !code.ends_with('\n') {
            code.push('\n');
        }
        Ok(code)
    }
}

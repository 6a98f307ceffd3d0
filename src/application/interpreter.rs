//! # Interpreter Gateway
//!
//! Sends the user's text, with the schema description as system instruction,
//! to the interpretation agent and decodes the reply. One call per request,
//! no retries; every failure comes back as `StructuredCommand::ParseError`.

use std::sync::Arc;

use crate::application::parsing::parse_command;
use crate::domain::allow_list::AllowList;
use crate::domain::traits::LlmProvider;
use crate::domain::types::StructuredCommand;
use crate::strings::prompts;

pub struct Interpreter {
    llm: Arc<dyn LlmProvider>,
    agent: String,
    system_prompt: String,
}

impl Interpreter {
    pub fn new(llm: Arc<dyn LlmProvider>, agent: impl Into<String>, allow_list: &AllowList) -> Self {
        Self {
            llm,
            agent: agent.into(),
            system_prompt: prompts::interpreter_prompt(allow_list.iter()),
        }
    }

    pub async fn interpret(&self, text: &str) -> StructuredCommand {
        match self
            .llm
            .completion(&self.agent, Some(&self.system_prompt), text)
            .await
        {
            Ok(raw) => {
                tracing::debug!("Interpreter raw response: {}", raw);
                parse_command(&raw)
            }
            Err(e) => {
                tracing::error!("Interpretation backend failed: {}", e);
                StructuredCommand::parse_error(format!("AI Error: {e}"))
            }
        }
    }
}

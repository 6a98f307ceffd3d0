//! # Application Layer
//!
//! The command pipeline: interpretation, validation, execution and transcript rendering.

pub mod executors;
pub mod interpreter;
pub mod parsing;
pub mod pipeline;
pub mod rewriter;
pub mod transcript;
pub mod validator;

#[cfg(test)]
pub(crate) mod test_support {
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use crate::domain::traits::LlmProvider;

    #[derive(Debug, Clone)]
    pub struct Call {
        pub agent: String,
        pub system: Option<String>,
        pub prompt: String,
    }

    /// Replays canned replies in order and records every call.
    #[derive(Default)]
    pub struct FakeLlm {
        replies: Mutex<VecDeque<Result<String, String>>>,
        calls: Mutex<Vec<Call>>,
    }

    impl FakeLlm {
        pub fn replying(replies: impl IntoIterator<Item = Result<String, String>>) -> Self {
            Self {
                replies: Mutex::new(replies.into_iter().collect()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LlmProvider for FakeLlm {
        async fn completion(
            &self,
            agent_name: &str,
            system: Option<&str>,
            prompt: &str,
        ) -> Result<String, String> {
            self.calls.lock().unwrap().push(Call {
                agent: agent_name.to_string(),
                system: system.map(str::to_string),
                prompt: prompt.to_string(),
            });
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err("no reply scripted".to_string()))
        }
    }
}

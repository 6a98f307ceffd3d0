//! # Pipeline
//!
//! The single entry point used by every shell: interpret, validate, execute,
//! format. Holds only read-only state, so one `Pipeline` can serve many
//! concurrent requests behind an `Arc`.

use std::sync::Arc;

use crate::application::executors::CommandExecutor;
use crate::application::interpreter::Interpreter;
use crate::application::rewriter::Rewriter;
use crate::application::transcript::{self, Outcome};
use crate::application::validator::{self, ValidatedCommand};
use crate::domain::allow_list::AllowList;
use crate::domain::config::AppConfig;
use crate::domain::traits::LlmProvider;
use crate::infrastructure::tools::executor::ToolExecutor;
use crate::strings::{logs, messages};

pub struct Pipeline {
    interpreter: Interpreter,
    executor: CommandExecutor,
    allow_list: AllowList,
}

impl Pipeline {
    pub fn new(config: &AppConfig, llm: Arc<dyn LlmProvider>, tools: ToolExecutor) -> Self {
        let allow_list = config.allow_list();
        Self {
            interpreter: Interpreter::new(llm.clone(), &config.pipeline.interpreter, &allow_list),
            executor: CommandExecutor::new(tools, Rewriter::new(llm, &config.pipeline.rewriter)),
            allow_list,
        }
    }

    /// Interpret and validate; `Err` is already a terminal outcome.
    async fn prepare(&self, text: &str) -> Result<(String, ValidatedCommand), Outcome> {
        tracing::info!("{}", logs::request_received(text));
        let cmd = self.interpreter.interpret(text).await;
        let summary = cmd.to_string();
        tracing::info!(intent = ?cmd.intent(), "{}", logs::interpreted(&summary));

        match validator::validate(cmd, &self.allow_list) {
            Ok(valid) => Ok((summary, valid)),
            Err(error) => {
                tracing::warn!(field = ?error.field(), "{}", logs::rejected(&error.to_string()));
                Err(Outcome::rejected(summary, error))
            }
        }
    }

    pub async fn run(&self, text: &str) -> Outcome {
        match self.prepare(text).await {
            Ok((summary, valid)) => {
                let report = self.executor.execute(valid).await;
                Outcome::from_report(summary, report)
            }
            Err(outcome) => outcome,
        }
    }

    /// Caller interface: always returns a transcript.
    pub async fn process(&self, text: &str) -> String {
        transcript::render(&self.run(text).await)
    }

    /// Interpret and validate only; nothing touches the host.
    pub async fn preview(&self, text: &str) -> String {
        match self.prepare(text).await {
            Ok((summary, _)) => {
                format!("{}\n{}", messages::dry_run(&summary), messages::DRY_RUN_NOTE)
            }
            Err(outcome) => transcript::render(&outcome),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::FakeLlm;

    fn pipeline(dir: &std::path::Path, llm: Arc<FakeLlm>) -> Pipeline {
        let config = AppConfig::from_yaml(
            "pipeline:\n  interpreter: parser\n  rewriter: coder\ncommands:\n  allowed: [git]\n",
        )
        .unwrap();
        Pipeline::new(&config, llm, ToolExecutor::new().with_workdir(dir))
    }

    #[tokio::test]
    async fn test_create_file_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let llm = Arc::new(FakeLlm::replying([Ok(
            "```json\n{\"intent\": \"create_file\", \"filename\": \"a.txt\", \"content\": \"\"}\n```"
                .to_string(),
        )]));
        let pipeline = pipeline(dir.path(), llm.clone());

        let text = pipeline.process("create an empty file a.txt").await;

        assert!(dir.path().join("a.txt").is_file());
        assert!(text.starts_with("🤖 Understood: create_file 'a.txt'"));
        assert!(text.contains("Created empty file 'a.txt'"));
        assert!(text.ends_with(messages::TASK_COMPLETED));
        assert_eq!(llm.calls()[0].agent, "parser");
    }

    #[tokio::test]
    async fn test_disallowed_tool_never_runs() {
        let dir = tempfile::tempdir().unwrap();
        let llm = Arc::new(FakeLlm::replying([Ok(
            r#"{"command": "touch", "args": ["pwned"]}"#.to_string(),
        )]));
        let pipeline = pipeline(dir.path(), llm);

        let outcome = pipeline.run("touch pwned").await;

        assert!(matches!(
            &outcome,
            Outcome::ValidationFailure { error, .. } if error.reason() == "tool not allowed"
        ));
        assert!(!dir.path().join("pwned").exists());
    }

    #[tokio::test]
    async fn test_backend_failure_yields_parse_failure() {
        let dir = tempfile::tempdir().unwrap();
        let llm = Arc::new(FakeLlm::replying([Err("connection refused".to_string())]));
        let pipeline = pipeline(dir.path(), llm);

        let text = pipeline.process("list files").await;
        assert!(text.contains("❌ ParseError: AI Error: connection refused"));
        assert!(text.ends_with(messages::NOTHING_EXECUTED));
    }

    #[tokio::test]
    async fn test_refactor_missing_file_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let llm = Arc::new(FakeLlm::replying([Ok(
            r#"{"intent": "refactor_code", "filename": "missing.py"}"#.to_string(),
        )]));
        let pipeline = pipeline(dir.path(), llm.clone());

        let outcome = pipeline.run("refactor missing.py").await;
        assert!(matches!(outcome, Outcome::ExecutionFailure { .. }));
        assert!(transcript::render(&outcome).contains("NotFoundError"));
        assert!(!dir.path().join("missing.py").exists());
        assert_eq!(llm.calls().len(), 1, "rewrite backend not called");
    }

    #[tokio::test]
    async fn test_preview_does_not_execute() {
        let dir = tempfile::tempdir().unwrap();
        let llm = Arc::new(FakeLlm::replying([Ok(
            r#"{"intent": "create_directory", "dirname": "out"}"#.to_string(),
        )]));
        let pipeline = pipeline(dir.path(), llm);

        let text = pipeline.preview("make out").await;
        assert!(text.contains("would execute create_directory 'out'"));
        assert!(!dir.path().join("out").exists());
    }

    #[tokio::test]
    async fn test_concurrent_requests_share_one_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let llm = Arc::new(FakeLlm::replying([
            Ok(r#"{"intent": "create_directory", "dirname": "one"}"#.to_string()),
            Ok(r#"{"intent": "create_directory", "dirname": "two"}"#.to_string()),
        ]));
        let pipeline = Arc::new(pipeline(dir.path(), llm));

        let a = tokio::spawn({
            let p = pipeline.clone();
            async move { p.run("first").await.is_success() }
        });
        let b = tokio::spawn({
            let p = pipeline.clone();
            async move { p.run("second").await.is_success() }
        });

        assert!(a.await.unwrap());
        assert!(b.await.unwrap());
        assert!(dir.path().join("one").is_dir());
        assert!(dir.path().join("two").is_dir());
    }
}

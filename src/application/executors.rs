//! # Executors
//!
//! One procedure per validated intent. Each performs its side effect through
//! the [`ToolExecutor`] and records what happened in an [`ExecutionReport`];
//! failures end up in the report, never as a returned error.

use crate::application::rewriter::Rewriter;
use crate::application::validator::ValidatedCommand;
use crate::domain::allow_list::AllowedTool;
use crate::domain::errors::Result;
use crate::domain::types::{ExecutionReport, Stream};
use crate::infrastructure::tools::executor::{ProcessOutput, ToolExecutor};
use crate::strings::{logs, messages};

pub struct CommandExecutor {
    tools: ToolExecutor,
    rewriter: Rewriter,
}

impl CommandExecutor {
    pub fn new(tools: ToolExecutor, rewriter: Rewriter) -> Self {
        Self { tools, rewriter }
    }

    pub async fn execute(&self, cmd: ValidatedCommand) -> ExecutionReport {
        let mut report = ExecutionReport::new();
        let result = match cmd {
            ValidatedCommand::ListFiles { detailed } => self.list_files(detailed, &mut report).await,
            ValidatedCommand::CreateFile { filename, content } => {
                self.create_file(&filename, &content, &mut report).await
            }
            ValidatedCommand::CreateDirectory { dirname } => {
                self.create_directory(&dirname, &mut report).await
            }
            ValidatedCommand::RefactorCode { filename } => {
                self.refactor_code(&filename, &mut report).await
            }
            ValidatedCommand::ExternalTool { tool, args } => {
                self.external_tool(&tool, &args, &mut report).await
            }
        };

        if let Err(e) = result {
            tracing::error!("Execution failed: {}", e);
            report.fail(&e);
        }
        report
    }

    async fn list_files(&self, detailed: bool, report: &mut ExecutionReport) -> Result<()> {
        let output = self.tools.list_files(detailed).await?;
        record_process(report, &output);
        Ok(())
    }

    async fn create_file(
        &self,
        filename: &str,
        content: &str,
        report: &mut ExecutionReport,
    ) -> Result<()> {
        self.tools.write_file(filename, content).await?;
        report.success(messages::file_created(filename, content.is_empty()));
        Ok(())
    }

    async fn create_directory(&self, dirname: &str, report: &mut ExecutionReport) -> Result<()> {
        self.tools.create_dir_all(dirname).await?;
        report.success(messages::directory_created(dirname));
        Ok(())
    }

    /// Read, rewrite remotely, then overwrite in place. No backup, no diff.
    async fn refactor_code(&self, filename: &str, report: &mut ExecutionReport) -> Result<()> {
        report.step(messages::refactor_started(filename));
        let original = self.tools.read_file(filename).await?;
        report.step(messages::original_read(original.len()));

        let rewritten = self.rewriter.rewrite(filename, &original).await?;
        report.step(messages::REWRITE_RECEIVED);

        tracing::warn!(
            "{}",
            logs::overwrite_warning(filename, original.len(), rewritten.len())
        );
        self.tools.write_file(filename, &rewritten).await?;
        report.success(messages::refactor_done(filename));
        Ok(())
    }

    async fn external_tool(
        &self,
        tool: &AllowedTool,
        args: &[String],
        report: &mut ExecutionReport,
    ) -> Result<()> {
        let output = self.tools.run_tool(tool, args).await?;
        record_process(report, &output);
        Ok(())
    }
}

/// Both streams are kept whatever the exit status; a non-zero exit is noted, not failed.
fn record_process(report: &mut ExecutionReport, output: &ProcessOutput) {
    report.step(messages::executing(&output.command_line));
    report.output(Stream::Stdout, output.stdout.clone());
    report.output(Stream::Stderr, output.stderr.clone());
    if !output.success() {
        report.step(messages::exit_status(&output.status.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::FakeLlm;
    use crate::domain::allow_list::AllowList;
    use crate::domain::types::ReportLine;
    use std::sync::Arc;

    fn executor(dir: &std::path::Path, llm: Arc<FakeLlm>) -> CommandExecutor {
        CommandExecutor::new(
            ToolExecutor::new().with_workdir(dir),
            Rewriter::new(llm, "coder"),
        )
    }

    fn failure_kinds(report: &ExecutionReport) -> Vec<&'static str> {
        report
            .lines()
            .iter()
            .filter_map(|line| match line {
                ReportLine::Failure { kind, .. } => Some(*kind),
                _ => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_create_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let exec = executor(dir.path(), Arc::new(FakeLlm::default()));

        let report = exec
            .execute(ValidatedCommand::CreateFile {
                filename: "a.txt".into(),
                content: String::new(),
            })
            .await;

        let path = dir.path().join("a.txt");
        assert!(path.is_file());
        assert_eq!(std::fs::read_to_string(path).unwrap(), "");
        assert_eq!(
            report.lines(),
            &[ReportLine::Success("Created empty file 'a.txt'".into())]
        );
    }

    #[tokio::test]
    async fn test_create_file_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "old").unwrap();
        let exec = executor(dir.path(), Arc::new(FakeLlm::default()));

        let report = exec
            .execute(ValidatedCommand::CreateFile {
                filename: "a.txt".into(),
                content: "print('hi')\n".into(),
            })
            .await;

        assert_eq!(
            std::fs::read_to_string(dir.path().join("a.txt")).unwrap(),
            "print('hi')\n"
        );
        assert!(matches!(&report.lines()[0], ReportLine::Success(msg) if msg.contains("with content")));
    }

    #[tokio::test]
    async fn test_create_file_in_missing_directory_reports_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let exec = executor(dir.path(), Arc::new(FakeLlm::default()));

        let report = exec
            .execute(ValidatedCommand::CreateFile {
                filename: "nope/a.txt".into(),
                content: String::new(),
            })
            .await;
        assert_eq!(failure_kinds(&report), vec!["IOError"]);
    }

    #[tokio::test]
    async fn test_create_nested_directory_twice() {
        let dir = tempfile::tempdir().unwrap();
        let exec = executor(dir.path(), Arc::new(FakeLlm::default()));
        let cmd = ValidatedCommand::CreateDirectory {
            dirname: "d/e/f".into(),
        };

        let first = exec.execute(cmd.clone()).await;
        let second = exec.execute(cmd).await;

        assert!(dir.path().join("d/e/f").is_dir());
        assert!(!first.has_failure());
        assert!(!second.has_failure());
    }

    #[tokio::test]
    async fn test_refactor_missing_file_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let llm = Arc::new(FakeLlm::default());
        let exec = executor(dir.path(), llm.clone());

        let report = exec
            .execute(ValidatedCommand::RefactorCode {
                filename: "missing.py".into(),
            })
            .await;

        assert_eq!(failure_kinds(&report), vec!["NotFoundError"]);
        assert!(!dir.path().join("missing.py").exists());
        assert!(llm.calls().is_empty());
    }

    #[tokio::test]
    async fn test_refactor_overwrites_with_rewrite() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("utils.py"), "def f(x):return x*2\n").unwrap();
        let llm = Arc::new(FakeLlm::replying([Ok(
            "```python\ndef f(x):\n    return x * 2\n```".to_string(),
        )]));
        let exec = executor(dir.path(), llm.clone());

        let report = exec
            .execute(ValidatedCommand::RefactorCode {
                filename: "utils.py".into(),
            })
            .await;

        assert!(!report.has_failure());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("utils.py")).unwrap(),
            "def f(x):\n    return x * 2\n"
        );
        assert!(llm.calls()[0].prompt.contains("def f(x):return x*2"));
        assert!(matches!(report.lines().last(), Some(ReportLine::Success(_))));
    }

    #[tokio::test]
    async fn test_refactor_backend_failure_keeps_original() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("utils.py"), "x = 1\n").unwrap();
        let llm = Arc::new(FakeLlm::replying([Err("quota exceeded".to_string())]));
        let exec = executor(dir.path(), llm);

        let report = exec
            .execute(ValidatedCommand::RefactorCode {
                filename: "utils.py".into(),
            })
            .await;

        assert_eq!(failure_kinds(&report), vec!["BackendError"]);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("utils.py")).unwrap(),
            "x = 1\n"
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_external_tool_non_zero_exit_is_not_a_failure() {
        let dir = tempfile::tempdir().unwrap();
        let exec = executor(dir.path(), Arc::new(FakeLlm::default()));
        let tool = AllowList::new(["ls"]).authorize("ls").unwrap();

        let report = exec
            .execute(ValidatedCommand::ExternalTool {
                tool,
                args: vec!["no-such-entry".into()],
            })
            .await;

        assert!(!report.has_failure());
        let lines = report.lines();
        assert_eq!(lines[0], ReportLine::Step("Executing: `ls no-such-entry`".into()));
        assert!(matches!(
            &lines[1],
            ReportLine::Output { stream: Stream::Stderr, text } if text.contains("no-such-entry")
        ));
        assert!(matches!(&lines[2], ReportLine::Step(s) if s.starts_with("Process exited with")));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_external_tool_passes_args_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let exec = executor(dir.path(), Arc::new(FakeLlm::default()));
        let tool = AllowList::new(["echo"]).authorize("echo").unwrap();

        let report = exec
            .execute(ValidatedCommand::ExternalTool {
                tool,
                args: vec!["a b".into(), "$HOME;".into()],
            })
            .await;

        assert_eq!(
            report.lines()[1],
            ReportLine::Output {
                stream: Stream::Stdout,
                text: "a b $HOME;\n".into()
            }
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_listing_detail_changes_output() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), "x").unwrap();
        let exec = executor(dir.path(), Arc::new(FakeLlm::default()));

        let short = exec.execute(ValidatedCommand::ListFiles { detailed: false }).await;
        let long = exec.execute(ValidatedCommand::ListFiles { detailed: true }).await;

        assert_ne!(short, long);
        assert_eq!(short.lines()[0], ReportLine::Step("Executing: `ls -a`".into()));
        assert_eq!(long.lines()[0], ReportLine::Step("Executing: `ls -l`".into()));
    }
}

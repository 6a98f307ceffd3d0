//! # Domain Types
//!
//! Values passed between pipeline stages: the structured command produced by
//! the interpreter and the report produced by an executor.

use std::fmt;

use crate::domain::errors::CommandError;
use crate::domain::schema::Intent;

/// Normalized form of one user request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuredCommand {
    ListFiles { detailed: bool },
    CreateFile { filename: String, content: String },
    CreateDirectory { dirname: String },
    RefactorCode { filename: String },
    ExternalTool { name: String, args: Vec<String> },
    ParseError { message: String },
}

impl StructuredCommand {
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
        }
    }

    /// The schema intent, `None` for a parse failure.
    pub fn intent(&self) -> Option<Intent> {
        match self {
            StructuredCommand::ListFiles { .. } => Some(Intent::ListFiles),
            StructuredCommand::CreateFile { .. } => Some(Intent::CreateFile),
            StructuredCommand::CreateDirectory { .. } => Some(Intent::CreateDirectory),
            StructuredCommand::RefactorCode { .. } => Some(Intent::RefactorCode),
            StructuredCommand::ExternalTool { .. } => Some(Intent::ExternalTool),
            StructuredCommand::ParseError { .. } => None,
        }
    }
}

impl fmt::Display for StructuredCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructuredCommand::ListFiles { detailed } => {
                let form = if *detailed { "detailed" } else { "short" };
                write!(f, "list_files ({form})")
            }
            StructuredCommand::CreateFile { filename, content } => {
                write!(f, "create_file '{filename}' ({} bytes)", content.len())
            }
            StructuredCommand::CreateDirectory { dirname } => {
                write!(f, "create_directory '{dirname}'")
            }
            StructuredCommand::RefactorCode { filename } => write!(f, "refactor_code '{filename}'"),
            StructuredCommand::ExternalTool { name, args } => {
                write!(f, "external_tool `{}`", command_line(name, args))
            }
            StructuredCommand::ParseError { message } => write!(f, "parse_error ({message})"),
        }
    }
}

/// Space-joined program and arguments, for display only.
pub fn command_line(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// One entry of an executor's report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportLine {
    Step(String),
    Success(String),
    Output { stream: Stream, text: String },
    Failure { kind: &'static str, message: String },
}

/// Ordered, append-only account of a single execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionReport {
    lines: Vec<ReportLine>,
}

impl ExecutionReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&mut self, text: impl Into<String>) {
        self.lines.push(ReportLine::Step(text.into()));
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.lines.push(ReportLine::Success(text.into()));
    }

    /// Records captured process output; empty streams are skipped.
    pub fn output(&mut self, stream: Stream, text: impl Into<String>) {
        let text = text.into();
        if !text.is_empty() {
            self.lines.push(ReportLine::Output { stream, text });
        }
    }

    pub fn fail(&mut self, error: &CommandError) {
        self.lines.push(ReportLine::Failure {
            kind: error.kind(),
            message: error.to_string(),
        });
    }

    pub fn lines(&self) -> &[ReportLine] {
        &self.lines
    }

    pub fn has_failure(&self) -> bool {
        self.lines
            .iter()
            .any(|line| matches!(line, ReportLine::Failure { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_preserves_order_and_skips_empty_output() {
        let mut report = ExecutionReport::new();
        report.step("Executing `ls -a`");
        report.output(Stream::Stdout, "");
        report.output(Stream::Stderr, "oops");
        report.success("done");

        assert_eq!(
            report.lines(),
            &[
                ReportLine::Step("Executing `ls -a`".to_string()),
                ReportLine::Output {
                    stream: Stream::Stderr,
                    text: "oops".to_string()
                },
                ReportLine::Success("done".to_string()),
            ]
        );
        assert!(!report.has_failure());
    }

    #[test]
    fn test_report_failure_is_tagged() {
        let mut report = ExecutionReport::new();
        report.fail(&CommandError::NotFound {
            path: "missing.py".to_string(),
        });
        assert!(report.has_failure());
        assert!(matches!(
            &report.lines()[0],
            ReportLine::Failure { kind: "NotFoundError", message } if message.contains("missing.py")
        ));
    }

    #[test]
    fn test_command_display() {
        let cmd = StructuredCommand::ExternalTool {
            name: "git".into(),
            args: vec!["status".into(), "-s".into()],
        };
        assert_eq!(cmd.to_string(), "external_tool `git status -s`");
        assert_eq!(cmd.intent(), Some(Intent::ExternalTool));
        assert_eq!(StructuredCommand::parse_error("x").intent(), None);
    }
}

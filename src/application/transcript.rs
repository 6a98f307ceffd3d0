//! # Transcript Formatter
//!
//! Renders the terminal state of a request as one block of text:
//! acknowledgement, failure (if any), executor lines in their original
//! order, completion marker.

use crate::domain::errors::{CommandError, ValidationError};
use crate::domain::types::{ExecutionReport, ReportLine, Stream};
use crate::strings::messages;

/// Terminal state of one pipeline run.
#[derive(Debug)]
pub enum Outcome {
    Success {
        summary: String,
        report: ExecutionReport,
    },
    ParseFailure {
        message: String,
    },
    ValidationFailure {
        summary: String,
        error: ValidationError,
    },
    ExecutionFailure {
        summary: String,
        report: ExecutionReport,
    },
}

impl Outcome {
    pub fn from_report(summary: String, report: ExecutionReport) -> Self {
        if report.has_failure() {
            Outcome::ExecutionFailure { summary, report }
        } else {
            Outcome::Success { summary, report }
        }
    }

    /// A validator rejection, with parse failures split out.
    pub fn rejected(summary: String, error: ValidationError) -> Self {
        match error {
            ValidationError::Unparsed { message } => Outcome::ParseFailure { message },
            error => Outcome::ValidationFailure { summary, error },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }
}

fn render_line(line: &ReportLine) -> String {
    match line {
        ReportLine::Step(text) => format!("{} {}", messages::STEP_MARK, text),
        ReportLine::Success(text) => format!("{} {}", messages::SUCCESS_MARK, text),
        ReportLine::Output { stream, text } => {
            let header = match stream {
                Stream::Stdout => messages::STDOUT_HEADER,
                Stream::Stderr => messages::STDERR_HEADER,
            };
            format!("{}\n{}", header, text.trim_end())
        }
        ReportLine::Failure { kind, message } => messages::failure_line(kind, message),
    }
}

pub fn render(outcome: &Outcome) -> String {
    let mut out: Vec<String> = Vec::new();

    match outcome {
        Outcome::ParseFailure { message } => {
            let error = CommandError::Parse(message.clone());
            out.push(messages::NOT_UNDERSTOOD.to_string());
            out.push(messages::failure_line(error.kind(), &error.to_string()));
            out.push(messages::NOTHING_EXECUTED.to_string());
        }
        Outcome::ValidationFailure { summary, error } => {
            let error = CommandError::Validation(error.clone());
            out.push(messages::acknowledged(summary));
            out.push(messages::failure_line(error.kind(), &error.to_string()));
            out.push(messages::NOTHING_EXECUTED.to_string());
        }
        Outcome::Success { summary, report } | Outcome::ExecutionFailure { summary, report } => {
            out.push(messages::acknowledged(summary));
            out.extend(report.lines().iter().map(render_line));
            out.push(
                if outcome.is_success() {
                    messages::TASK_COMPLETED
                } else {
                    messages::TASK_FAILED
                }
                .to_string(),
            );
        }
    }

    out.join("\n")
}

//! # Parsing Utils
//!
//! Turns raw backend text into values: strips a wrapping code fence and
//! decodes the interpreter's JSON into a [`StructuredCommand`]. Anything that
//! does not decode cleanly becomes `StructuredCommand::ParseError`.

use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

use crate::domain::schema::{Intent, WIRE_KEYS};
use crate::domain::types::StructuredCommand;

fn fence_regex() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| {
        // ```lang\n<body>\n```  with the whole input being the block
        Regex::new(r"(?s)\A```[A-Za-z0-9_+.\-]*[ \t]*\r?\n?(.*?)\r?\n?```\z")
            .expect("fence regex is valid")
    })
}

fn embedded_fence_regex() -> &'static Regex {
    static EMBEDDED: OnceLock<Regex> = OnceLock::new();
    EMBEDDED.get_or_init(|| {
        Regex::new(r"(?s)```[A-Za-z0-9_+.\-]*[ \t]*\r?\n(.*?)\r?\n?```")
            .expect("embedded fence regex is valid")
    })
}

/// Body of the first fenced block anywhere in `raw`, ignoring prose around it.
/// Falls back to [`strip_code_fence`] when there is no complete block.
pub fn extract_code_block(raw: &str) -> &str {
    embedded_fence_regex()
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|body| body.as_str())
        .unwrap_or_else(|| strip_code_fence(raw))
}

/// Returns the body of a fenced block, or the trimmed input when it is not fenced.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    fence_regex()
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map(|body| body.as_str())
        .unwrap_or(trimmed)
}

/// Wire shape of the interpreter's answer. Unknown keys are ignored.
#[derive(Debug, Deserialize)]
struct WireCommand {
    intent: Option<String>,
    detail: Option<bool>,
    dirname: Option<String>,
    filename: Option<String>,
    content: Option<String>,
    command: Option<String>,
    args: Option<Vec<String>>,
    error: Option<String>,
}

impl WireCommand {
    fn into_command(self) -> StructuredCommand {
        if let Some(message) = self.error {
            return StructuredCommand::ParseError { message };
        }

        let intent = match self.intent.as_deref() {
            Some(name) => match Intent::from_str(name) {
                Some(intent) => intent,
                None => {
                    return StructuredCommand::parse_error(format!("Unrecognized intent '{name}'"));
                }
            },
            None if self.command.is_some() => Intent::ExternalTool,
            None => {
                return StructuredCommand::parse_error(
                    "Response has neither an `intent` nor a `command`",
                );
            }
        };

        // Missing strings decode as empty so the validator can name the field.
        match intent {
            Intent::ListFiles => StructuredCommand::ListFiles {
                detailed: self.detail.unwrap_or(false),
            },
            Intent::CreateFile => StructuredCommand::CreateFile {
                filename: self.filename.unwrap_or_default(),
                content: self.content.unwrap_or_default(),
            },
            Intent::CreateDirectory => StructuredCommand::CreateDirectory {
                dirname: self.dirname.unwrap_or_default(),
            },
            Intent::RefactorCode => StructuredCommand::RefactorCode {
                filename: self.filename.unwrap_or_default(),
            },
            Intent::ExternalTool => StructuredCommand::ExternalTool {
                name: self.command.unwrap_or_default(),
                args: self.args.unwrap_or_default(),
            },
        }
    }
}

/// Decodes an interpreter response into a command, never failing.
pub fn parse_command(raw: &str) -> StructuredCommand {
    let payload = strip_code_fence(raw);
    if payload.is_empty() {
        return StructuredCommand::parse_error("AI returned an empty response");
    }

    let value: serde_json::Value = match serde_json::from_str(payload) {
        Ok(value) => value,
        Err(e) => {
            return StructuredCommand::parse_error(format!("JSON Parsing Failed: {e}"));
        }
    };

    let Some(object) = value.as_object() else {
        return StructuredCommand::parse_error("JSON Parsing Failed: expected an object");
    };
    for key in object.keys().filter(|k| !WIRE_KEYS.contains(&k.as_str())) {
        tracing::debug!("Ignoring unknown key `{}` in interpreter response", key);
    }

    match serde_json::from_value::<WireCommand>(value) {
        Ok(wire) => wire.into_command(),
        Err(e) => StructuredCommand::parse_error(format!("JSON Parsing Failed: {e}")),
    }
}

//! # Command Validator
//!
//! Pure check between interpretation and execution. Backend output is
//! untrusted until it passes here; the result is a [`ValidatedCommand`],
//! the only type the executors accept.

use crate::domain::allow_list::{AllowList, AllowedTool};
use crate::domain::errors::ValidationError;
use crate::domain::types::StructuredCommand;

/// A command whose required fields are present and whose tool is allow-listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedCommand {
    ListFiles { detailed: bool },
    CreateFile { filename: String, content: String },
    CreateDirectory { dirname: String },
    RefactorCode { filename: String },
    ExternalTool { tool: AllowedTool, args: Vec<String> },
}

pub const TOOL_NOT_ALLOWED: &str = "tool not allowed";

fn required(field: &'static str, value: String) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::invalid(field, "is required"));
    }
    if value.contains('\0') {
        return Err(ValidationError::invalid(field, "contains a NUL byte"));
    }
    Ok(value)
}

pub fn validate(
    cmd: StructuredCommand,
    allow_list: &AllowList,
) -> Result<ValidatedCommand, ValidationError> {
    match cmd {
        StructuredCommand::ParseError { message } => Err(ValidationError::Unparsed { message }),
        StructuredCommand::ListFiles { detailed } => Ok(ValidatedCommand::ListFiles { detailed }),
        StructuredCommand::CreateFile { filename, content } => Ok(ValidatedCommand::CreateFile {
            filename: required("filename", filename)?,
            content,
        }),
        StructuredCommand::CreateDirectory { dirname } => Ok(ValidatedCommand::CreateDirectory {
            dirname: required("dirname", dirname)?,
        }),
        StructuredCommand::RefactorCode { filename } => Ok(ValidatedCommand::RefactorCode {
            filename: required("filename", filename)?,
        }),
        StructuredCommand::ExternalTool { name, args } => {
            let name = required("command", name)?;
            let tool = allow_list
                .authorize(&name)
                .ok_or_else(|| ValidationError::invalid("command", TOOL_NOT_ALLOWED))?;
            Ok(ValidatedCommand::ExternalTool { tool, args })
        }
    }
}

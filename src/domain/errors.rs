//! # Errors
//!
//! Failure taxonomy for a single request. Every variant is recovered inside
//! the pipeline and rendered as a tagged report line.

use thiserror::Error;

/// Why a structured command was rejected before execution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The interpreter never produced a usable command.
    #[error("{message}")]
    Unparsed { message: String },

    #[error("`{field}` {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ValidationError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }

    /// Offending wire key, if the failure is tied to one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::Unparsed { .. } => None,
            ValidationError::Invalid { field, .. } => Some(field),
        }
    }

    #[cfg(test)]
    pub fn reason(&self) -> &str {
        match self {
            ValidationError::Unparsed { message } => message,
            ValidationError::Invalid { reason, .. } => reason,
        }
    }
}

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("{0}")]
    Parse(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("'{path}' was not found")]
    NotFound { path: String },

    #[error("{action} '{path}' failed: {source}")]
    Io {
        action: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not start '{program}': {source}")]
    Process {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Backend(String),
}

impl CommandError {
    pub fn io(action: &'static str, path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Stable tag shown at the start of the failure line.
    pub fn kind(&self) -> &'static str {
        match self {
            CommandError::Parse(_) => "ParseError",
            CommandError::Validation(_) => "ValidationError",
            CommandError::NotFound { .. } => "NotFoundError",
            CommandError::Io { .. } => "IOError",
            CommandError::Process { .. } => "ProcessError",
            CommandError::Backend(_) => "BackendError",
        }
    }
}

pub type Result<T> = std::result::Result<T, CommandError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display_names_field() {
        let err = ValidationError::invalid("filename", "is required");
        assert_eq!(err.to_string(), "`filename` is required");
        assert_eq!(err.field(), Some("filename"));
        assert_eq!(err.reason(), "is required");
    }

    #[test]
    fn test_unparsed_carries_message_unchanged() {
        let err = ValidationError::Unparsed {
            message: "Command not supported.".to_string(),
        };
        assert_eq!(err.to_string(), "Command not supported.");
        assert_eq!(err.field(), None);
    }

    #[test]
    fn test_kind_tags() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(CommandError::io("writing", "a.txt", io).kind(), "IOError");
        assert_eq!(
            CommandError::NotFound { path: "x".into() }.kind(),
            "NotFoundError"
        );
        assert_eq!(CommandError::Backend("down".into()).kind(), "BackendError");
        assert_eq!(
            CommandError::from(ValidationError::invalid("command", "tool not allowed")).kind(),
            "ValidationError"
        );
    }
}

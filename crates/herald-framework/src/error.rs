//! Error types for the Herald framework.

use std::fmt;

use herald_core::SchemaError;
use thiserror::Error;

/// Why argument resolution rejected an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// A mention or id named a user, role or channel that does not exist.
    EntityNotFound,
    /// A choice-restricted slot received a value outside its choices.
    InvalidChoice,
    /// The token cannot fill the slot at the cursor.
    TypeMismatch,
    /// A token arrived after every slot was filled.
    TooManyArguments,
    /// The input ended before every required slot was filled.
    NotEnoughArguments,
    /// Parsing was attempted on an invocation that carries no text.
    NotMessageBased,
}

/// A rejected text invocation.
///
/// Carries the message shown to the user and the usage hint of the schema
/// that was active when parsing stopped. The rendered form is
/// `message\n\nusage`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    kind: ParseErrorKind,
    message: String,
    usage: String,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, message: impl Into<String>, usage: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            usage: usage.into(),
        }
    }

    pub(crate) fn not_message_based() -> Self {
        Self::new(
            ParseErrorKind::NotMessageBased,
            "Must be a message based command",
            String::new(),
        )
    }

    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.usage.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}\n\n{}", self.message, self.usage)
        }
    }
}

impl std::error::Error for ParseError {}

/// Result type for argument resolution.
pub type ParseResult<T> = Result<T, ParseError>;

/// Errors raised while registering commands and modules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("command '{0}' is already registered")]
    DuplicateCommand(String),

    #[error("module '{0}' is already registered")]
    DuplicateModule(String),

    #[error("command '{command}' has an invalid schema: {source}")]
    InvalidSchema {
        command: String,
        #[source]
        source: SchemaError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_usage() {
        let err = ParseError::new(
            ParseErrorKind::TooManyArguments,
            "Too many arguments",
            "!ping",
        );
        assert_eq!(err.to_string(), "Too many arguments\n\n!ping");
        assert_eq!(err.kind(), ParseErrorKind::TooManyArguments);
    }

    #[test]
    fn test_not_message_based_has_no_usage() {
        let err = ParseError::not_message_based();
        assert_eq!(err.to_string(), "Must be a message based command");
        assert!(err.usage().is_empty());
    }
}

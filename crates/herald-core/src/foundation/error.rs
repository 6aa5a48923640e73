//! Unified error types for the Herald core.
//!
//! Argument resolution errors live in `herald-framework`; this module only
//! holds errors that platform integrations and plain data checks produce.

use thiserror::Error;

use super::schema::OptionKind;

// =============================================================================
// Platform API Errors
// =============================================================================

/// Errors returned by platform calls (lookups, replies, publishing).
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The platform connection is not available.
    #[error("platform is not connected")]
    NotConnected,

    /// The call timed out.
    #[error("platform call timed out")]
    Timeout,

    /// The platform answered with an error.
    #[error("platform error ({code}): {message}")]
    Api {
        /// Platform-specific error code.
        code: i32,
        /// Error message from the platform.
        message: String,
    },

    /// Failed to serialize or deserialize a payload.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The transport rejected or lost the request.
    #[error("transport error: {0}")]
    Transport(String),

    /// The operation is not possible for this invocation (e.g. nothing to edit).
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl ApiError {
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type for platform calls.
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// Schema Errors
// =============================================================================

/// A command option schema that breaks the structural rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Sub-commands and plain options share the top level.
    #[error("schema mixes sub-commands with plain options")]
    MixedGroups,

    /// A sub-command contains another sub-command.
    #[error("sub-command '{0}' contains a nested sub-command")]
    NestedGroup(String),

    /// Two options in the same list share a name.
    #[error("duplicate option name '{0}'")]
    DuplicateName(String),

    /// Choices declared on an option that is not a string.
    #[error("option '{name}' declares choices but is of kind {kind}")]
    ChoicesOnNonString { name: String, kind: OptionKind },
}

// =============================================================================
// Option Access Errors
// =============================================================================

/// Errors from typed access to an [`OptionSet`](crate::OptionSet).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionError {
    #[error("option '{0}' was not provided")]
    Missing(String),

    #[error("option '{name}' is {got}, expected {expected}")]
    WrongKind {
        name: String,
        expected: OptionKind,
        got: OptionKind,
    },
}

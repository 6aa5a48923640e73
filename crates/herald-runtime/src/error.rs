//! Runtime error types.

use thiserror::Error;

use crate::config::ConfigError;
use herald_core::ApiError;
use herald_framework::RegistryError;

/// Errors that can occur during runtime operations.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Loading or validating the configuration failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A command or module could not be registered.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// A platform call made by the runtime failed.
    #[error("Platform error: {0}")]
    Platform(#[from] ApiError),

    /// The runtime was built without an entity resolver.
    #[error("No entity resolver configured")]
    MissingResolver,
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;

//! Command modules.
//!
//! A [`Module`] groups related commands. Registering a module registers all
//! of its commands under the module's name, and the runtime calls each
//! module's [`ready`](Module::ready) hook once the platform connection is up.

use std::sync::Arc;

use async_trait::async_trait;

use crate::command::Command;

/// A named group of commands.
///
/// # Example
///
/// ```rust,ignore
/// struct Moderation;
///
/// #[async_trait]
/// impl Module for Moderation {
///     fn name(&self) -> &str {
///         "moderation"
///     }
///
///     fn commands(&self) -> Vec<Command> {
///         vec![ban_command(), kick_command()]
///     }
/// }
/// ```
#[async_trait]
pub trait Module: Send + Sync + 'static {
    fn name(&self) -> &str;

    /// The module's commands. Called once, at registration.
    fn commands(&self) -> Vec<Command>;

    /// Runs after the platform is ready and commands are published.
    async fn ready(&self) {}
}

/// A shared, type-erased module.
pub type BoxedModule = Arc<dyn Module>;

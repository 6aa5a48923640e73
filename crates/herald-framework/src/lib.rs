//! # Herald Framework
//!
//! Command handling on top of [`herald_core`].
//!
//! ## Overview
//!
//! - [`command`]: command definitions and the text argument pipeline
//!   (tokenizer, mention grammar, resolution engine, usage hints)
//! - [`context`]: the [`Invocation`] handed to handlers, with one reply
//!   family for both interactions and messages
//! - [`module`] / [`registry`]: grouping and lookup of commands
//! - [`dispatcher`]: routes platform events to handlers and reports errors
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use herald_framework::prelude::*;
//!
//! let registry = Arc::new(CommandRegistry::new());
//! registry.register_command(
//!     Command::new("greet", "Say hello")
//!         .option(CommandOption::user("who", "Who to greet").required())
//!         .handler(|inv: Arc<Invocation>| async move {
//!             let who = inv.options().require_user("who")?;
//!             Ok::<_, BoxError>(format!("Hello, {}!", who.mention()))
//!         }),
//! )?;
//!
//! let dispatcher = Dispatcher::new(registry, resolver, DispatchSettings::default());
//! dispatcher.dispatch_message(message, transport, None).await;
//! ```

pub mod command;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod module;
pub mod registry;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use command::{
    ArgumentResolver, Command, CommandService, CommandSettings, DEFAULT_PREFIX, HandlerResponse,
    HandlerService, IntegerMode, Mention, format_usage, split_invocation, split_tokens,
};
pub use context::{
    DEFAULT_REPLY_TTL, InteractionOrigin, Invocation, MessageOrigin, Origin, REJECT_PREFIX,
};
pub use dispatcher::{DispatchOutcome, DispatchSettings, Dispatcher};
pub use error::{ParseError, ParseErrorKind, ParseResult, RegistryError};
pub use module::{BoxedModule, Module};
pub use registry::CommandRegistry;

/// Prelude for common imports.
pub mod prelude {
    pub use super::{
        Command, CommandRegistry, CommandSettings, DispatchOutcome, DispatchSettings, Dispatcher,
        IntegerMode, Invocation, Module, ParseError, ParseErrorKind,
    };
    pub use herald_core::prelude::*;
    pub use std::sync::Arc;
    pub use tower::BoxError;
}

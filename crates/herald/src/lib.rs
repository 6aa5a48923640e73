//! # Herald
//!
//! Command dispatch for chat bots. One command definition serves both
//! structured slash interactions and prefixed text messages:
//!
//! ```text
//! ┌──────────────┐     ┌────────────────────┐     ┌───────────┐
//! │   Platform   │────▶│     Dispatcher     │────▶│  Command  │
//! │  (events,    │     │ tokenize, resolve, │     │  handler  │
//! │  transports) │◀────│ report errors      │◀────│           │
//! └──────────────┘     └────────────────────┘     └───────────┘
//! ```
//!
//! - **Core**: entities, option schemas, resolved options, platform traits
//! - **Framework**: argument resolution engine, usage hints, the
//!   [`Invocation`](framework::Invocation) context, registry and dispatcher
//! - **Runtime**: configuration, logging and the [`HeraldRuntime`](runtime::HeraldRuntime)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use herald::prelude::*;
//!
//! let runtime = HeraldRuntime::builder()
//!     .resolver(platform.resolver())
//!     .command(
//!         Command::new("ban", "Ban a member")
//!             .option(CommandOption::user("user", "Who to ban").required())
//!             .option(CommandOption::string("reason", "Why").required())
//!             .public(false)
//!             .handler(|inv: Arc<Invocation>| async move {
//!                 let user = inv.options().require_user("user")?;
//!                 Ok::<_, BoxError>(format!("Banned {}", user.name))
//!             }),
//!     )
//!     .build()?;
//!
//! runtime.ready(platform.publisher()).await?;
//! runtime.handle_message(message, platform.message_transport(), None).await;
//! ```
//!
//! ## Features
//!
//! - `toml-config` *(default)*: `herald.toml` configuration files
//! - `yaml-config`: `herald.yaml` configuration files
//! - `json-log`: JSON log output
//! - `testing`: in-memory resolver, transports and publisher

pub use herald_core as core;
pub use herald_framework as framework;
pub use herald_runtime as runtime;

/// Everything needed to define commands and run them.
pub mod prelude {
    pub use herald_framework::prelude::*;
    pub use herald_framework::{HandlerResponse, format_usage};
    pub use herald_runtime::{HeraldConfig, HeraldRuntime, RuntimeError, RuntimeResult};
}

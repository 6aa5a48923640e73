//! Herald Runtime: configuration, logging and orchestration.
//!
//! - [`config`]: figment-based loading from defaults, `herald.toml` /
//!   `herald.yaml` and `HERALD_*` environment variables
//! - [`logging`]: `tracing-subscriber` setup driven by the `[logging]` section
//! - [`HeraldRuntime`]: owns the registry and dispatcher, publishes slash
//!   commands and runs module hooks when the platform is ready
//!
//! ```ignore
//! use herald_runtime::HeraldRuntime;
//!
//! let runtime = HeraldRuntime::builder()
//!     .resolver(platform.resolver())
//!     .module(Moderation)
//!     .build()?;
//!
//! runtime.ready(platform.publisher()).await?;
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod runtime;

pub use config::{ConfigError, ConfigLoader, ConfigResult, HeraldConfig};
pub use error::{RuntimeError, RuntimeResult};
pub use logging::{LoggingBuilder, SpanEvents};
pub use runtime::{HeraldRuntime, RuntimeBuilder};

pub use tracing;
pub use tracing_subscriber;

/// Logging macros and span helpers.
pub mod prelude {
    pub use tracing::{Level, debug, error, info, instrument, span, trace, warn};
}

//! Configuration schema definitions.
//!
//! ```toml
//! [logging]
//! level = "debug"
//! format = "pretty"
//!
//! [logging.filters]
//! herald_framework = "trace"
//!
//! [commands]
//! prefix = "?"
//! integer_mode = "strict"
//! ephemeral_reply_ttl_ms = 3000
//! ```

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use herald_framework::{DEFAULT_PREFIX, DispatchSettings, IntegerMode};

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeraldConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub commands: CommandsConfig,
}

// =============================================================================
// Logging
// =============================================================================

/// Log verbosity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    pub fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log line layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Full,
    Pretty,
    /// Requires the `json-log` feature.
    Json,
}

/// Where log lines go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    Stdout,
    Stderr,
    /// Requires `file_path`.
    File,
}

/// Which span lifecycle events are logged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanEventConfig {
    #[serde(default)]
    pub new: bool,
    #[serde(default)]
    pub enter: bool,
    #[serde(default)]
    pub exit: bool,
    #[serde(default)]
    pub close: bool,
}

/// Logging settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: LogLevel,

    #[serde(default)]
    pub format: LogFormat,

    #[serde(default)]
    pub output: LogOutput,

    /// Log file, used when `output` is `file`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,

    /// Include thread ids in log lines.
    #[serde(default)]
    pub thread_ids: bool,

    /// Include source file and line in log lines.
    #[serde(default)]
    pub file_location: bool,

    #[serde(default)]
    pub span_events: SpanEventConfig,

    /// Per-module levels, e.g. `herald_framework = "trace"`.
    #[serde(default)]
    pub filters: HashMap<String, LogLevel>,
}

// =============================================================================
// Commands
// =============================================================================

/// Command handling settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandsConfig {
    /// Prefix of text commands.
    #[serde(default = "default_prefix")]
    pub prefix: String,

    #[serde(default)]
    pub integer_mode: IntegerMode,

    /// How long replies of non-public commands stay visible.
    #[serde(default = "default_reply_ttl_ms")]
    pub ephemeral_reply_ttl_ms: u64,

    /// Publish slash command schemas when the platform is ready.
    #[serde(default = "default_publish_on_ready")]
    pub publish_on_ready: bool,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            integer_mode: IntegerMode::default(),
            ephemeral_reply_ttl_ms: default_reply_ttl_ms(),
            publish_on_ready: default_publish_on_ready(),
        }
    }
}

impl CommandsConfig {
    pub fn ephemeral_reply_ttl(&self) -> Duration {
        Duration::from_millis(self.ephemeral_reply_ttl_ms)
    }

    /// Converts to the dispatcher's settings.
    pub fn dispatch_settings(&self) -> DispatchSettings {
        DispatchSettings {
            prefix: self.prefix.clone(),
            integer_mode: self.integer_mode,
            ephemeral_reply_ttl: self.ephemeral_reply_ttl(),
        }
    }
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

fn default_reply_ttl_ms() -> u64 {
    5000
}

fn default_publish_on_ready() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_dispatcher() {
        let config = HeraldConfig::default();
        assert_eq!(config.commands.dispatch_settings(), DispatchSettings::default());
        assert!(config.commands.publish_on_ready);
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(LogLevel::Warn.to_tracing_level(), tracing::Level::WARN);
        assert_eq!(LogLevel::Trace.to_string(), "trace");
    }
}

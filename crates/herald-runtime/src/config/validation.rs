//! Configuration validation utilities.

use super::error::{ConfigError, ConfigResult};
use super::schema::{CommandsConfig, HeraldConfig, LogFormat, LogOutput, LoggingConfig};

/// Validates the entire configuration.
pub fn validate_config(config: &HeraldConfig) -> ConfigResult<()> {
    validate_logging_config(&config.logging)?;
    validate_commands_config(&config.commands)?;
    Ok(())
}

fn validate_logging_config(logging: &LoggingConfig) -> ConfigResult<()> {
    if logging.output == LogOutput::File && logging.file_path.is_none() {
        return Err(ConfigError::validation(
            "logging.file_path is required when logging.output is \"file\"",
        ));
    }

    if logging.format == LogFormat::Json && !cfg!(feature = "json-log") {
        return Err(ConfigError::validation(
            "logging.format \"json\" requires the json-log feature",
        ));
    }

    Ok(())
}

fn validate_commands_config(commands: &CommandsConfig) -> ConfigResult<()> {
    if commands.prefix.is_empty() {
        return Err(ConfigError::validation("commands.prefix must not be empty"));
    }

    if commands.prefix.chars().any(char::is_whitespace) {
        return Err(ConfigError::validation(
            "commands.prefix must not contain whitespace",
        ));
    }

    if commands.ephemeral_reply_ttl_ms == 0 {
        return Err(ConfigError::validation(
            "commands.ephemeral_reply_ttl_ms must be greater than 0",
        ));
    }

    Ok(())
}

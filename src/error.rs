//! Error types used throughout the bot.

use std::time::Duration;

use thiserror::Error;

use crate::serenity;

/// The crate-wide error type handed to [poise].
#[derive(Debug, Error)]
pub enum BeaconError {
    /// Errors caused by the user, shown back to them.
    #[error(transparent)]
    UserError(#[from] UserError),

    /// Problems with `config.toml`.
    #[error(transparent)]
    ConfigError(#[from] ConfigError),

    /// Anything coming back from discord.
    #[error("Discord error: {0}")]
    Serenity(#[from] serenity::Error),

    #[error("Command check failed: {}", reason.as_deref().unwrap_or("no reason given"))]
    CheckFailed { reason: Option<String> },

    #[error("Command panicked: {}", payload.as_deref().unwrap_or("no payload"))]
    Panic { payload: Option<String> },

    #[error("Command structure mismatch: {description}")]
    CommandStructureMismatch { description: String },
}

/// Errors a user can trigger and should be told about.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("Slow down! Try again in {} seconds.", remaining_cooldown.as_secs().max(1))]
    OnCooldown { remaining_cooldown: Duration },

    #[error("Couldn't understand '{}'.", input.as_deref().unwrap_or("the given arguments"))]
    BadArgs { input: Option<String> },
}

/// Reasons the bot could not be configured.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No config file found. {action_msg}")]
    MissingConfig { action_msg: String },

    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },

    #[error("Could not access config file: {0}")]
    IoError(#[from] std::io::Error),
}

/// Reasons the automod message catalog could not be read.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse catalog: {0}")]
    Parse(#[from] serde_path_to_error::Error<serde_json::Error>),

    #[error("unexpected data after catalog: {0}")]
    TrailingData(serde_json::Error),
}

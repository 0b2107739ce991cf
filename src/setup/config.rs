//! Configuration for running this bot.

use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use poise::Framework;
use serde::Deserialize;
use serde::Serialize;
use serenity::GuildId;
use serenity::UserId;
use url::Url;

use crate::error::ConfigError;
use crate::serenity;
use crate::BeaconError;
use crate::Data;

/// The path to the config file
const CONFIG_PATH: &str = "config.toml";

/// Placeholder written into fresh config files.
const DEFAULT_TOKEN: &str = "put_token_here";

/// Settings read from [CONFIG_PATH] that modify bot behavior.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Token needed to use a bot account.
    discord_token: String,

    /// See [ResponsesConfig]
    responses: ResponsesConfig,

    /// See [AutomodConfig]
    automod: AutomodConfig,

    /// See [LoggingConfig]
    logging: LoggingConfig,

    /// Useful developer specific configs.
    dev_utils: DevConfig,
}

impl Config {
    /// Tries to read [CONFIG_PATH] to extract a [Config].
    /// If a file doesn't exists, create the default config file and returns error.
    /// If a file exists but is empty, re-write the default values and return error.
    /// If a file exists but is incomplete, show error and don't change files.
    /// If a file exists and is complete, read file to create a config.
    /// If file existance is indeterminent (e.g. missing permissions), return error.
    pub fn read() -> Result<Config, ConfigError> {
        match std::fs::read_to_string(CONFIG_PATH) {
            Ok(content) => {
                if content.trim().is_empty() {
                    write_file(&Config::default())?;
                    Err(ConfigError::InvalidConfig {
                        reason: format!("Empty config file! Rewriting {CONFIG_PATH} ..."),
                    })
                } else {
                    Config::parse(&content)
                }
            }
            Err(file_error) => match file_error.kind() {
                std::io::ErrorKind::NotFound => {
                    let action = format!("Creating {CONFIG_PATH}...");
                    write_file(&Config::default())?;
                    Err(ConfigError::MissingConfig { action_msg: action })
                }
                _ => Err(ConfigError::IoError(file_error)),
            },
        }
    }

    /// Deserialize a config, describing where the mistake is on failure.
    fn parse(content: &str) -> Result<Config, ConfigError> {
        let to_toml = toml::Deserializer::new(content);
        serde_path_to_error::deserialize(to_toml).map_err(|error| ConfigError::InvalidConfig {
            reason: error.to_string(),
        })
    }

    /// Basic sanity check for if a token was given.
    pub fn token(&self) -> Result<&str, ConfigError> {
        let given_token = self.discord_token.trim();

        if given_token.is_empty() || given_token.contains(DEFAULT_TOKEN) {
            Err(ConfigError::InvalidConfig {
                reason: "Missing discord token".to_string(),
            })
        } else {
            Ok(given_token)
        }
    }

    /// Construct a bug notification notify list based on the config.
    /// Wrapper for [NotifyConfig::notify_list]
    pub fn notify_list(&self, fw: &Framework<Data, BeaconError>) -> HashSet<UserId> {
        self.dev_utils.notifications.notify_list(&fw.options().owners)
    }

    /// Getter for log_dir.
    pub fn log_dir(&self) -> &str {
        &self.logging.log_dir
    }

    /// Is debug mode enabled for console logs
    pub fn console_debug(&self) -> bool {
        self.logging.console_debug
    }

    /// Is file logging enabled.
    pub fn logs_enabled(&self) -> bool {
        self.logging.logs_enabled
    }

    /// Guilds that get commands registered instantly.
    pub fn dev_guilds(&self) -> &[GuildId] {
        &self.dev_utils.dev_guilds
    }

    /// Where the automod keyword to message map lives.
    pub fn automod_messages_path(&self) -> &Path {
        &self.automod.messages_path
    }

    /// Link posted by `/github`.
    pub fn github_repository(&self) -> &Url {
        &self.responses.github_repository
    }

    /// Message posted when the bot joins a server.
    pub fn welcome_message(&self) -> &str {
        &self.responses.welcome_message
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            discord_token: DEFAULT_TOKEN.to_string(),

            responses: ResponsesConfig {
                github_repository: Url::parse("https://github.com/your-name/beacon-bot")
                    .expect("default repository url is valid"),
                welcome_message: "Thanks for adding me! Set up an auto-moderation keyword rule \
                                  and I'll explain it to whoever trips it."
                    .to_string(),
            },

            automod: AutomodConfig {
                messages_path: PathBuf::from("config/automod-messages.json"),
            },

            logging: LoggingConfig {
                console_debug: false,
                logs_enabled: true,
                log_dir: "logs".to_string(),
            },

            dev_utils: DevConfig {
                dev_guilds: vec![],
                notifications: NotifyConfig {
                    enabled: false,
                    add_owners: true,
                    userids: vec![],
                },
            },
        }
    }
}

/// Static replies the bot sends.
#[derive(Debug, Serialize, Deserialize)]
struct ResponsesConfig {
    /// Repository linked by the `/github` command.
    github_repository: Url,
    /// Posted in the system channel of newly joined servers.
    welcome_message: String,
}

/// Auto-moderation responder settings.
#[derive(Debug, Serialize, Deserialize)]
struct AutomodConfig {
    /// JSON file mapping keywords to message templates.
    /// Re-read on every automod trigger, so edits apply without a restart.
    messages_path: PathBuf,
}

/// Console and file logging settings.
#[derive(Debug, Serialize, Deserialize)]
struct LoggingConfig {
    /// Print debug traces to console?
    console_debug: bool,
    /// Enable writing to log file?
    logs_enabled: bool,
    /// Directory to store log files
    log_dir: String,
}

/// Optional configs to enable developer-specific behavior.
#[derive(Debug, Serialize, Deserialize)]
struct DevConfig {
    /// Guilds where commands are registered immediately, useful while developing.
    #[serde(default)]
    dev_guilds: Vec<GuildId>,
    /// See [NotifyConfig]
    notifications: NotifyConfig,
}

/// Configs for notification behavior when encountering unexpected errors.
#[derive(Debug, Serialize, Deserialize)]
struct NotifyConfig {
    /// Enable this behavior or not. (bot sends a private message)
    enabled: bool,
    /// Whether to automatically add owners to the notify list.
    add_owners: bool,
    /// Additional users to add to the notify list.
    userids: Vec<UserId>,
}

impl NotifyConfig {
    /// Construct a bug notification notify list based on the config.
    fn notify_list(&self, owners: &HashSet<UserId>) -> HashSet<UserId> {
        // If disabled, don't add anyone to the list.
        if !self.enabled {
            return HashSet::new();
        }

        let mut notify_list = HashSet::new();

        if self.add_owners {
            notify_list.extend(owners.iter().copied());
        }

        notify_list.extend(self.userids.iter().copied());

        notify_list
    }
}

/// Write the given config to [CONFIG_PATH].
fn write_file(config: &Config) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(config).expect("config serialization can't fail");
    std::fs::write(CONFIG_PATH, content).map_err(ConfigError::IoError)
}

//! Builds the discord client from a [Config].

mod config;
mod framework;

use crate::serenity;
use crate::BeaconError;

pub use config::Config;

/// Constructs a [serenity::Client] driven by the [poise] framework.
pub(super) async fn client(config: Config) -> Result<serenity::Client, BeaconError> {
    let token = config.token()?.to_string();

    // Automod executions need their own intent, message content fills `{content}`.
    // See https://discord.com/developers/docs/topics/gateway#gateway-intents
    let intents = serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT
        | serenity::GatewayIntents::AUTO_MODERATION_EXECUTION;

    let client = serenity::ClientBuilder::new(token, intents)
        .framework(framework::framework(config))
        .await?;

    Ok(client)
}

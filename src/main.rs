//! A small discord bot that answers auto-moderation triggers with
//! configurable messages, greets new servers and links to its source.

mod automod;
mod commands;
mod data;
mod error;
mod events;
mod log;
mod setup;

pub use poise::serenity_prelude as serenity;

pub use data::Data;
pub use error::BeaconError;
pub use setup::Config;

/// Convenient type alias for [poise::Context].
pub type Context<'a> = poise::Context<'a, Data, BeaconError>;

#[tokio::main]
async fn main() -> Result<(), BeaconError> {
    let config = Config::read()?;

    // Keep the guard alive, otherwise file logs stop being flushed.
    let _guard = log::install_tracing(&config);

    let mut client = setup::client(config).await?;
    client.start().await?;

    Ok(())
}

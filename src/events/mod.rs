//! Event handling
//!
//! Routes gateway events that aren't commands to their handlers.

mod welcome;

use poise::FrameworkContext;
use tracing::info;

use crate::automod::ModerationEvent;
use crate::serenity;
use crate::serenity::FullEvent;
use crate::BeaconError;
use crate::Data;

/// Entry point for [poise]'s `event_handler`.
/// Handlers log their own failures, so this never returns an error.
pub async fn handle(
    ctx: &serenity::Context,
    event: &FullEvent,
    _framework: FrameworkContext<'_, Data, BeaconError>,
    data: &Data,
) -> Result<(), BeaconError> {
    match event {
        FullEvent::AutoModActionExecution { execution } => {
            let event = ModerationEvent::from(execution);
            data.automod.handle(&event, &*ctx.http).await;
        }
        FullEvent::GuildCreate {
            guild,
            is_new: Some(true),
        } => {
            info!("Added to {} ({})", guild.name, guild.id);
            welcome::greet(
                &*ctx.http,
                guild.system_channel_id,
                &data.welcome_message,
            )
            .await;
        }
        _ => {}
    }

    Ok(())
}

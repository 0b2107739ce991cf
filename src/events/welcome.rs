//! Greets servers the bot was just added to.

use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::instrument;

use crate::automod::MessageTransport;
use crate::automod::ResponsePayload;
use crate::serenity::ChannelId;

/// Post `message` into the server's system channel.
/// Servers without a system channel get nothing, failures are only logged.
#[instrument(skip(transport, message))]
pub async fn greet<T>(transport: &T, system_channel: Option<ChannelId>, message: &str)
where
    T: MessageTransport + ?Sized,
{
    let Some(channel_id) = system_channel else {
        debug!("No system channel to greet in.");
        return;
    };

    if message.trim().is_empty() {
        debug!("Welcome message is empty, not greeting.");
        return;
    }

    let payload = ResponsePayload::silent(message.to_string());
    match transport.create_message(channel_id, &payload).await {
        Ok(()) => info!("Sent welcome message."),
        Err(e) => error!("Failed to send welcome message: {e}"),
    }
}

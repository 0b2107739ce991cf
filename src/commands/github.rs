//! Implements the `/github` command.
//!
//! The bot replies with a link to its source repository.

use poise::CreateReply;
use serenity::CreateAllowedMentions;
use tracing::instrument;
use url::Url;

use crate::serenity;
use crate::BeaconError;
use crate::Context;

/// Link to my source code
#[instrument(skip(ctx))]
#[poise::command(slash_command, user_cooldown = 5)]
pub async fn github(ctx: Context<'_>) -> Result<(), BeaconError> {
    let reply = CreateReply::default()
        .content(reply_text(&ctx.data().github_repository))
        .allowed_mentions(CreateAllowedMentions::new());

    ctx.send(reply).await?;
    Ok(())
}

/// Text of the reply.
fn reply_text(repository: &Url) -> String {
    format!("You can find my source code on GitHub: {repository}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_contains_link() {
        let url = Url::parse("https://github.com/someone/beacon-bot").unwrap();
        assert_eq!(
            reply_text(&url),
            "You can find my source code on GitHub: https://github.com/someone/beacon-bot"
        );
    }
}

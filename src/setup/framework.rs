//! Setup for [poise::Framework]

use crate::automod::AutomodResponder;
use crate::commands;
use crate::serenity;
use crate::BeaconError;
use crate::Config;
use crate::Data;

/// Convenient type alias, only this [poise::Framework] type is used.
type Framework = poise::Framework<Data, BeaconError>;

/// Construct a [poise::Framework]
pub(super) fn framework(config: Config) -> Framework {
    poise::Framework::builder()
        .options(framework_options())
        .setup(|ctx, rdy, fw| framework_setup(ctx, rdy, fw, config))
        .build()
}

/// Configure options for the [Framework]
fn framework_options() -> poise::FrameworkOptions<Data, BeaconError> {
    poise::FrameworkOptions {
        commands: commands::list(),
        on_error: |e| crate::log::handle_framework_error(e),
        // Everything that isn't a command, e.g. automod executions
        event_handler: |ctx, event, fw, data| Box::pin(crate::events::handle(ctx, event, fw, data)),
        pre_command: |ctx| {
            Box::pin(async move {
                let cmd_name = &ctx.command().name;
                let user = &ctx.author();
                tracing::info!("Started '{cmd_name}' command from {user}.")
            })
        },
        post_command: |ctx| {
            Box::pin(async move {
                let cmd_name = &ctx.command().name;
                let user = &ctx.author();
                tracing::info!("Finished '{cmd_name}' command from {user}.")
            })
        },
        ..Default::default()
    }
}

/// Construct future that runs on startup
fn framework_setup<'a>(
    ctx: &'a serenity::Context,
    rdy: &'a serenity::Ready,
    fw: &'a Framework,
    config: Config,
) -> poise::BoxFuture<'a, Result<Data, BeaconError>> {
    Box::pin(async move {
        let app_commands = poise::builtins::create_application_commands(&fw.options().commands);

        serenity::Command::set_global_commands(ctx, app_commands.clone()).await?;
        for dev_guild in config.dev_guilds() {
            // Guild commands update instantly, global ones can take a while.
            tracing::info!("Registering commands on dev guild {dev_guild}.");
            dev_guild.set_commands(ctx, app_commands.clone()).await?;
        }

        let bot_name = &rdy.user.name;
        tracing::info!("{bot_name} is ready!");

        let data = Data {
            notify_list: config.notify_list(fw),
            automod: AutomodResponder::new(config.automod_messages_path()),
            github_repository: config.github_repository().clone(),
            welcome_message: config.welcome_message().to_string(),
        };

        Ok(data)
    })
}

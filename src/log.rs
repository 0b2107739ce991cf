//! Logging functionality and error reporting.
//! The logging library of choice is [tracing].

use poise::BoxFuture;
use poise::CreateReply;
use poise::FrameworkError;
use serenity::CreateMessage;
use tracing::debug;
use tracing::error;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::Targets, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer,
};

use crate::error::UserError;
use crate::serenity;
use crate::BeaconError;
use crate::Config;
use crate::Context;
use crate::Data;

/// The name of this crate, used to set filter target.
const THIS_CRATE: &str = env!("CARGO_CRATE_NAME");

/// Setup format layers, tracing subscribers, and installs tracing.
pub(super) fn install_tracing(config: &Config) -> Option<WorkerGuard> {
    let timer = fmt::time::ChronoLocal::rfc_3339();
    let debug = config.console_debug();

    // By default, all INFO traces and above are shown.
    let target = if debug {
        Targets::new()
            .with_default(LevelFilter::INFO)
            .with_target(THIS_CRATE, LevelFilter::DEBUG)
    } else {
        Targets::new().with_default(LevelFilter::INFO)
    };

    let console_layer = fmt::layer()
        .with_ansi(true)
        .with_file(debug)
        .with_level(true)
        .with_line_number(debug)
        .with_target(true)
        .with_timer(timer.clone())
        .pretty()
        .with_filter(target.clone());

    // File logs go to `log_dir` as "{THIS_CRATE}.log.{TIMESTAMP}", rolled hourly.
    let (log_layer, guard) = if config.logs_enabled() {
        let appender = tracing_appender::rolling::hourly(config.log_dir(), format!("{THIS_CRATE}.log"));
        let (writer, guard) = tracing_appender::non_blocking(appender);

        let layer = fmt::layer()
            .with_ansi(false)
            .with_file(debug)
            .with_level(true)
            .with_line_number(debug)
            .with_target(true)
            .with_timer(timer)
            .with_writer(writer)
            .compact()
            .with_filter(target);

        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(log_layer)
        .init();

    guard
}

/// Defines various behaviors for how to handle errors.
/// [UserError]s get an ephemeral reply, unexpected errors also trigger a [notify_bug].
pub fn handle_framework_error(err: FrameworkError<'_, Data, BeaconError>) -> BoxFuture<'_, ()> {
    let handler = async move {
        match err {
            // ---
            // Invisible to users.
            // ---
            FrameworkError::Setup { error, .. } => error!("Error during startup: {error}"),
            FrameworkError::EventHandler { error, event, .. } => {
                error!("Error while handling event. Event: {event:#?} Error:{error}")
            }

            // ---
            // Shown to users, but nothing unexpected happened.
            // ---
            FrameworkError::Command {
                error: BeaconError::UserError(user_error),
                ctx,
                ..
            } => {
                Response::builder()
                    .ctx(&ctx)
                    .reply(user_error.to_string())
                    .source(user_error)
                    .build()
                    .send()
                    .await;
            }
            FrameworkError::ArgumentParse {
                error, input, ctx, ..
            } => {
                let user_error = UserError::BadArgs { input };

                Response::builder()
                    .ctx(&ctx)
                    .reply(user_error.to_string())
                    .source(user_error)
                    .add_info(error.to_string())
                    .build()
                    .send()
                    .await;
            }
            FrameworkError::CooldownHit {
                remaining_cooldown,
                ctx,
                ..
            } => {
                let user_error = UserError::OnCooldown { remaining_cooldown };

                Response::builder()
                    .ctx(&ctx)
                    .reply(user_error.to_string())
                    .source(user_error)
                    .build()
                    .send()
                    .await;
            }
            FrameworkError::CommandCheckFailed { error, ctx, .. } => {
                let error = BeaconError::CheckFailed {
                    reason: error.map(|e| e.to_string()),
                };

                Response::builder()
                    .ctx(&ctx)
                    .reply(error.to_string())
                    .source(error)
                    .build()
                    .send()
                    .await;
            }

            // ---
            // Shown to users and logged as error!, these should be fixed.
            // ---
            FrameworkError::Command { error, ctx, .. } => {
                Response::builder()
                    .ctx(&ctx)
                    .reply("Something went wrong... A bug report has been sent.")
                    .source(error)
                    .notify(true)
                    .is_error(true)
                    .build()
                    .send()
                    .await;
            }
            FrameworkError::CommandPanic { payload, ctx, .. } => {
                let error = BeaconError::Panic { payload };

                Response::builder()
                    .ctx(&ctx)
                    .reply("Something went horribly wrong... A bug report has been sent.")
                    .source(error)
                    .notify(true)
                    .is_error(true)
                    .build()
                    .send()
                    .await;
            }
            FrameworkError::CommandStructureMismatch {
                description, ctx, ..
            } => {
                let error = BeaconError::CommandStructureMismatch {
                    description: description.to_string(),
                };

                Response::builder()
                    .ctx(&ctx.into())
                    .reply("Command structure mismatch. Please wait until discord catches up to a bot update.")
                    .source(error)
                    .notify(true)
                    .is_error(true)
                    .build()
                    .send()
                    .await;
            }

            // ---
            // Unreachable with slash-only commands.
            // ---
            FrameworkError::UnknownCommand { .. } => {
                error!("Prefix commands are not supported.")
            }
            FrameworkError::UnknownInteraction { interaction, .. } => {
                let name = &interaction.data.name;
                error!("Received unknown interaction: {name}")
            }
            _ => error!("The dev must have forgotten something..."),
        }
    };

    Box::pin(handler)
}

/// Sends an ephemeral reply to the [Context] author.
async fn ephemeral_reply(ctx: &Context<'_>, content: impl Into<String>) {
    let reply = CreateReply::default().ephemeral(true).content(content);
    if let Err(e) = ctx.send(reply).await {
        error!("Failed to send ephemeral reply. {e}")
    };
}

/// Sends a private message to everyone on [Data::notify_list].
/// If a message fails, only log and don't retry.
async fn notify_bug(ctx: &Context<'_>, content: impl Into<String>) {
    let message = CreateMessage::new().content(content);

    for user in &ctx.data().notify_list {
        if let Err(e) = user.direct_message(ctx, message.clone()).await {
            error!("Failed to send bug notification. {e}");
        }
    }
}

/// Helper function to create debug information from [Context]
fn debug_info(ctx: &Context) -> String {
    let user = &ctx.author().name;
    let cmd = &ctx.command().name;
    let user_input = ctx.invocation_string();
    format!("{user} tried to use {cmd} with {user_input}.")
}

/// Structured response to errors.
/// Always logs as at least [debug level](tracing::debug), but is upgraded to
/// [error level](tracing::error) if `is_error` is set.
/// Notify messages are accompanied by [debug info](debug_info).
#[derive(bon::Builder)]
#[builder(on(String, into))]
struct Response<'a> {
    /// The context of the response
    ctx: &'a Context<'a>,
    /// The reason for this reply, usually the error causing the response.
    #[builder(into)]
    source: BeaconError,
    /// Optional ephemeral reply to user.
    reply: Option<String>,
    /// Additional information to log
    add_info: Option<String>,
    /// Set to `true` to log as error.
    #[builder(default = false)]
    is_error: bool,
    /// Set to `true` to send notifications of the error.
    /// Does nothing if `is_error` is false.
    #[builder(default = false)]
    notify: bool,
}

impl Response<'_> {
    /// Execute the response
    async fn send(&self) {
        let ctx = self.ctx;

        let log_message = match &self.add_info {
            Some(info) => format!("{} | {info}", self.source),
            None => self.source.to_string(),
        };

        if self.is_error {
            error!("{log_message}");
            if self.notify {
                let content = format!("Debug Info: {}\n{log_message}", debug_info(ctx));
                notify_bug(ctx, content).await;
            }
        } else {
            debug!("{log_message}");
        }

        if let Some(ref reply) = self.reply {
            ephemeral_reply(ctx, reply).await;
        }
    }
}

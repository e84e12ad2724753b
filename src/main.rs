use std::{env, str::FromStr as _, sync::Arc};

use anyhow::{Context as _, Result};
use poise::{
    Framework, FrameworkOptions,
    serenity_prelude::{
        ActivityData, CacheHttp as _, ClientBuilder, Context as SerenityContext, EventHandler,
        FullEvent, GatewayIntents, Interaction, Token, UserId, async_trait,
    },
};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use config::{ACTIVITY_TEXT, CONFIG_PATH, JOBS_MENU_ID, PanelConfig};
use panel::{PanelState, discord::DiscordChannel, sync};
use shared::BotData;

mod commands;
mod config;
mod error;
mod jobs;
mod log;
mod panel;
mod shared;

#[tokio::main]
async fn main() -> Result<()> {
    let _log_guard = log::init_log();

    _ = dotenvy::dotenv();

    let token = config::check_token(env::var("DISCORD_TOKEN").ok()).inspect_err(|err| {
        error!("Refusing to start: {err}");
    })?;
    let token = Token::from_str(&token)?;

    let config_path = env::var("PANEL_CONFIG").unwrap_or_else(|_| CONFIG_PATH.to_string());
    let config = PanelConfig::load(&config_path)?;
    info!(
        "Loaded {} jobs from {config_path}",
        config.catalog.len()
    );

    let framework = Framework::builder()
        .options(FrameworkOptions {
            commands: commands::all(),
            on_error: error::error_handler,
            pre_command: |ctx| {
                Box::pin(async move {
                    info!(
                        "[>] `{}` invoked by {}",
                        ctx.invocation_string(),
                        ctx.author().name,
                    );
                })
            },
            post_command: |ctx| {
                Box::pin(async move {
                    info!(
                        "[<] {}'s `{}` invocation completed successfully",
                        ctx.author().name,
                        ctx.invocation_string(),
                    );
                })
            },
            ..Default::default()
        })
        .initialize_owners(false)
        .build();

    // the panel is read and written over HTTP only, so no privileged intents are needed
    let intents = GatewayIntents::GUILDS;

    let mut client = ClientBuilder::new(token, intents)
        .framework(Box::new(framework))
        .event_handler(Arc::new(Handler))
        .activity(ActivityData::watching(ACTIVITY_TEXT))
        .data(Arc::new(BotData {
            panel: Mutex::new(PanelState::new(config.channel_id)),
            config,
        }))
        .await?;

    client.start().await?;

    Ok(())
}

/// Synchronise the panel once, then register the slash commands globally.
async fn on_ready(ctx: &SerenityContext, bot_id: UserId) -> Result<()> {
    let data = ctx.data::<BotData>();

    {
        let mut state = data.panel.lock().await;
        match state.channel_id {
            Some(channel_id) => {
                let channel = DiscordChannel::new(Arc::clone(&ctx.http), channel_id);
                sync::sync_panel_logged(&channel, bot_id, &data.config, &mut state).await;
            }
            None => warn!("No panel channel configured, skipping the startup panel sync"),
        }
    }

    let commands = commands::all();
    poise::builtins::register_globally(ctx.http(), &commands)
        .await
        .context("Failed to register commands")?;
    info!("Registered {} commands", commands.len());

    Ok(())
}

struct Handler;

#[async_trait]
impl EventHandler for Handler {
    async fn dispatch(&self, ctx: &SerenityContext, event: &FullEvent) {
        if let Err(err) = match event {
            FullEvent::Ready { data_about_bot, .. } => {
                info!("{} is connected", data_about_bot.user.name);
                on_ready(ctx, data_about_bot.user.id).await
            }
            FullEvent::InteractionCreate {
                interaction: Interaction::Component(interaction),
                ..
            } => {
                if interaction.data.custom_id.as_str() == JOBS_MENU_ID {
                    jobs::interaction::handle_interaction(ctx, interaction).await
                } else {
                    Ok(())
                }
            }
            _ => Ok(()),
        } {
            error::event_handler_error(err, ctx, event).await;
        }
    }
}

use std::sync::Arc;

use anyhow::{Context as _, Result, anyhow};
use poise::{
    CreateReply,
    serenity_prelude::{Permissions, UserId},
};
use tracing::warn;

use crate::config::PanelConfig;
use crate::error::{PanelError, UserError};
use crate::panel::{
    PanelState,
    discord::DiscordChannel,
    sync::{self, PanelChannel},
};
use crate::shared::Context;

pub const DENIED_NOTICE: &str = "❌ للأدمن فقط";
pub const REFRESHED_NOTICE: &str = "✅ تم تحديث اللوحة";

pub fn check_admin(permissions: Permissions) -> Result<(), PanelError> {
    if permissions.administrator() {
        Ok(())
    } else {
        Err(PanelError::PermissionDenied)
    }
}

/// Refresh the panel on behalf of a member with `permissions`, returning the private reply.
/// Sync failures are logged and still confirmed.
pub async fn refresh(
    permissions: Permissions,
    channel: &impl PanelChannel,
    bot_id: UserId,
    config: &PanelConfig,
    state: &mut PanelState,
) -> &'static str {
    if let Err(err) = check_admin(permissions) {
        warn!("Panel refresh rejected: {err}");
        return DENIED_NOTICE;
    }

    sync::sync_panel_logged(channel, bot_id, config, state).await;
    REFRESHED_NOTICE
}

/// تحديث لوحة الوظائف (للأدمن)
#[poise::command(slash_command, rename = "تحديث_اللوحة", guild_only)]
pub async fn refresh_panel(ctx: Context<'_>) -> Result<()> {
    let guild = ctx
        .guild_id()
        .context(UserError(anyhow!("Command must be run inside a guild")))?;
    let author = ctx
        .author_member()
        .await
        .context("Member missing in guild command invocation")?;

    let permissions = guild
        .to_partial_guild(ctx.http())
        .await?
        .member_permissions(&author);

    if !permissions.administrator() {
        warn!("{} attempted to refresh the panel", author.user.name);
        ctx.send(CreateReply::default().content(DENIED_NOTICE).ephemeral(true))
            .await?;
        return Ok(());
    }

    ctx.defer_ephemeral().await?;

    let data = ctx.data();
    let mut state = data.panel.lock().await;
    let channel_id = state
        .channel_id
        .context(UserError(anyhow!("No panel channel is configured")))?;

    let channel = DiscordChannel::new(Arc::clone(&ctx.serenity_context().http), channel_id);
    let reply = refresh(
        permissions,
        &channel,
        ctx.framework().bot_id(),
        &data.config,
        &mut state,
    )
    .await;
    drop(state);

    ctx.send(CreateReply::default().content(reply).ephemeral(true))
        .await?;

    Ok(())
}
